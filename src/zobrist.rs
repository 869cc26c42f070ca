//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table. Keys come from a seeded `StdRng`, so equal seeds give
//! equal keys across runs and instances.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::position::Position;
use crate::types::{CastlingRights, Color, Piece, Square};

/// Seed for the process-wide keys.
pub const DEFAULT_ZOBRIST_SEED: u64 = 1_234_567_890;

static GLOBAL_KEYS: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::new(DEFAULT_ZOBRIST_SEED));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    // piece_keys[color][piece][square]
    piece_keys: [[[u64; 64]; 6]; 2],
    // one per castling bit, in CastlingRights bit order
    castling_keys: [u64; 4],
    en_passant_keys: [u64; 8],
    black_to_move_key: u64,
}

impl ZobristKeys {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[[0; 64]; 6]; 2];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        for key in &mut castling_keys {
            *key = rng.gen();
        }
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }
        let black_to_move_key = rng.gen();

        log::trace!("zobrist keys generated (seed {seed})");

        ZobristKeys {
            piece_keys,
            castling_keys,
            en_passant_keys,
            black_to_move_key,
        }
    }

    /// Process-wide keys built from [`DEFAULT_ZOBRIST_SEED`].
    #[must_use]
    pub fn global() -> &'static ZobristKeys {
        &GLOBAL_KEYS
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    /// XOR of the keys of every right set in `rights`.
    ///
    /// Linear in the bits, so `castling(a) ^ castling(b)` is the delta between
    /// two rights states.
    #[inline]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        let bits = rights.as_u8();
        self.castling_keys
            .iter()
            .enumerate()
            .filter(|&(i, _)| bits & (1 << i) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_keys[file as usize & 7]
    }

    #[inline]
    #[must_use]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move_key
    }

    /// Full recomputation of a position's hash.
    ///
    /// Only used to verify the incremental hash kept by `Position`.
    #[must_use]
    pub fn from_scratch(&self, pos: &Position) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in pos.pieces(color, piece) {
                    hash ^= self.piece(color, piece, sq);
                }
            }
        }
        hash ^= self.castling(pos.castling_rights());
        if let Some(ep) = pos.en_passant() {
            hash ^= self.en_passant(ep.file());
        }
        if pos.side_to_move() == Color::Black {
            hash ^= self.black_to_move_key;
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_keys() {
        assert_eq!(ZobristKeys::new(42), ZobristKeys::new(42));
        assert_ne!(ZobristKeys::new(42), ZobristKeys::new(43));
        assert_eq!(&ZobristKeys::new(DEFAULT_ZOBRIST_SEED), ZobristKeys::global());
    }

    #[test]
    fn castling_keys_combine_linearly() {
        let keys = ZobristKeys::global();
        let all = CastlingRights::all();
        let mut some = all;
        some.remove(Color::White, true);
        let delta = CastlingRights::from_u8(all.as_u8() ^ some.as_u8());
        assert_eq!(keys.castling(all) ^ keys.castling(some), keys.castling(delta));
        assert_eq!(keys.castling(CastlingRights::none()), 0);
    }

    #[test]
    fn start_position_hash_matches_from_scratch() {
        let pos = Position::new();
        assert_eq!(pos.hash(), ZobristKeys::global().from_scratch(&pos));
        assert_ne!(pos.hash(), 0);
    }
}
