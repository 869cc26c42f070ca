//! Board state and its mutation.
//!
//! `Position` keeps one bitboard per color and piece kind plus the derived
//! occupancy sets, the side to move, castling rights, en-passant target, the
//! move counters and an incrementally maintained Zobrist hash. Moves are
//! applied in place (`make_move`) and reverted from an undo stack
//! (`undo_move`).

mod attacks;
mod make_unmake;
mod status;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::attack_tables::AttackTables;
use crate::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::ZobristKeys;

pub use make_unmake::ScopedMove;
pub use status::GameStatus;

/// Irreversible state saved by `make_move`; the move itself carries the
/// captured piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UndoRecord {
    pub(crate) mv: Move,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

#[derive(Clone)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) history: Vec<UndoRecord>,
    attacks: &'static AttackTables,
    zobrist: &'static ZobristKeys,
}

impl Position {
    /// The standard starting position, using the process-wide tables.
    #[must_use]
    pub fn new() -> Self {
        Self::startpos_with(AttackTables::global(), ZobristKeys::global())
    }

    /// An empty board with White to move, using the process-wide tables.
    #[must_use]
    pub fn empty() -> Self {
        Self::empty_with(AttackTables::global(), ZobristKeys::global())
    }

    /// An empty board bound to the given attack tables and Zobrist keys.
    #[must_use]
    pub fn empty_with(attacks: &'static AttackTables, zobrist: &'static ZobristKeys) -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::with_capacity(256),
            attacks,
            zobrist,
        }
    }

    /// The starting position bound to the given attack tables and Zobrist keys.
    #[must_use]
    pub fn startpos_with(attacks: &'static AttackTables, zobrist: &'static ZobristKeys) -> Self {
        let mut pos = Self::empty_with(attacks, zobrist);
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            pos.set_piece(Square::from_index(file), Color::White, piece);
            pos.set_piece(Square::from_index(8 + file), Color::White, Piece::Pawn);
            pos.set_piece(Square::from_index(48 + file), Color::Black, Piece::Pawn);
            pos.set_piece(Square::from_index(56 + file), Color::Black, piece);
        }
        pos.castling = CastlingRights::all();
        pos.hash = pos.compute_hash();
        pos
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = !Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= bit;
        self.occupied[color.index()] &= bit;
        self.all_occupied &= bit;
    }

    /// Color and kind of the piece on `sq`
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].contains(sq))
            .map(|piece| (color, piece))
    }

    /// Kind of the piece on `sq`, regardless of color
    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Incrementally maintained Zobrist hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash recomputed from the board, for checking the incremental one
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        self.zobrist.from_scratch(self)
    }

    /// Number of moves on the undo stack
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    #[inline]
    #[must_use]
    pub fn attack_tables(&self) -> &'static AttackTables {
        self.attacks
    }

    #[inline]
    #[must_use]
    pub fn zobrist_keys(&self) -> &'static ZobristKeys {
        self.zobrist
    }

    /// Drop the undo stack so the current position becomes the new root.
    ///
    /// Repetition detection loses the discarded history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    #[cfg(test)]
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut side = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces(color, piece);
                if !(seen & bb).is_empty() {
                    return Err(format!("{color} {piece:?} overlaps another piece"));
                }
                seen |= bb;
                side |= bb;
            }
            if side != self.occupied_by(color) {
                return Err(format!("{color} occupancy out of sync"));
            }
        }
        if seen != self.all_occupied {
            return Err("total occupancy out of sync".to_string());
        }
        if self.hash != self.compute_hash() {
            return Err(format!(
                "hash {:#x} != recomputed {:#x}",
                self.hash,
                self.compute_hash()
            ));
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality of the full game state, undo stack included.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.all_occupied == other.all_occupied
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.hash == other.hash
            && self.history == other.history
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("history", &self.history.len())
            .finish()
    }
}
