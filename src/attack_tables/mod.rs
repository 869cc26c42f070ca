//! Attack tables for move generation.
//!
//! Leaper tables (knight, king, pawn) are direct per-square lookups. Bishop and
//! rook attacks use magic bitboards; queens combine the two.
//! The tables are immutable once built. A process-wide instance is available
//! through [`AttackTables::global`], and callers may build their own.

mod leapers;
mod magic;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::{Bitboard, Color, Square};

use self::magic::MagicTable;

/// Seed for the magic-number search of the global tables.
pub const DEFAULT_MAGIC_SEED: u64 = 0x6D61_6769_6373;

static GLOBAL_TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::new);

/// Sliding piece kinds with a magic table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    bishop: MagicTable,
    rook: MagicTable,
}

impl AttackTables {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_MAGIC_SEED)
    }

    /// Build all tables, searching for magics with the given seed.
    ///
    /// Every seed yields correct tables; the seed only picks which magics are found.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bishop = MagicTable::build(Slider::Bishop, &mut rng);
        let rook = MagicTable::build(Slider::Rook, &mut rng);
        log::trace!("attack tables ready (magic seed {seed:#x})");
        AttackTables {
            knight: leapers::knight_table(),
            king: leapers::king_table(),
            pawn: leapers::pawn_tables(),
            bishop,
            rook,
        }
    }

    /// Process-wide tables, built on first use.
    #[must_use]
    pub fn global() -> &'static AttackTables {
        &GLOBAL_TABLES
    }

    #[inline]
    #[must_use]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    /// Squares a pawn of `color` on `sq` attacks
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.pawn[color.index()][sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn sliding_attacks(&self, sq: Square, slider: Slider, occupancy: Bitboard) -> Bitboard {
        match slider {
            Slider::Bishop => self.bishop.attacks(sq, occupancy),
            Slider::Rook => self.rook.attacks(sq, occupancy),
        }
    }

    #[inline]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupancy) | self.rook.attacks(sq, occupancy)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}
