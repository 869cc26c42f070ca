//! Static evaluation.
//!
//! The search only needs an [`Evaluator`]: a pure, deterministic score of a
//! position from the side to move's point of view. [`MaterialEvaluator`] is
//! the default; any `Fn(&Position) -> i32` closure works too.

use crate::position::Position;
use crate::types::{Bitboard, Color, Piece};

/// Scores positions for the search.
///
/// Positive values favor the side to move. Implementations must be pure
/// functions of the position and stay well inside `±MATE_VALUE`.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, pos: &Position) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32 + Send + Sync,
{
    fn evaluate(&self, pos: &Position) -> i32 {
        self(pos)
    }
}

const ISOLATED_PAWN_PENALTY: i32 = 15;
const DOUBLED_PAWN_PENALTY: i32 = 10;
const MOBILITY_WEIGHT: i32 = 2;

/// Material, pawn structure and minor-piece mobility.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// Evaluation of one side, in centipawns.
    fn side_score(pos: &Position, color: Color) -> i32 {
        let material: i32 = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .into_iter()
            .map(|piece| pos.pieces(color, piece).popcount() as i32 * piece.value())
            .sum();
        material - Self::pawn_structure_penalty(pos.pieces(color, Piece::Pawn))
            + MOBILITY_WEIGHT * Self::minor_mobility(pos, color)
    }

    fn pawn_structure_penalty(pawns: Bitboard) -> i32 {
        let mut penalty = 0;
        for file in 0..8u8 {
            let on_file = (pawns & Bitboard::file_mask(file)).popcount() as i32;
            if on_file == 0 {
                continue;
            }
            if on_file > 1 {
                penalty += DOUBLED_PAWN_PENALTY * (on_file - 1);
            }
            let mut neighbours = Bitboard::EMPTY;
            if file > 0 {
                neighbours |= Bitboard::file_mask(file - 1);
            }
            if file < 7 {
                neighbours |= Bitboard::file_mask(file + 1);
            }
            if (pawns & neighbours).is_empty() {
                penalty += ISOLATED_PAWN_PENALTY * on_file;
            }
        }
        penalty
    }

    /// Squares reachable by knights and bishops, own pieces excluded.
    fn minor_mobility(pos: &Position, color: Color) -> i32 {
        let tables = pos.attack_tables();
        let own = pos.occupied_by(color);
        let occupied = pos.occupied();
        let knights: u32 = pos
            .pieces(color, Piece::Knight)
            .iter()
            .map(|sq| (tables.knight_attacks(sq) & !own).popcount())
            .sum();
        let bishops: u32 = pos
            .pieces(color, Piece::Bishop)
            .iter()
            .map(|sq| (tables.bishop_attacks(sq, occupied) & !own).popcount())
            .sum();
        (knights + bishops) as i32
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        let us = pos.side_to_move();
        Self::side_score(pos, us) - Self::side_score(pos, us.opponent())
    }
}
