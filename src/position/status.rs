//! Game-over detection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Position;
use crate::types::{Bitboard, Color, Piece};

/// Outcome of a position. Terminal states are ordinary values, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    #[must_use]
    pub fn is_draw(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Checkmate)
    }
}

impl Position {
    /// Classify the position. Checkmate and stalemate take precedence over
    /// the draw rules.
    pub fn status(&mut self) -> GameStatus {
        if self.generate_legal().is_empty() {
            return if self.in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if self.halfmove_clock >= 100 {
            return GameStatus::FiftyMoveRule;
        }
        if self.repetition_count() >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
        if self.has_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }
        GameStatus::Ongoing
    }

    /// How many times the current position has occurred, this one included.
    ///
    /// Only the undo stack since the last capture or pawn move is scanned, so
    /// positions before [`Position::clear_history`] or a FEN load are not seen.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        // Same side to move only: every second record going back.
        1 + self
            .history
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .filter(|record| record.hash == self.hash)
            .count()
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square color.
    #[must_use]
    pub fn has_insufficient_material(&self) -> bool {
        let heavy_or_pawn = [Piece::Pawn, Piece::Rook, Piece::Queen]
            .into_iter()
            .any(|piece| Color::BOTH.into_iter().any(|c| !self.pieces(c, piece).is_empty()));
        if heavy_or_pawn {
            return false;
        }

        let knights = self.pieces(Color::White, Piece::Knight) | self.pieces(Color::Black, Piece::Knight);
        let bishops = self.pieces(Color::White, Piece::Bishop) | self.pieces(Color::Black, Piece::Bishop);
        let minors = knights.popcount() + bishops.popcount();

        if minors <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & Bitboard::DARK_SQUARES).is_empty())
    }
}
