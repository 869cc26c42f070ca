use super::Position;
use crate::types::{Bitboard, Color, Piece, Square};

impl Position {
    /// Pieces of `by` that attack `sq` given the current occupancy.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, by: Color) -> Bitboard {
        let tables = self.attack_tables();
        let occ = self.all_occupied;
        let queens = self.pieces(by, Piece::Queen);

        // A pawn of `by` attacks sq iff a pawn of the other color on sq would attack it back.
        (tables.pawn_attacks(sq, by.opponent()) & self.pieces(by, Piece::Pawn))
            | (tables.knight_attacks(sq) & self.pieces(by, Piece::Knight))
            | (tables.king_attacks(sq) & self.pieces(by, Piece::King))
            | (tables.bishop_attacks(sq, occ) & (self.pieces(by, Piece::Bishop) | queens))
            | (tables.rook_attacks(sq, occ) & (self.pieces(by, Piece::Rook) | queens))
    }

    /// Whether any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let tables = self.attack_tables();
        let occ = self.all_occupied;

        if !(tables.pawn_attacks(sq, by.opponent()) & self.pieces(by, Piece::Pawn)).is_empty() {
            return true;
        }
        if !(tables.knight_attacks(sq) & self.pieces(by, Piece::Knight)).is_empty() {
            return true;
        }
        if !(tables.king_attacks(sq) & self.pieces(by, Piece::King)).is_empty() {
            return true;
        }
        let queens = self.pieces(by, Piece::Queen);
        if !(tables.bishop_attacks(sq, occ) & (self.pieces(by, Piece::Bishop) | queens)).is_empty()
        {
            return true;
        }
        !(tables.rook_attacks(sq, occ) & (self.pieces(by, Piece::Rook) | queens)).is_empty()
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Whether `color`'s king is attacked. A side without a king is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Whether the side to move is in check
    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }
}
