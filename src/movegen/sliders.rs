use crate::attack_tables::Slider;
use crate::position::Position;
use crate::types::{MoveList, Piece, Square};

impl Position {
    pub(super) fn generate_slider_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        let tables = self.attack_tables();
        let occupied = self.occupied();
        let attacks = match piece {
            Piece::Bishop => tables.sliding_attacks(from, Slider::Bishop, occupied),
            Piece::Rook => tables.sliding_attacks(from, Slider::Rook, occupied),
            Piece::Queen => tables.queen_attacks(from, occupied),
            _ => unreachable!("{piece:?} is not a slider"),
        };
        let targets = attacks & !self.occupied_by(self.side_to_move());
        self.push_targets(from, piece, targets, moves);
    }
}
