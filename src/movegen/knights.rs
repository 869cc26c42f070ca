use crate::position::Position;
use crate::types::{MoveList, Piece, Square};

impl Position {
    pub(super) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let targets =
            self.attack_tables().knight_attacks(from) & !self.occupied_by(self.side_to_move());
        self.push_targets(from, Piece::Knight, targets, moves);
    }
}
