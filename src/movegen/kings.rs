use crate::position::Position;
use crate::types::{Move, MoveList, Piece, Square};

impl Position {
    pub(super) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let targets = self.attack_tables().king_attacks(from) & !self.occupied_by(us);
        self.push_targets(from, Piece::King, targets, moves);
        self.generate_castling(from, moves);
    }

    /// Castles need the right, a rook on its home square, empty squares
    /// between king and rook, and no attacked square on the king's path.
    fn generate_castling(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let them = us.opponent();
        let rights = self.castling_rights();
        let base = us.back_rank() * 8;
        let at = |file: u8| Square::from_index(base + file);

        if from != at(4) || !(rights.has(us, true) || rights.has(us, false)) {
            return;
        }
        if self.is_square_attacked(from, them) {
            return;
        }

        let occupied = self.occupied();
        let rooks = self.pieces(us, Piece::Rook);

        if rights.has(us, true)
            && rooks.contains(at(7))
            && [5, 6].iter().all(|&f| !occupied.contains(at(f)))
            && [5, 6].iter().all(|&f| !self.is_square_attacked(at(f), them))
        {
            moves.push(Move::castle(from, at(6)));
        }

        if rights.has(us, false)
            && rooks.contains(at(0))
            && [1, 2, 3].iter().all(|&f| !occupied.contains(at(f)))
            && [3, 2].iter().all(|&f| !self.is_square_attacked(at(f), them))
        {
            moves.push(Move::castle(from, at(2)));
        }
    }
}
