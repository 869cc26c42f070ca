use crate::position::Position;
use crate::types::Move;

impl Position {
    /// Number of leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_legal();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in &moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }

        nodes
    }

    /// Perft split by root move, in generation order.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_legal();
        moves
            .iter()
            .map(|&mv| {
                let mut child = self.scoped(mv);
                (mv, child.perft(depth.saturating_sub(1)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_sums_to_perft() {
        let mut pos = Position::new();
        let divide = pos.perft_divide(3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn divide_at_depth_one_counts_each_move_once() {
        let mut pos = Position::new();
        assert!(pos.perft_divide(1).iter().all(|&(_, n)| n == 1));
    }
}
