use crate::position::Position;
use crate::types::{Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, captured: Option<Piece>) {
    for piece in PROMOTION_PIECES {
        moves.push(Move::promotion(from, to, piece, captured));
    }
}

impl Position {
    pub(super) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let them = us.opponent();
        let forward: i8 = match us {
            Color::White => 1,
            Color::Black => -1,
        };
        let promotion_rank = us.pawn_promotion_rank();
        let occupied = self.occupied();

        if let Some(one) = from.offset(forward, 0) {
            if !occupied.contains(one) {
                if one.rank() == promotion_rank {
                    push_promotions(moves, from, one, None);
                } else {
                    moves.push(Move::normal(from, one, Piece::Pawn, None));
                    if from.rank() == us.pawn_start_rank() {
                        if let Some(two) = one.offset(forward, 0) {
                            if !occupied.contains(two) {
                                moves.push(Move::double_pawn_push(from, two));
                            }
                        }
                    }
                }
            }
        }

        let attacks = self.attack_tables().pawn_attacks(from, us);
        for to in attacks & self.occupied_by(them) {
            let captured = self.piece_on(to);
            if to.rank() == promotion_rank {
                push_promotions(moves, from, to, captured);
            } else {
                moves.push(Move::normal(from, to, Piece::Pawn, captured));
            }
        }

        if let Some(ep) = self.en_passant() {
            if attacks.contains(ep) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}
