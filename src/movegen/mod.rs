//! Move generation.
//!
//! Pseudo-legal moves come from one routine per piece kind. Legality is
//! decided by playing each move and checking that the mover's king is not
//! attacked afterwards.

mod kings;
mod knights;
mod pawns;
mod sliders;

use crate::position::Position;
use crate::types::{Bitboard, Move, MoveList, Piece, Square};

impl Position {
    /// All moves obeying piece movement rules, ignoring whether the
    /// mover's king is left in check.
    #[must_use]
    pub fn generate_pseudo_legal(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move();
        for piece in Piece::ALL {
            for from in self.pieces(us, piece) {
                self.generate_piece_moves(from, piece, &mut moves);
            }
        }
        moves
    }

    fn generate_piece_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from, moves),
            Piece::Knight => self.generate_knight_moves(from, moves),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                self.generate_slider_moves(from, piece, moves);
            }
            Piece::King => self.generate_king_moves(from, moves),
        }
    }

    /// Push a move to every square in `targets`, capturing whatever stands there.
    fn push_targets(&self, from: Square, piece: Piece, targets: Bitboard, moves: &mut MoveList) {
        for to in targets {
            moves.push(Move::normal(from, to, piece, self.piece_on(to)));
        }
    }

    /// Whether the pseudo-legal `mv` keeps the mover's own king safe.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let us = self.side_to_move();
        self.make_move(mv);
        let legal = !self.is_in_check(us);
        self.undo_move();
        legal
    }

    /// All legal moves. Empty means checkmate when in check, stalemate otherwise.
    pub fn generate_legal(&mut self) -> MoveList {
        let mut moves = self.generate_pseudo_legal();
        moves.retain(|&mv| self.is_legal(mv));
        moves
    }

    /// Legal captures, en passant included, for quiescence search.
    pub fn generate_captures(&mut self) -> MoveList {
        let mut moves = self.generate_pseudo_legal();
        moves.retain(|&mv| mv.is_capture() && self.is_legal(mv));
        moves
    }
}
