use std::ops::{Deref, DerefMut};

use super::{Position, UndoRecord};
use crate::types::{Color, Move, MoveKind, Piece, Square};

/// Rook origin and destination for a castle whose king lands on `king_to`.
#[inline]
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let base = king_to.rank() * 8;
    if king_to.file() == 6 {
        (Square::from_index(base + 7), Square::from_index(base + 5))
    } else {
        (Square::from_index(base), Square::from_index(base + 3))
    }
}

/// Square of the pawn taken by an en-passant capture.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square::from_index(mv.from().rank() * 8 + mv.to().file())
}

impl Position {
    /// Apply `mv` in place and push an undo record.
    ///
    /// `mv` must come from this position's move generator. Every call must be
    /// paired with exactly one later [`Position::undo_move`].
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opponent();
        let keys = self.zobrist_keys();

        debug_assert!(
            self.pieces(us, mv.piece()).contains(mv.from()),
            "make_move: no {us} {:?} on {} for {mv}",
            mv.piece(),
            mv.from()
        );

        self.history.push(UndoRecord {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });

        let mut hash = self.hash;

        if let Some(ep) = self.en_passant.take() {
            hash ^= keys.en_passant(ep.file());
        }

        match (mv.kind(), mv.captured()) {
            (MoveKind::EnPassant, _) => {
                let victim = en_passant_victim(mv);
                self.remove_piece(victim, them, Piece::Pawn);
                hash ^= keys.piece(them, Piece::Pawn, victim);
            }
            (_, Some(captured)) => {
                debug_assert_eq!(self.piece_at(mv.to()), Some((them, captured)));
                self.remove_piece(mv.to(), them, captured);
                hash ^= keys.piece(them, captured, mv.to());
            }
            (_, None) => {}
        }

        let placed = mv.promotion_piece().unwrap_or(mv.piece());
        self.remove_piece(mv.from(), us, mv.piece());
        hash ^= keys.piece(us, mv.piece(), mv.from());
        self.set_piece(mv.to(), us, placed);
        hash ^= keys.piece(us, placed, mv.to());

        match mv.kind() {
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to());
                self.remove_piece(rook_from, us, Piece::Rook);
                self.set_piece(rook_to, us, Piece::Rook);
                hash ^= keys.piece(us, Piece::Rook, rook_from) ^ keys.piece(us, Piece::Rook, rook_to);
            }
            MoveKind::DoublePawnPush => {
                let ep = Square::from_index(((mv.from().index() + mv.to().index()) / 2) as u8);
                self.en_passant = Some(ep);
                hash ^= keys.en_passant(ep.file());
            }
            _ => {}
        }

        let old_rights = self.castling;
        self.castling.clear_for_square(mv.from());
        self.castling.clear_for_square(mv.to());
        if old_rights != self.castling {
            hash ^= keys.castling(old_rights) ^ keys.castling(self.castling);
        }

        if mv.piece() == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
        hash ^= keys.black_to_move();
        self.hash = hash;
    }

    /// Revert the most recent [`Position::make_move`].
    ///
    /// # Panics
    ///
    /// Panics if there is no move to undo.
    pub fn undo_move(&mut self) {
        let Some(record) = self.history.pop() else {
            panic!("undo_move called with an empty move history");
        };
        let mv = record.mv;
        let them = self.side_to_move;
        let us = them.opponent();

        let placed = mv.promotion_piece().unwrap_or(mv.piece());
        self.remove_piece(mv.to(), us, placed);
        self.set_piece(mv.from(), us, mv.piece());

        match (mv.kind(), mv.captured()) {
            (MoveKind::EnPassant, _) => {
                self.set_piece(en_passant_victim(mv), them, Piece::Pawn);
            }
            (MoveKind::Castle, _) => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to());
                self.remove_piece(rook_to, us, Piece::Rook);
                self.set_piece(rook_from, us, Piece::Rook);
            }
            (_, Some(captured)) => self.set_piece(mv.to(), them, captured),
            (_, None) => {}
        }

        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = us;
        self.castling = record.castling;
        self.en_passant = record.en_passant;
        self.halfmove_clock = record.halfmove_clock;
        self.hash = record.hash;
    }

    /// Apply `mv` and return a guard that undoes it when dropped.
    ///
    /// The guard dereferences to the position, so a search can recurse through
    /// it and every exit path, early returns included, reverts the move.
    pub fn scoped(&mut self, mv: Move) -> ScopedMove<'_> {
        self.make_move(mv);
        ScopedMove { pos: self }
    }
}

/// A move applied to a [`Position`] for the lifetime of the guard.
///
/// Calling `undo_move` through the guard unbalances it; the drop would then
/// revert one move too many.
pub struct ScopedMove<'a> {
    pos: &'a mut Position,
}

impl Deref for ScopedMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.pos.undo_move();
    }
}
