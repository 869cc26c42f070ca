//! Make/undo tests.

use crate::position::Position;
use crate::types::{Color, Move, Piece, Square};

fn find_move(pos: &mut Position, from: Square, to: Square, promotion: Option<Piece>) -> Move {
    pos.generate_legal()
        .iter()
        .copied()
        .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
        .expect("Expected move not found")
}

fn assert_round_trip(fen: &str, from: Square, to: Square, promotion: Option<Piece>) {
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let original = pos.clone();
    let mv = find_move(&mut pos, from, to, promotion);
    pos.make_move(mv);
    assert!(pos.check_consistency().is_ok(), "{:?}", pos.check_consistency());
    pos.undo_move();
    assert_eq!(pos, original, "{mv} did not undo cleanly in {fen}");
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_en_passant_make_unmake() {
    let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    assert_round_trip(fen, Square::E5, Square::F6, None);

    let mut pos = Position::from_fen(fen).unwrap();
    let mv = find_move(&mut pos, Square::E5, Square::F6, None);
    pos.make_move(mv);
    assert_eq!(pos.piece_at(Square::F5), None);
    assert_eq!(pos.piece_at(Square::F6), Some((Color::White, Piece::Pawn)));
    assert_eq!(pos.en_passant(), None);
}

#[test]
fn test_promotion_make_unmake() {
    let fen = "8/P7/8/8/8/8/8/K1k5 w - - 0 1";
    for promotion in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
        assert_round_trip(fen, Square::A7, Square::A8, Some(promotion));
    }

    let mut pos = Position::from_fen(fen).unwrap();
    let mv = find_move(&mut pos, Square::A7, Square::A8, Some(Piece::Knight));
    pos.make_move(mv);
    assert_eq!(pos.piece_at(Square::A8), Some((Color::White, Piece::Knight)));
    assert!(pos.pieces(Color::White, Piece::Pawn).is_empty());
}

#[test]
fn test_capture_promotion_make_unmake() {
    assert_round_trip(
        "1r5k/P7/8/8/8/8/8/K7 w - - 0 1",
        Square::A7,
        Square::B8,
        Some(Piece::Queen),
    );
}

#[test]
fn test_castling_make_unmake() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_round_trip(fen, Square::E1, Square::G1, None);
    assert_round_trip(fen, Square::E1, Square::C1, None);

    let mut pos = Position::from_fen(fen).unwrap();
    let mv = find_move(&mut pos, Square::E1, Square::G1, None);
    pos.make_move(mv);
    assert_eq!(pos.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(pos.piece_at(Square::H1), None);
    assert!(!pos.castling_rights().has(Color::White, true));
    assert!(!pos.castling_rights().has(Color::White, false));
    assert!(pos.castling_rights().has(Color::Black, true));
}

#[test]
fn test_rook_capture_clears_castling_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = find_move(&mut pos, Square::A1, Square::A8, None);
    assert_eq!(mv.captured(), Some(Piece::Rook));
    pos.make_move(mv);
    let rights = pos.castling_rights();
    assert!(!rights.has(Color::White, false));
    assert!(!rights.has(Color::Black, false));
    assert!(rights.has(Color::White, true));
    assert!(rights.has(Color::Black, true));
    assert_eq!(pos.hash(), pos.compute_hash());
}

#[test]
fn test_counters_and_en_passant_target() {
    let mut pos = Position::new();
    pos.play_moves(["g1f3"]).unwrap();
    assert_eq!(pos.halfmove_clock(), 1);
    assert_eq!(pos.fullmove_number(), 1);

    pos.play_moves(["e7e5"]).unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 2);
    assert_eq!(pos.en_passant(), Some(Square::E6));

    pos.play_moves(["b1c3"]).unwrap();
    assert_eq!(pos.en_passant(), None);

    for _ in 0..3 {
        pos.undo_move();
    }
    assert_eq!(pos, Position::new());
}

#[test]
fn test_scoped_move_undoes_on_drop() {
    let mut pos = Position::new();
    let mv = find_move(&mut pos, Square::E2, Square::E4, None);
    {
        let child = pos.scoped(mv);
        assert_eq!(child.side_to_move(), Color::Black);
        assert_eq!(child.last_move(), Some(mv));
    }
    assert_eq!(pos, Position::new());
}

#[test]
fn test_deep_sequence_round_trip() {
    let mut pos = Position::new();
    let moves = [
        "e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8a5", "c6b7", "a5b5", "b7a8n",
        "e7e5", "g1f3", "f8c5", "d2d3", "e8g8", "e1g1",
    ];
    pos.play_moves(moves).unwrap();
    assert!(pos.check_consistency().is_ok());
    assert_eq!(pos.ply(), moves.len());
    for _ in 0..moves.len() {
        pos.undo_move();
        assert!(pos.check_consistency().is_ok());
    }
    assert_eq!(pos, Position::new());
}

#[test]
#[should_panic(expected = "empty move history")]
fn test_undo_without_history_panics() {
    let mut pos = Position::new();
    pos.undo_move();
}
