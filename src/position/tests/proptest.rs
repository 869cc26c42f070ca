//! Property-based tests using proptest.

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

use crate::position::Position;
use crate::tt::{BoundType, TranspositionTable};
use crate::types::{Move, Piece, Square};

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves, returning how many were made.
fn random_playout(pos: &mut Position, rng: &mut StdRng, num_moves: usize) -> usize {
    for played in 0..num_moves {
        let moves = pos.generate_legal();
        if moves.is_empty() {
            return played;
        }
        let idx = rng.gen_range(0..moves.len());
        pos.make_move(moves[idx]);
    }
    num_moves
}

proptest! {
    /// Property: make_move followed by undo_move restores the position exactly
    #[test]
    fn prop_make_undo_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = pos.clone();
        let initial_fen = pos.to_fen();

        let played = random_playout(&mut pos, &mut rng, num_moves);
        for _ in 0..played {
            pos.undo_move();
        }

        prop_assert_eq!(pos.hash(), initial.hash());
        prop_assert_eq!(pos.to_fen(), initial_fen);
        prop_assert_eq!(pos, initial);
    }

    /// Property: the incremental hash always equals the from-scratch hash
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            pos.make_move(mv);
            prop_assert_eq!(pos.hash(), pos.zobrist_keys().from_scratch(&pos));
            prop_assert!(pos.check_consistency().is_ok());
        }
    }

    /// Property: FEN round-trip preserves the position's semantic state
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut pos, &mut rng, num_moves);

        let fen = pos.to_fen();
        let restored = Position::from_fen(&fen).unwrap();

        prop_assert_eq!(restored.hash(), pos.hash());
        prop_assert_eq!(restored.side_to_move(), pos.side_to_move());
        prop_assert_eq!(restored.castling_rights(), pos.castling_rights());
        prop_assert_eq!(restored.en_passant(), pos.en_passant());
        prop_assert_eq!(restored.to_fen(), fen);
    }

    /// Property: legal moves never leave the mover's king in check
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy()) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..12 {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }

            let us = pos.side_to_move();
            for &mv in &moves {
                let child = pos.scoped(mv);
                prop_assert!(!child.is_in_check(us), "Legal move left king in check: {:?}", mv);
            }

            // Legal moves are exactly the pseudo-legal moves that pass is_legal
            let pseudo = pos.generate_pseudo_legal();
            let filtered = pseudo.iter().filter(|&&mv| pos.is_legal(mv)).count();
            prop_assert_eq!(filtered, moves.len());

            let mv = moves[rng.gen_range(0..moves.len())];
            pos.make_move(mv);
        }
    }

    /// Property: a stored exact entry short-circuits any window at its depth or shallower
    #[test]
    fn prop_exact_entry_is_usable(
        fingerprint in any::<u64>(),
        depth in 0u8..64,
        score in -20_000i32..20_000,
        alpha in -25_000i32..0,
        beta in 1i32..25_000,
    ) {
        let tt = TranspositionTable::with_entries(1 << 10);
        let mv = Move::normal(Square::E2, Square::E4, Piece::Pawn, None);
        tt.store(fingerprint, depth, score, BoundType::Exact, Some(mv));

        let entry = tt.probe(fingerprint).unwrap();
        prop_assert_eq!(entry.usable_score(depth, alpha, beta), Some(score));
        prop_assert_eq!(entry.usable_score(depth / 2, alpha, beta), Some(score));
        prop_assert_eq!(entry.best_move, Some(mv));
        prop_assert_eq!(entry.usable_score(depth + 1, alpha, beta), None);
    }
}
