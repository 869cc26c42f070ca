//! Root-parallel search.
//!
//! Root moves are dealt round-robin to the workers. Every worker searches its
//! share on a private clone of the position with its own killer and history
//! tables; the transposition table is the only shared structure.

use std::panic;
use std::thread;

use super::SearchContext;
use crate::eval::Evaluator;
use crate::position::Position;
use crate::types::Move;

/// Best `(score, move)` over all workers' shares of `moves`.
///
/// Ties go to the move that comes first in `moves`, matching the sequential
/// root search.
pub(crate) fn search_root_parallel<E: Evaluator>(
    contexts: &mut [SearchContext<'_, E>],
    pos: &Position,
    moves: &[Move],
    depth: u8,
) -> Option<(i32, Move)> {
    let workers = contexts.len().max(1);
    let shares: Vec<Vec<Move>> = (0..workers)
        .map(|worker| moves.iter().copied().skip(worker).step_by(workers).collect())
        .collect();

    let outcomes: Vec<Option<(i32, Move)>> = thread::scope(|scope| {
        let handles: Vec<_> = contexts
            .iter_mut()
            .zip(&shares)
            .map(|(ctx, share)| {
                let mut local = pos.clone();
                scope.spawn(move || ctx.search_root(&mut local, share, depth))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    let rank = |mv: Move| moves.iter().position(|&m| m == mv).unwrap_or(usize::MAX);
    outcomes
        .into_iter()
        .flatten()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| rank(b.1).cmp(&rank(a.1))))
}
