use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::move_order::order_moves;
use super::parallel::search_root_parallel;
use super::{
    is_mate_score, mate_in, SearchContext, SearchEngine, SearchIterationInfo, SearchLimits,
    SearchResult, DRAW_SCORE, MATE_VALUE,
};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::tt::BoundType;
use crate::types::{Move, MoveList};

impl<E: Evaluator> SearchEngine<E> {
    /// Iterative deepening from depth 1 up to `limits.max_depth`.
    ///
    /// Only completed iterations are reported. The time budget is checked
    /// between iterations: none starts once it is spent, and an iteration
    /// that finishes past it is discarded unless it is depth 1. The search
    /// also stops once an iteration proves a forced mate that fits within its
    /// depth.
    ///
    /// `pos` is restored before returning.
    pub fn find_best_move(&self, pos: &mut Position, limits: SearchLimits) -> SearchResult {
        let start = Instant::now();
        self.tt.new_search();

        let legal = pos.generate_legal();
        if legal.is_empty() {
            let score = if pos.in_check() { -MATE_VALUE } else { DRAW_SCORE };
            info!("no legal moves at the root, score {score}");
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
                pv: Vec::new(),
                elapsed: start.elapsed(),
            };
        }

        let workers = self.params.threads.clamp(1, legal.len());
        let mut contexts: Vec<SearchContext<'_, E>> = (0..workers)
            .map(|_| SearchContext::new(&self.evaluator, &self.tt, &self.params))
            .collect();

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: Vec::new(),
            elapsed: Duration::ZERO,
        };

        for depth in 1..=limits.max_depth {
            if depth > 1 && limits.is_spent(start.elapsed()) {
                debug!("time budget spent, not starting depth {depth}");
                break;
            }

            for ctx in &mut contexts {
                ctx.begin_iteration();
            }
            let root_moves = contexts[0].root_order(&legal, result.best_move);

            let outcome = if workers > 1 {
                search_root_parallel(&mut contexts, pos, &root_moves, depth)
            } else {
                contexts[0].search_root(pos, &root_moves, depth)
            };
            let nodes: u64 = contexts.iter().map(|ctx| ctx.nodes).sum();
            let elapsed = start.elapsed();

            let Some((score, best_move)) = outcome else {
                break;
            };
            if depth > 1 && limits.is_spent(elapsed) {
                warn!(
                    "discarding depth {depth}: finished after {elapsed:?}, budget {:?}; keeping depth {}",
                    limits.time_budget.unwrap_or_default(),
                    result.depth
                );
                result.nodes = nodes;
                break;
            }

            self.tt
                .store(pos.hash(), depth, score, BoundType::Exact, Some(best_move));
            result = SearchResult {
                best_move: Some(best_move),
                score,
                depth,
                nodes,
                pv: self.extract_pv(pos, best_move, usize::from(depth)),
                elapsed,
            };
            self.report(&result);

            // Quiescence can prove a mate past the nominal depth, and a deeper
            // iteration may still find a shorter one
            if is_mate_score(score) && MATE_VALUE - score.abs() <= i32::from(depth) {
                break;
            }
        }

        result.elapsed = start.elapsed();
        if let Some(best_move) = result.best_move {
            info!(
                "best move {best_move} score {} depth {} nodes {} in {:?}",
                result.score, result.depth, result.nodes, result.elapsed
            );
        }
        result
    }

    /// Walk transposition-table best moves from the root, starting with
    /// `best_move`.
    ///
    /// Each move is checked for legality and the walk stops on a repeated
    /// position, so a stale or colliding entry cannot produce a bogus line.
    pub(crate) fn extract_pv(&self, pos: &mut Position, best_move: Move, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen = vec![pos.hash()];
        let mut next = Some(best_move);

        while let Some(mv) = next {
            pos.make_move(mv);
            pv.push(mv);
            if pv.len() >= max_len || seen.contains(&pos.hash()) {
                break;
            }
            seen.push(pos.hash());

            next = self
                .tt
                .probe(pos.hash())
                .and_then(|entry| entry.best_move)
                .and_then(|hint| pos.generate_legal().iter().copied().find(|&m| m == hint));
        }

        for _ in 0..pv.len() {
            pos.undo_move();
        }
        pv
    }

    fn report(&self, result: &SearchResult) {
        let pv = result
            .pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        debug!(
            "depth {} score {} nodes {} time {:?} pv {}",
            result.depth, result.score, result.nodes, result.elapsed, pv
        );

        if let Some(callback) = &self.info_callback {
            let time_ms = result.elapsed.as_millis() as u64;
            let info = SearchIterationInfo {
                depth: result.depth,
                score: result.score,
                mate_in: mate_in(result.score),
                nodes: result.nodes,
                nps: result.nodes * 1000 / time_ms.max(1),
                time_ms,
                hashfull: self.tt.hashfull_per_mille(),
                pv,
            };
            callback(&info);
        }
    }
}

impl<E: Evaluator> SearchContext<'_, E> {
    /// Root moves best-first: the previous iteration's best move leads.
    fn root_order(&self, legal: &MoveList, previous_best: Option<Move>) -> Vec<Move> {
        let mut scored = order_moves(legal, previous_best, &self.killers, &self.history, 0);
        (0..scored.len())
            .filter_map(|i| scored.pick_best(i))
            .map(|scored| scored.mv)
            .collect()
    }
}
