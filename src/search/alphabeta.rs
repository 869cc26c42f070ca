use super::move_order::order_moves;
use super::{score_from_tt, score_to_tt, SearchContext, DRAW_SCORE, INFINITY, MATE_VALUE};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::tt::BoundType;
use crate::types::{Move, MAX_PLY};

impl<E: Evaluator> SearchContext<'_, E> {
    /// Negamax alpha-beta; scores are from the side to move's point of view.
    pub(crate) fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> i32 {
        if depth == 0 || ply >= MAX_PLY - 1 {
            return self.quiescence(pos, alpha, beta, ply, 0);
        }
        self.nodes += 1;

        let alpha_orig = alpha;
        let hash = pos.hash();
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            // score_to_tt is strictly increasing, so the window can be
            // compared in stored form.
            let window = (score_to_tt(alpha, ply), score_to_tt(beta, ply));
            if ply > 0 {
                if let Some(score) = entry.usable_score(depth, window.0, window.1) {
                    return score_from_tt(score, ply);
                }
            }
        }

        let moves = pos.generate_legal();
        if moves.is_empty() {
            return if pos.in_check() {
                -(MATE_VALUE - ply as i32)
            } else {
                DRAW_SCORE
            };
        }

        let mut ordered = order_moves(&moves, tt_move, &self.killers, &self.history, ply);
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for i in 0..ordered.len() {
            let Some(scored) = ordered.pick_best(i) else {
                break;
            };
            let mv = scored.mv;
            let score = {
                let mut child = pos.scoped(mv);
                -self.alpha_beta(&mut child, depth - 1, -beta, -alpha, ply + 1)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if mv.is_quiet() {
                    self.killers.update(ply, mv);
                    self.history.reward(
                        mv,
                        depth,
                        self.params.history_max,
                        self.params.history_decay_shift,
                    );
                }
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            BoundType::UpperBound
        } else if best_score >= beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        };
        self.tt
            .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);
        best_score
    }

    /// Search the given root moves, in order, with a full window.
    ///
    /// Returns the best score and move; ties go to the earlier move. Nothing
    /// is stored for the root itself since `moves` may be a subset.
    pub(crate) fn search_root(
        &mut self,
        pos: &mut Position,
        moves: &[Move],
        depth: u8,
    ) -> Option<(i32, Move)> {
        self.nodes += 1;
        let mut alpha = -INFINITY;
        let mut best: Option<(i32, Move)> = None;
        for &mv in moves {
            let score = {
                let mut child = pos.scoped(mv);
                -self.alpha_beta(&mut child, depth.saturating_sub(1), -INFINITY, -alpha, 1)
            };
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, mv));
            }
            alpha = alpha.max(score);
        }
        best
    }
}
