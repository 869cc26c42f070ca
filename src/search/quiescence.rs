use super::move_order::mvv_lva;
use super::{SearchContext, INFINITY, MATE_VALUE};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::types::{ScoredMoveList, MAX_PLY};

impl<E: Evaluator> SearchContext<'_, E> {
    /// Capture search below the horizon.
    ///
    /// Out of check the side to move may stand pat on the static score. In
    /// check every legal evasion is searched and having none is mate. The
    /// `quiescence_depth` cap bounds the extension.
    pub(crate) fn quiescence(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        qdepth: u8,
    ) -> i32 {
        self.nodes += 1;
        if qdepth >= self.params.quiescence_depth || ply >= MAX_PLY - 1 {
            return self.evaluate(pos);
        }

        let (moves, mut best_score) = if pos.in_check() {
            let evasions = pos.generate_legal();
            if evasions.is_empty() {
                return -(MATE_VALUE - ply as i32);
            }
            (evasions, -INFINITY)
        } else {
            let stand_pat = self.evaluate(pos);
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
            (pos.generate_captures(), stand_pat)
        };

        let mut ordered = ScoredMoveList::new();
        for &mv in &moves {
            ordered.push(mv, mvv_lva(mv));
        }

        for i in 0..ordered.len() {
            let Some(scored) = ordered.pick_best(i) else {
                break;
            };
            let score = {
                let mut child = pos.scoped(scored.mv);
                -self.quiescence(&mut child, -beta, -alpha, ply + 1, qdepth + 1)
            };
            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::super::{SearchParams, INFINITY, MATE_VALUE};
    use super::*;
    use crate::eval::MaterialEvaluator;
    use crate::tt::TranspositionTable;

    fn run(fen: &str, params: &SearchParams) -> i32 {
        let tt = TranspositionTable::with_entries(1024);
        let mut ctx = SearchContext::new(&MaterialEvaluator, &tt, params);
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        let score = ctx.quiescence(&mut pos, -INFINITY, INFINITY, 0, 0);
        assert_eq!(pos, before);
        score
    }

    #[test]
    fn quiet_position_returns_stand_pat() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(
            run(fen, &SearchParams::default()),
            MaterialEvaluator.evaluate(&pos)
        );
    }

    #[test]
    fn resolves_hanging_pieces() {
        // White to move wins the undefended rook
        let fen = "4k3/8/8/3r4/8/8/3Q4/4K3 w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        let stand_pat = MaterialEvaluator.evaluate(&pos);
        assert!(run(fen, &SearchParams::default()) > stand_pat + 400);
    }

    #[test]
    fn recapture_is_seen() {
        // Qxd5 loses the queen to exd5, so stand pat is best
        let fen = "4k3/8/4p3/3r4/8/8/3Q4/4K3 w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(
            run(fen, &SearchParams::default()),
            MaterialEvaluator.evaluate(&pos)
        );
    }

    #[test]
    fn mate_in_check_without_evasions() {
        let fen = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";
        assert_eq!(run(fen, &SearchParams::default()), -MATE_VALUE);
    }

    #[test]
    fn depth_cap_stops_at_static_score() {
        let fen = "4k3/8/8/3r4/8/8/3Q4/4K3 w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        let params = SearchParams {
            quiescence_depth: 0,
            ..SearchParams::default()
        };
        assert_eq!(run(fen, &params), MaterialEvaluator.evaluate(&pos));
    }
}
