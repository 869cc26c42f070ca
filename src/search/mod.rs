//! Iterative-deepening alpha-beta search.
//!
//! [`SearchEngine`] owns the shared transposition table and the evaluator.
//! Each search builds one [`SearchContext`] per worker holding the private
//! killer and history tables; the position is mutated in place through
//! [`Position::scoped`] so every child is undone on every exit path.

mod alphabeta;
mod iterative;
mod move_order;
mod parallel;
pub mod params;
mod quiescence;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::eval::{Evaluator, MaterialEvaluator};
use crate::position::Position;
use crate::tt::TranspositionTable;
use crate::types::{Move, MAX_PLY};

use self::move_order::{HistoryTable, KillerTable};
pub use self::params::{SearchLimits, SearchParams, MAX_SEARCH_DEPTH};

/// Score of delivering mate at the root; mate at ply `p` scores `MATE_VALUE - p`.
pub const MATE_VALUE: i32 = 30_000;
/// Scores at or beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_VALUE - MAX_PLY as i32;
pub const DRAW_SCORE: i32 = 0;
pub(crate) const INFINITY: i32 = MATE_VALUE + 1;

#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Full moves to mate from a mate score; negative when the side to move is
/// being mated.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    if score > 0 {
        Some((MATE_VALUE - score + 1) / 2)
    } else {
        Some(-(MATE_VALUE + score) / 2)
    }
}

/// Convert a root-relative mate score to node-relative form for storage.
#[inline]
pub(crate) fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`].
#[inline]
pub(crate) fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score - ply
    } else if score <= -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

/// Outcome of [`SearchEngine::find_best_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest completed iteration.
    pub depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub elapsed: Duration,
}

/// Progress report passed to the info callback after each completed iteration.
#[derive(Clone, Debug)]
pub struct SearchIterationInfo {
    pub depth: u8,
    pub score: i32,
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub hashfull: u32,
    pub pv: String,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Per-worker search state.
pub(crate) struct SearchContext<'a, E: Evaluator> {
    evaluator: &'a E,
    tt: &'a TranspositionTable,
    params: &'a SearchParams,
    killers: KillerTable,
    history: HistoryTable,
    nodes: u64,
}

impl<'a, E: Evaluator> SearchContext<'a, E> {
    pub(crate) fn new(evaluator: &'a E, tt: &'a TranspositionTable, params: &'a SearchParams) -> Self {
        SearchContext {
            evaluator,
            tt,
            params,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
        }
    }

    /// Prepare the ordering tables for the next iteration.
    pub(crate) fn begin_iteration(&mut self) {
        self.history.decay(self.params.history_decay_shift);
    }

    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        self.evaluator.evaluate(pos)
    }
}

/// The search driver.
pub struct SearchEngine<E: Evaluator = MaterialEvaluator> {
    evaluator: E,
    params: SearchParams,
    tt: Arc<TranspositionTable>,
    info_callback: Option<SearchInfoCallback>,
}

impl SearchEngine<MaterialEvaluator> {
    /// Engine with the default evaluator and parameters.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MaterialEvaluator, SearchParams::default())
    }
}

impl Default for SearchEngine<MaterialEvaluator> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E: Evaluator> SearchEngine<E> {
    /// # Panics
    ///
    /// Panics if `params.tt_size_mb` is too small to hold one table entry.
    #[must_use]
    pub fn new(evaluator: E, params: SearchParams) -> Self {
        let tt = Arc::new(TranspositionTable::new(params.tt_size_mb));
        Self::with_table(evaluator, params, tt)
    }

    /// Engine reusing an existing transposition table.
    #[must_use]
    pub fn with_table(evaluator: E, params: SearchParams, tt: Arc<TranspositionTable>) -> Self {
        SearchEngine {
            evaluator,
            params,
            tt,
            info_callback: None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    #[must_use]
    pub fn tt(&self) -> &Arc<TranspositionTable> {
        &self.tt
    }

    pub fn set_info_callback(&mut self, callback: SearchInfoCallback) {
        self.info_callback = Some(callback);
    }

    pub fn clear_info_callback(&mut self) {
        self.info_callback = None;
    }

    /// Forget everything learned in earlier searches.
    pub fn clear_tt(&self) {
        self.tt.clear();
    }

    /// Alpha-beta value of `pos` searched to exactly `depth` plies, with
    /// quiescence at the horizon. Fresh ordering tables; the transposition
    /// table is shared with other searches of this engine.
    pub fn search_fixed_depth(&self, pos: &mut Position, depth: u8) -> i32 {
        let mut ctx = SearchContext::new(&self.evaluator, &self.tt, &self.params);
        ctx.alpha_beta(pos, depth, -INFINITY, INFINITY, 0)
    }
}

impl<E: Evaluator> fmt::Debug for SearchEngine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("params", &self.params)
            .field("tt_capacity", &self.tt.capacity())
            .field("info_callback", &self.info_callback.is_some())
            .finish_non_exhaustive()
    }
}
