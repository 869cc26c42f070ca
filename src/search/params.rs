use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deepest iteration `find_best_move` will start.
pub const MAX_SEARCH_DEPTH: u8 = 64;

/// Engine-wide search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    /// Transposition table size in megabytes
    pub tt_size_mb: usize,
    /// Maximum plies of capture search below the nominal horizon
    pub quiescence_depth: u8,
    /// Right shift applied to every history score when it decays
    pub history_decay_shift: u32,
    /// A history score above this triggers a decay of the whole table
    pub history_max: i32,
    /// Root workers; 1 searches on the calling thread
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            tt_size_mb: 16,
            quiescence_depth: 8,
            history_decay_shift: 2,
            history_max: 16_384,
            threads: 1,
        }
    }
}

/// Per-call bounds for [`SearchEngine::find_best_move`](super::SearchEngine::find_best_move).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub time_budget: Option<Duration>,
}

impl SearchLimits {
    #[must_use]
    pub fn new(max_depth: u8, time_budget: Option<Duration>) -> Self {
        SearchLimits {
            max_depth: max_depth.clamp(1, MAX_SEARCH_DEPTH),
            time_budget,
        }
    }

    /// Search to `max_depth` with no time limit.
    #[must_use]
    pub fn depth(max_depth: u8) -> Self {
        Self::new(max_depth, None)
    }

    /// Deepen until `budget` is spent.
    #[must_use]
    pub fn time(budget: Duration) -> Self {
        Self::new(MAX_SEARCH_DEPTH, Some(budget))
    }

    pub(crate) fn is_spent(&self, elapsed: Duration) -> bool {
        self.time_budget.is_some_and(|budget| elapsed >= budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_depth() {
        assert_eq!(SearchLimits::depth(0).max_depth, 1);
        assert_eq!(SearchLimits::depth(200).max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(SearchLimits::time(Duration::from_millis(5)).max_depth, MAX_SEARCH_DEPTH);
    }

    #[test]
    fn budget_is_spent_only_when_set() {
        let open = SearchLimits::depth(4);
        assert!(!open.is_spent(Duration::from_secs(3600)));

        let timed = SearchLimits::new(4, Some(Duration::from_millis(100)));
        assert!(!timed.is_spent(Duration::from_millis(99)));
        assert!(timed.is_spent(Duration::from_millis(100)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn params_deserialize_with_defaults() {
        let params: SearchParams = serde_json::from_str(r#"{"threads": 4}"#).unwrap();
        assert_eq!(params.threads, 4);
        assert_eq!(params.tt_size_mb, SearchParams::default().tt_size_mb);
    }
}
