use std::time::Duration;

use hrokur_core::board::Move;

use crate::score::Score;
use crate::search_stats::SearchStats;

/// The outcome of a completed (or interrupted) search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The move to play. [`None`] only when the root has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` from the root mover's perspective.
    pub score: Score,
    pub stats: SearchStats,
    pub elapsed: Duration,
    /// True when the search was cut short by a stop request, a deadline or
    /// the node budget.
    pub aborted: bool,
}
