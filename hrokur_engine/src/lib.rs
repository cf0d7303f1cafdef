//! The Hrókur search engine: material evaluation and an interruptible
//! alpha-beta negamax over the core rules.

pub mod eval;
pub mod handler;
pub mod score;
pub mod search;
pub mod search_limits;
pub mod search_result;
pub mod search_stats;

pub use handler::{NullHandler, SearchHandler, SearchInfo};
pub use score::Score;
pub use search::SearchContext;
pub use search_limits::SearchLimits;
pub use search_result::SearchResult;
pub use search_stats::SearchStats;

use hrokur_core::board::Position;
use hrokur_core::game::RepetitionTable;

/// Searches `position` under `limits` and returns the move to play.
///
/// Convenience wrapper around [`SearchContext`].
pub fn find_best_move(
    position: &Position,
    repetition: &RepetitionTable,
    limits: SearchLimits,
    handler: &mut impl SearchHandler,
) -> SearchResult {
    SearchContext::new(position, repetition, limits, handler).search()
}
