use std::time::Duration;

use hrokur_core::board::Move;

use crate::score::Score;

/// A snapshot of search progress, produced once per completed iteration.
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: Score,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: Vec<Move>,
}

/// The seam between a running search and its caller.
///
/// The search polls [`should_stop`](Self::should_stop) between root moves
/// and periodically at interior nodes; a `true` return ends the search with
/// the best move found so far. The UCI worker's implementation drains its
/// command queue here, which is also what lets `isready` be answered while
/// a search is running.
pub trait SearchHandler {
    fn should_stop(&mut self) -> bool {
        false
    }

    fn report(&mut self, _info: &SearchInfo) {}
}

/// Handler that never interrupts and discards progress reports.
pub struct NullHandler;

impl SearchHandler for NullHandler {}
