//! Search driver: iterative deepening over an alpha-beta negamax.

mod negamax;

use std::time::Instant;

use hrokur_core::board::{Move, Position, UciMove};
use hrokur_core::game::RepetitionTable;
use hrokur_core::rules;

use crate::handler::{SearchHandler, SearchInfo};
use crate::score::Score;
use crate::search_limits::SearchLimits;
use crate::search_result::SearchResult;
use crate::search_stats::SearchStats;

/// How many nodes pass between clock/handler polls at interior nodes.
/// Root moves poll unconditionally. Sized to keep stop latency well under
/// 50ms at this engine's node rate.
const POLL_INTERVAL_NODES: u64 = 512;

/// Owns everything one search needs: a copy of the root position, a copy
/// of the game's repetition table to speculate on, the limits, and the
/// caller's [`SearchHandler`].
pub struct SearchContext<'a, H> {
    root: Position,
    repetition: RepetitionTable,
    limits: SearchLimits,
    start: Instant,
    deadline: Option<Instant>,
    stats: SearchStats,
    stopped: bool,
    handler: &'a mut H,
}

impl<'a, H: SearchHandler> SearchContext<'a, H> {
    pub fn new(
        position: &Position,
        repetition: &RepetitionTable,
        limits: SearchLimits,
        handler: &'a mut H,
    ) -> Self {
        let start = Instant::now();
        let deadline = limits.move_time.map(|budget| start + budget);

        Self {
            root: position.clone(),
            repetition: repetition.clone(),
            limits,
            start,
            deadline,
            stats: SearchStats::default(),
            stopped: false,
            handler,
        }
    }

    /// Runs the search to completion or interruption.
    pub fn search(mut self) -> SearchResult {
        let root_moves = self.root_moves();

        if root_moves.is_empty() {
            // Terminal root: checkmated or stalemated (or an empty
            // searchmoves intersection). There is nothing to play.
            let score = if rules::is_in_check(&self.root) {
                Score::mated_in(0)
            } else {
                Score::DRAW
            };
            return self.finish(None, score);
        }

        let mut best_move = None;
        let mut best_score = -Score::INF;

        for depth in 1..=self.limits.effective_depth() {
            match self.search_root(&root_moves, depth) {
                Some((m, score)) => {
                    best_move = Some(m);
                    best_score = score;
                    self.stats.depth = depth;

                    let info = SearchInfo {
                        depth,
                        score,
                        nodes: self.stats.nodes,
                        elapsed: self.start.elapsed(),
                        pv: vec![m],
                    };
                    self.handler.report(&info);

                    // A forced mate within the horizon cannot be improved
                    // by searching deeper.
                    if let Some(plies) = score.mate_distance_plies() {
                        if plies.unsigned_abs() <= depth {
                            break;
                        }
                    }
                }
                // Interrupted mid-iteration: the previous iteration's best
                // move stands.
                None => break,
            }

            if self.stopped {
                break;
            }
        }

        // If not even depth 1 completed, fall back to the first legal move
        // rather than returning nothing.
        let best_move = best_move.or_else(|| root_moves.first().copied());
        self.finish(best_move, best_score)
    }

    /// One full-width pass over the root moves. Returns the best move of
    /// this iteration, or [`None`] if the search was interrupted before
    /// the pass finished.
    fn search_root(&mut self, root_moves: &[Move], depth: u32) -> Option<(Move, Score)> {
        let mut alpha = -Score::INF;
        let beta = Score::INF;
        let mut best: Option<(Move, Score)> = None;

        for &m in root_moves {
            self.poll_external();
            if self.stopped {
                return None;
            }

            let child = self.root.successor(m);
            self.repetition.push(child.hash());
            let score = -self.negamax(&child, depth - 1, 1, -beta, -alpha);
            self.repetition.pop(child.hash());

            if self.stopped {
                return None;
            }

            // Strict improvement only: ties go to the earlier move.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((m, score));
            }
            alpha = alpha.max(score);
        }

        best
    }

    fn root_moves(&self) -> Vec<Move> {
        let mut moves = rules::legal_moves(&self.root);

        if !self.limits.search_moves.is_empty() {
            moves.retain(|m| {
                let wire = UciMove::from(*m);
                self.limits.search_moves.contains(&wire)
            });
        }

        moves
    }

    fn finish(self, best_move: Option<Move>, score: Score) -> SearchResult {
        SearchResult {
            best_move,
            score,
            elapsed: self.start.elapsed(),
            aborted: self.stopped,
            stats: self.stats,
        }
    }

    /// Cheap per-node stop check: the sticky flag and the node budget every
    /// node, the clock and the handler every [`POLL_INTERVAL_NODES`].
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        if let Some(budget) = self.limits.nodes {
            if self.stats.nodes >= budget {
                self.stopped = true;
                return true;
            }
        }

        if self.stats.nodes % POLL_INTERVAL_NODES == 0 {
            self.poll_external();
        }

        self.stopped
    }

    /// Unconditionally consults the wall clock and the handler.
    fn poll_external(&mut self) {
        if self.stopped {
            return;
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.stopped = true;
                return;
            }
        }

        if self.handler.should_stop() {
            self.stopped = true;
        }
    }
}
