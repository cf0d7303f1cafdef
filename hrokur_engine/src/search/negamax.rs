//! The recursive alpha-beta negamax.

use hrokur_core::board::Position;
use hrokur_core::rules::{self, GameOver};

use crate::eval;
use crate::handler::SearchHandler;
use crate::score::Score;

use super::SearchContext;

impl<H: SearchHandler> SearchContext<'_, H> {
    /// Scores `position` from the perspective of its side to move.
    ///
    /// `ply` is the distance from the root, used to prefer shorter mates.
    /// The repetition table already includes `position` itself; every
    /// speculated child is pushed around the recursion and popped on
    /// backtrack.
    pub(super) fn negamax(
        &mut self,
        position: &Position,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        beta: Score,
    ) -> Score {
        self.stats.nodes += 1;

        // Terminal classification first: a mate or draw ends the line no
        // matter how much depth remains.
        let moves = rules::legal_moves(position);
        if let Some(game_over) =
            rules::classify_with_moves(position, &self.repetition, &moves)
        {
            return match game_over {
                GameOver::Checkmate { .. } => Score::mated_in(ply),
                _ => Score::DRAW,
            };
        }

        if depth == 0 {
            return eval::evaluate(position);
        }

        if self.should_stop() {
            // The value is discarded on the way out; alpha is as good a
            // placeholder as any.
            return alpha;
        }

        let mut best = -Score::INF;

        for m in moves {
            let child = position.successor(m);
            self.repetition.push(child.hash());
            let score = -self.negamax(&child, depth - 1, ply + 1, -beta, -alpha);
            self.repetition.pop(child.hash());

            if self.stopped {
                break;
            }

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        best
    }
}
