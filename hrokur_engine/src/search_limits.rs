use std::time::Duration;

use hrokur_core::board::UciMove;

/// Depth searched when `go` names no limit at all.
pub const DEFAULT_DEPTH: u32 = 6;

/// Hard ceiling on iterative deepening, standing in for "unbounded".
pub const MAX_DEPTH: u32 = 64;

/// The explicit limits a `go` command places on a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    pub depth: Option<u32>,
    /// Maximum number of nodes to visit.
    pub nodes: Option<u64>,
    /// Wall-clock budget for this move.
    pub move_time: Option<Duration>,
    /// Search until told to stop.
    pub infinite: bool,
    /// Searching the opponent's expected move; treated like `infinite`.
    pub ponder: bool,
    /// When non-empty, only these root moves are considered.
    pub search_moves: Vec<UciMove>,
}

impl SearchLimits {
    pub fn infinite() -> Self {
        Self {
            infinite: true,
            ..Self::default()
        }
    }

    pub fn fixed_depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// The depth iterative deepening runs to.
    ///
    /// An explicit depth wins. Otherwise any open-ended limit (infinite,
    /// ponder, a time or node budget) searches as deep as it can before
    /// being cut off, and a bare `go` falls back to [`DEFAULT_DEPTH`].
    pub fn effective_depth(&self) -> u32 {
        match self.depth {
            Some(depth) => depth.clamp(1, MAX_DEPTH),
            None => {
                if self.infinite
                    || self.ponder
                    || self.move_time.is_some()
                    || self.nodes.is_some()
                {
                    MAX_DEPTH
                } else {
                    DEFAULT_DEPTH
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_go_searches_the_default_depth() {
        assert_eq!(SearchLimits::default().effective_depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn explicit_depth_wins() {
        assert_eq!(SearchLimits::fixed_depth(3).effective_depth(), 3);
        assert_eq!(SearchLimits::fixed_depth(0).effective_depth(), 1);
        assert_eq!(SearchLimits::fixed_depth(1000).effective_depth(), MAX_DEPTH);

        let with_time = SearchLimits {
            depth: Some(4),
            move_time: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        assert_eq!(with_time.effective_depth(), 4);
    }

    #[test]
    fn open_ended_limits_deepen_until_cut_off() {
        assert_eq!(SearchLimits::infinite().effective_depth(), MAX_DEPTH);

        let move_time = SearchLimits {
            move_time: Some(Duration::from_millis(100)),
            ..Default::default()
        };
        assert_eq!(move_time.effective_depth(), MAX_DEPTH);

        let nodes = SearchLimits {
            nodes: Some(10_000),
            ..Default::default()
        };
        assert_eq!(nodes.effective_depth(), MAX_DEPTH);
    }
}
