use std::fmt::{self, Display};

use hrokur_core::board::UciMove;

use crate::format_utils::SpaceSepFormatter;

/// The search-related half of a `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UciSearchControl {
    pub search_moves: Vec<UciMove>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub mate: Option<u32>,
}

impl UciSearchControl {
    pub(crate) fn from_raw(
        search_moves: Vec<UciMove>,
        depth: Option<u32>,
        nodes: Option<u64>,
        mate: Option<u32>,
    ) -> Option<Self> {
        if search_moves.is_empty() && depth.is_none() && nodes.is_none() && mate.is_none()
        {
            None
        } else {
            Some(Self {
                search_moves,
                depth,
                nodes,
                mate,
            })
        }
    }
}

impl Display for UciSearchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = SpaceSepFormatter::new(f);

        if !self.search_moves.is_empty() {
            out.push_str("searchmoves")?;
            for m in &self.search_moves {
                out.push(m)?;
            }
        }

        out.push_option("depth", self.depth)?;
        out.push_option("nodes", self.nodes)?;
        out.push_option("mate", self.mate)
    }
}
