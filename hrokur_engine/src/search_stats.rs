/// Counters accumulated over one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, including leaves.
    pub nodes: u64,
    /// Deepest fully completed iteration.
    pub depth: u32,
}
