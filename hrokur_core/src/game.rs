//! Game history: the sequence of positions reached, the moves that joined
//! them, and the repetition bookkeeping for the threefold rule.

use std::collections::HashMap;

use crate::board::{Move, Position, UciMove, ZobristHash};
use crate::rules::{self, GameOver};

/// A multiset of position fingerprints, counting how often each position
/// has occurred.
///
/// Keys with a count of zero are removed, so two tables that have seen the
/// same multiset of positions compare equal. The search clones this table
/// to speculate down lines without touching the game's own counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of the position with this hash.
    pub fn push(&mut self, hash: ZobristHash) {
        *self.counts.entry(hash.0).or_insert(0) += 1;
    }

    /// Removes one occurrence of the position with this hash.
    ///
    /// Panics if the position was never recorded; that means a push/pop
    /// imbalance, which is an internal invariant violation.
    pub fn pop(&mut self, hash: ZobristHash) {
        let count = self
            .counts
            .get_mut(&hash.0)
            .expect("popped a position hash that was never pushed");
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&hash.0);
        }
    }

    /// How many times the position with this hash has occurred.
    pub fn count(&self, hash: ZobristHash) -> u32 {
        self.counts.get(&hash.0).copied().unwrap_or(0)
    }
}

/// The full record of a game in progress.
///
/// Holds every position reached (the current one last), the move list that
/// produced them, and the repetition table over the whole history. The
/// invariant `positions.len() == moves.len() + 1` always holds: a game has
/// at least its initial position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    positions: Vec<Position>,
    moves: Vec<Move>,
    repetition: RepetitionTable,
}

impl Game {
    /// Starts a game from the given initial position.
    pub fn new(initial: Position) -> Self {
        let mut repetition = RepetitionTable::new();
        repetition.push(initial.hash());

        Self {
            positions: vec![initial],
            moves: Vec::new(),
            repetition,
        }
    }

    /// The current position.
    pub fn latest(&self) -> &Position {
        self.positions
            .last()
            .expect("a game always has at least one position")
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn repetition(&self) -> &RepetitionTable {
        &self.repetition
    }

    pub fn repetition_count(&self, hash: ZobristHash) -> u32 {
        self.repetition.count(hash)
    }

    /// Plays a move, extending the history with the successor position.
    ///
    /// Assumes the move is legal in the latest position; use
    /// [`Self::try_push_uci`] for wire moves of unknown legality.
    pub fn apply(&mut self, m: Move) {
        let next = self.latest().successor(m);
        self.repetition.push(next.hash());
        self.positions.push(next);
        self.moves.push(m);
    }

    /// Takes back the most recent move. Returns it, or [`None`] if only the
    /// initial position remains.
    pub fn undo(&mut self) -> Option<Move> {
        if self.moves.is_empty() {
            return None;
        }

        let undone = self.positions.pop().expect("history cannot be empty");
        self.repetition.pop(undone.hash());
        self.moves.pop()
    }

    /// Looks up a wire-format move against the legal moves of the current
    /// position and plays it if it matches one. Returns the played move.
    pub fn try_push_uci(&mut self, uci: UciMove) -> Option<Move> {
        let m = self.latest().find_uci_move(uci)?;
        self.apply(m);
        Some(m)
    }

    /// Classifies the current position against the game's own history.
    pub fn game_over(&self) -> Option<GameOver> {
        rules::classify(self.latest(), &self.repetition)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Position::starting_position())
    }
}
