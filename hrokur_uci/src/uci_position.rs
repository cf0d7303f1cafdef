use std::fmt::{self, Display};

use hrokur_core::board::UciMove;

/// The payload of a `position` command: a base position and the moves
/// played from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UciPositionSpec {
    pub base: UciPositionBase,
    pub moves: Vec<UciMove>,
}

impl Display for UciPositionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;

        if !self.moves.is_empty() {
            write!(f, " moves")?;
            for m in &self.moves {
                write!(f, " {m}")?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UciPositionBase {
    #[default]
    StartPos,
    /// The six FEN fields, space-joined as received.
    Fen(String),
}

impl Display for UciPositionBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciPositionBase::StartPos => write!(f, "startpos"),
            UciPositionBase::Fen(fen) => write!(f, "fen {fen}"),
        }
    }
}
