use std::fmt::{self, Display};
use std::time::Duration;

use crate::format_utils::SpaceSepFormatter;

/// The time-related half of a `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciTimeControl {
    /// `go infinite`: search until `stop`.
    Infinite,
    /// `go movetime N`: spend exactly this long.
    MoveTime(Duration),
    /// Game clock state: `wtime`/`btime`/`winc`/`binc`/`movestogo`.
    TimeLeft {
        white_time: Option<Duration>,
        black_time: Option<Duration>,
        white_increment: Option<Duration>,
        black_increment: Option<Duration>,
        moves_to_go: Option<u32>,
    },
    /// `go ponder`: searching the expected reply.
    Ponder,
}

impl UciTimeControl {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_raw(
        ponder: bool,
        white_time: Option<Duration>,
        black_time: Option<Duration>,
        white_increment: Option<Duration>,
        black_increment: Option<Duration>,
        moves_to_go: Option<u32>,
        move_time: Option<Duration>,
        infinite: bool,
    ) -> Option<Self> {
        if infinite {
            Some(Self::Infinite)
        } else if let Some(move_time) = move_time {
            Some(Self::MoveTime(move_time))
        } else if white_time.is_some()
            || black_time.is_some()
            || white_increment.is_some()
            || black_increment.is_some()
            || moves_to_go.is_some()
        {
            Some(Self::TimeLeft {
                white_time,
                black_time,
                white_increment,
                black_increment,
                moves_to_go,
            })
        } else if ponder {
            Some(Self::Ponder)
        } else {
            None
        }
    }
}

impl Display for UciTimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciTimeControl::Infinite => write!(f, "infinite"),

            UciTimeControl::MoveTime(duration) => {
                write!(f, "movetime {}", duration.as_millis())
            }

            UciTimeControl::Ponder => write!(f, "ponder"),

            UciTimeControl::TimeLeft {
                white_time,
                black_time,
                white_increment,
                black_increment,
                moves_to_go,
            } => {
                let mut out = SpaceSepFormatter::new(f);
                out.push_option("wtime", white_time.map(|d| d.as_millis()))?;
                out.push_option("btime", black_time.map(|d| d.as_millis()))?;
                out.push_option("winc", white_increment.map(|d| d.as_millis()))?;
                out.push_option("binc", black_increment.map(|d| d.as_millis()))?;
                out.push_option("movestogo", *moves_to_go)
            }
        }
    }
}
