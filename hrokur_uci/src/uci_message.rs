use std::fmt::{self, Display};
use std::str::FromStr;

use hrokur_core::board::UciMove;
use thiserror::Error;

use crate::parsing;
use crate::uci_info::UciInfo;
use crate::uci_option_config::UciOptionConfig;
use crate::uci_position::UciPositionSpec;
use crate::uci_search_control::UciSearchControl;
use crate::uci_time_control::UciTimeControl;

/// A UCI message, in either direction.
///
/// [`FromStr`] parses a line (the engine only ever receives the GUI-side
/// variants, but the full set round-trips for testing); [`Display`] renders
/// the canonical wire form, so responding is
/// `writeln!(out, "{}", message)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciMessage {
    // GUI to engine.
    /// `uci`
    Uci,
    /// `debug [on|off]`
    Debug(bool),
    /// `isready`
    IsReady,
    /// `setoption name <name> [value <value>]`
    SetOption {
        name: String,
        value: Option<String>,
    },
    /// `ucinewgame`
    UciNewGame,
    /// `position [startpos | fen <fen>] [moves <moves>...]`
    Position(UciPositionSpec),
    /// `go [limits...]`
    Go {
        time_control: Option<UciTimeControl>,
        search_control: Option<UciSearchControl>,
    },
    /// `stop`
    Stop,
    /// `ponderhit`
    PonderHit,
    /// `quit`
    Quit,

    // Engine to GUI.
    /// `id name <name>` or `id author <author>`
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// `uciok`
    UciOk,
    /// `readyok`
    ReadyOk,
    /// `bestmove <move> [ponder <move>]`
    BestMove {
        best_move: UciMove,
        ponder: Option<UciMove>,
    },
    /// `info ...`
    Info(UciInfo),
    /// `option name <name> type <type> ...`
    Option(UciOptionConfig),
}

impl UciMessage {
    pub fn id_name(name: impl Into<String>) -> Self {
        Self::Id {
            name: Some(name.into()),
            author: None,
        }
    }

    pub fn id_author(author: impl Into<String>) -> Self {
        Self::Id {
            name: None,
            author: Some(author.into()),
        }
    }

    pub fn best_move(best_move: UciMove) -> Self {
        Self::BestMove {
            best_move,
            ponder: None,
        }
    }

    pub fn info_string(text: impl Into<String>) -> Self {
        Self::Info(UciInfo::message(text))
    }
}

/// Error produced when a line contains no recognisable UCI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not a UCI message")]
pub struct ParseUciMessageError;

impl FromStr for UciMessage {
    type Err = ParseUciMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parsing::uci_message(s) {
            // Trailing junk after a complete command is ignored.
            Ok((_, message)) => Ok(message),
            Err(_) => Err(ParseUciMessageError),
        }
    }
}

impl Display for UciMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciMessage::Uci => write!(f, "uci"),

            UciMessage::Debug(on) => {
                write!(f, "debug {}", if *on { "on" } else { "off" })
            }

            UciMessage::IsReady => write!(f, "isready"),

            UciMessage::SetOption { name, value } => {
                write!(f, "setoption name {name}")?;
                if let Some(value) = value {
                    write!(f, " value {value}")?;
                }
                Ok(())
            }

            UciMessage::UciNewGame => write!(f, "ucinewgame"),

            UciMessage::Position(spec) => write!(f, "position {spec}"),

            UciMessage::Go {
                time_control,
                search_control,
            } => {
                write!(f, "go")?;
                if let Some(time_control) = time_control {
                    write!(f, " {time_control}")?;
                }
                if let Some(search_control) = search_control {
                    write!(f, " {search_control}")?;
                }
                Ok(())
            }

            UciMessage::Stop => write!(f, "stop"),

            UciMessage::PonderHit => write!(f, "ponderhit"),

            UciMessage::Quit => write!(f, "quit"),

            UciMessage::Id { name, author } => {
                write!(f, "id")?;
                if let Some(name) = name {
                    write!(f, " name {name}")?;
                }
                if let Some(author) = author {
                    write!(f, " author {author}")?;
                }
                Ok(())
            }

            UciMessage::UciOk => write!(f, "uciok"),

            UciMessage::ReadyOk => write!(f, "readyok"),

            UciMessage::BestMove { best_move, ponder } => {
                write!(f, "bestmove {best_move}")?;
                if let Some(ponder) = ponder {
                    write!(f, " ponder {ponder}")?;
                }
                Ok(())
            }

            UciMessage::Info(info) => write!(f, "info {info}"),

            UciMessage::Option(config) => write!(f, "option {config}"),
        }
    }
}
