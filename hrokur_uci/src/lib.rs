//! The UCI protocol surface of Hrókur: message model, line parsing,
//! response formatting, and the engine worker that ties the protocol to
//! the core and the search.

mod format_utils;
mod parsing;
mod uci_info;
mod uci_message;
mod uci_option_config;
mod uci_position;
mod uci_search_control;
mod uci_time_control;
pub mod worker;

pub use uci_info::{UciInfo, UciInfoScore};
pub use uci_message::{ParseUciMessageError, UciMessage};
pub use uci_option_config::UciOptionConfig;
pub use uci_position::{UciPositionBase, UciPositionSpec};
pub use uci_search_control::UciSearchControl;
pub use uci_time_control::UciTimeControl;
