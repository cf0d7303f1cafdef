//! The rules of chess, as pure functions over [`Position`].
//!
//! Nothing in here holds state: attack detection and move generation take a
//! position by reference, and terminal classification additionally borrows
//! the caller's repetition table.
//!
//! [`Position`]: crate::board::Position

mod attacks;
mod movegen;
mod terminal;

pub use attacks::{is_in_check, is_square_attacked_by};
pub use movegen::{legal_moves, pseudo_legal_moves};
pub use terminal::{classify, classify_with_moves, GameOver};
