//! Core chess model for the Hrókur engine: board representation, the full
//! rules of the game, and game-history bookkeeping.

pub mod board;
pub mod game;
pub mod perft;
pub mod rules;

#[cfg(test)]
mod test_utils;
