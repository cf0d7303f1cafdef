//! Perft: exhaustive move-tree leaf counting, the standard correctness
//! check for a move generator.

use crate::board::Position;
use crate::rules;

/// Counts the leaf nodes of the legal move tree at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = rules::legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| perft(&position.successor(m), depth - 1))
        .sum()
}

/// Perft split by root move, for tracking down generator bugs.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    rules::legal_moves(position)
        .into_iter()
        .map(|m| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&position.successor(m), depth - 1)
            };
            (m.to_string(), nodes)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn perft_zero_is_one() {
        assert_eq!(perft(&Position::starting_position(), 0), 1);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let position = Position::starting_position();
        let total: u64 = perft_divide(&position, 3).into_iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&position, 3));
    }
}
