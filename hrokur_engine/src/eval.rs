//! Static evaluation: material count in centipawns.

use hrokur_core::board::{Color, PieceType, Position};

use crate::score::Score;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Sentinel well above any exchange sequence. Kings always cancel out of
/// the material sum, but the value keeps the table total.
pub const KING_VALUE: i32 = 20_000;

pub const fn piece_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Evaluates the position for the side to move.
///
/// White's material minus Black's, negated when Black is to move, so the
/// search can treat every node uniformly.
pub fn evaluate(position: &Position) -> Score {
    let mut white_minus_black = 0;

    for (piece, _) in position.pieces() {
        let value = piece_value(piece.kind);
        match piece.color {
            Color::White => white_minus_black += value,
            Color::Black => white_minus_black -= value,
        }
    }

    match position.to_move() {
        Color::White => Score(white_minus_black),
        Color::Black => Score(-white_minus_black),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Position::starting_position()), Score::DRAW);
    }

    #[test]
    fn material_is_summed_in_centipawns() {
        // White is up a rook; Black is up a pawn.
        let position =
            Position::from_fen("4k3/p7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&position), Score(ROOK_VALUE - PAWN_VALUE));
    }

    #[test]
    fn evaluation_is_from_the_movers_perspective() {
        let white_to_move =
            Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let black_to_move =
            Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();

        assert_eq!(evaluate(&white_to_move), Score(QUEEN_VALUE));
        assert_eq!(evaluate(&black_to_move), Score(-QUEEN_VALUE));
    }
}
