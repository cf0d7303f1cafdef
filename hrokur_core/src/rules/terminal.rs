//! Terminal position classification.

use crate::board::{Color, Move, PieceType, Position, Square};
use crate::game::RepetitionTable;

use super::{attacks, movegen};

/// The ways a game can be over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOver {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// Classifies the position, generating its legal moves along the way.
///
/// Checks run in a fixed order — checkmate, stalemate, fifty-move rule,
/// threefold repetition, insufficient material — and the first match wins.
/// Returns [`None`] for a position still in play.
pub fn classify(position: &Position, repetition: &RepetitionTable) -> Option<GameOver> {
    let legal = movegen::legal_moves(position);
    classify_with_moves(position, repetition, &legal)
}

/// Like [`classify`], but reuses an already generated legal move list so the
/// search does not enumerate twice per node.
pub fn classify_with_moves(
    position: &Position,
    repetition: &RepetitionTable,
    legal: &[Move],
) -> Option<GameOver> {
    if legal.is_empty() {
        return Some(if attacks::is_in_check(position) {
            GameOver::Checkmate {
                winner: position.to_move().flip(),
            }
        } else {
            GameOver::Stalemate
        });
    }

    if position.halfmove_clock() >= 100 {
        return Some(GameOver::FiftyMoveRule);
    }

    if repetition.count(position.hash()) >= 3 {
        return Some(GameOver::ThreefoldRepetition);
    }

    if insufficient_material(position) {
        return Some(GameOver::InsufficientMaterial);
    }

    None
}

/// No sequence of legal moves can deliver mate: bare kings, a lone minor
/// piece, or a single bishop each on same-colored squares.
fn insufficient_material(position: &Position) -> bool {
    let mut knights = [0u8; 2];
    let mut bishops = [0u8; 2];
    let mut bishop_squares: [Option<Square>; 2] = [None, None];

    for (piece, square) in position.pieces() {
        let side = match piece.color {
            Color::White => 0,
            Color::Black => 1,
        };
        match piece.kind {
            PieceType::King => {}
            PieceType::Knight => knights[side] += 1,
            PieceType::Bishop => {
                bishops[side] += 1;
                bishop_squares[side] = Some(square);
            }
            // Any pawn, rook or queen is mating material.
            _ => return false,
        }
    }

    match knights[0] + knights[1] + bishops[0] + bishops[1] {
        0 => true,
        1 => true,
        2 => match (bishop_squares[0], bishop_squares[1]) {
            (Some(white), Some(black)) => white.parity() == black.parity(),
            _ => false,
        },
        _ => false,
    }
}
