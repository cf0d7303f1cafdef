//! Attack detection, computed outward from the attacked square.

use crate::board::{Color, PieceType, Position, Square};

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Is `target` attacked by any piece of `attacker`?
///
/// The hot primitive of the legality filter. Rather than enumerating the
/// attacker's moves, rays and jumps are cast outward from the target square
/// and checked against what they land on.
pub fn is_square_attacked_by(position: &Position, target: Square, attacker: Color) -> bool {
    let holds = |square: Square, kind: PieceType| {
        position.piece_at(square)
            .is_some_and(|piece| piece.color == attacker && piece.is(kind))
    };

    // Knight jumps.
    for (dr, df) in KNIGHT_JUMPS {
        if let Some(square) = target.offset(dr, df) {
            if holds(square, PieceType::Knight) {
                return true;
            }
        }
    }

    // Rook and queen rays: the first occupied square along a rank or file
    // decides the ray.
    for (dr, df) in ROOK_RAYS {
        if let Some(piece) = first_piece_along(position, target, dr, df) {
            if piece.color == attacker
                && matches!(piece.kind, PieceType::Rook | PieceType::Queen)
            {
                return true;
            }
        }
    }

    // Bishop and queen rays.
    for (dr, df) in BISHOP_RAYS {
        if let Some(piece) = first_piece_along(position, target, dr, df) {
            if piece.color == attacker
                && matches!(piece.kind, PieceType::Bishop | PieceType::Queen)
            {
                return true;
            }
        }
    }

    // Pawns attack diagonally forward, so the attacking pawn sits one rank
    // behind the target in its own advance direction.
    let pawn_rank_step = -attacker.pawn_direction();
    for df in [-1, 1] {
        if let Some(square) = target.offset(pawn_rank_step, df) {
            if holds(square, PieceType::Pawn) {
                return true;
            }
        }
    }

    // The enemy king.
    for (dr, df) in KING_STEPS {
        if let Some(square) = target.offset(dr, df) {
            if holds(square, PieceType::King) {
                return true;
            }
        }
    }

    false
}

/// Is the side to move in check?
pub fn is_in_check(position: &Position) -> bool {
    let mover = position.to_move();
    match position.king_square(mover) {
        Some(king) => is_square_attacked_by(position, king, mover.flip()),
        None => false,
    }
}

fn first_piece_along(
    position: &Position,
    from: Square,
    dr: i8,
    df: i8,
) -> Option<crate::board::Piece> {
    let mut square = from;
    while let Some(next) = square.offset(dr, df) {
        square = next;
        if let Some(piece) = position.piece_at(square) {
            return Some(piece);
        }
    }
    None
}
