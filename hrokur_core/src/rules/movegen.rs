//! Legal move generation.
//!
//! Runs in two phases: enumerate pseudo-legal moves for every piece of the
//! side to move, then filter out moves that leave the mover's king
//! attacked by speculatively applying each one to a copy of the position.

use crate::board::{
    Castling, Color, Move, MoveBuilder, Piece, PieceType, Position, Square,
};

use super::attacks::{
    self, BISHOP_RAYS, KING_STEPS, KNIGHT_JUMPS, ROOK_RAYS,
};

/// Generates all legal moves for the side to move.
///
/// The order of the returned moves is unspecified.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    pseudo_legal_moves(position)
        .into_iter()
        .filter(|&m| !leaves_king_in_check(position, m))
        .collect()
}

/// Generates moves that obey piece movement rules but have not yet been
/// checked against the "king must not be left in check" constraint.
pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let mover = position.to_move();

    for (piece, from) in position.pieces() {
        if piece.color != mover {
            continue;
        }

        match piece.kind {
            PieceType::Pawn => pawn_moves(position, piece, from, &mut moves),
            PieceType::Knight => {
                jump_moves(position, piece, from, &KNIGHT_JUMPS, &mut moves)
            }
            PieceType::Bishop => {
                slider_moves(position, piece, from, &BISHOP_RAYS, &mut moves)
            }
            PieceType::Rook => {
                slider_moves(position, piece, from, &ROOK_RAYS, &mut moves)
            }
            PieceType::Queen => {
                slider_moves(position, piece, from, &ROOK_RAYS, &mut moves);
                slider_moves(position, piece, from, &BISHOP_RAYS, &mut moves);
            }
            PieceType::King => {
                jump_moves(position, piece, from, &KING_STEPS, &mut moves);
                castle_moves(position, piece, from, &mut moves);
            }
        }
    }

    moves
}

fn leaves_king_in_check(position: &Position, m: Move) -> bool {
    let mover = position.to_move();
    let next = position.successor(m);

    match next.king_square(mover) {
        Some(king) => attacks::is_square_attacked_by(&next, king, mover.flip()),
        None => false,
    }
}

fn pawn_moves(position: &Position, piece: Piece, from: Square, out: &mut Vec<Move>) {
    let color = piece.color;
    let forward = color.pawn_direction();

    // Pushes: one square to an empty square, or two from the home rank
    // through empty squares.
    if let Some(to) = from.offset(forward, 0) {
        if position.piece_at(to).is_none() {
            push_maybe_promoting(Move::builder(from, to, piece), color, to, out);

            if from.rank() == color.pawn_home_rank() {
                if let Some(two) = to.offset(forward, 0) {
                    if position.piece_at(two).is_none() {
                        out.push(
                            Move::builder(from, two, piece)
                                .is_double_pawn_push()
                                .build(),
                        );
                    }
                }
            }
        }
    }

    // Diagonal captures, including en passant.
    for sideways in [-1, 1] {
        let Some(to) = from.offset(forward, sideways) else {
            continue;
        };

        if let Some(target) = position.piece_at(to) {
            if target.color != color {
                push_maybe_promoting(
                    Move::builder(from, to, piece).captures(target),
                    color,
                    to,
                    out,
                );
            }
        } else if position.en_passant() == Some(to)
            && from.rank() == en_passant_source_rank(color)
        {
            out.push(
                Move::builder(from, to, piece)
                    .captures(Piece::new(color.flip(), PieceType::Pawn))
                    .is_en_passant()
                    .build(),
            );
        }
    }
}

/// Emits the built move, expanded into the four promotion variants when it
/// lands on the final rank.
fn push_maybe_promoting(
    builder: MoveBuilder,
    color: Color,
    to: Square,
    out: &mut Vec<Move>,
) {
    if to.rank() == color.promotion_rank() {
        for kind in PieceType::PROMOTION_TARGETS {
            out.push(builder.promotes_to(Piece::new(color, kind)).build());
        }
    } else {
        out.push(builder.build());
    }
}

/// The rank a pawn must stand on to capture en passant (0-based).
fn en_passant_source_rank(color: Color) -> u8 {
    match color {
        Color::White => 4,
        Color::Black => 3,
    }
}

fn jump_moves(
    position: &Position,
    piece: Piece,
    from: Square,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, df) in offsets {
        let Some(to) = from.offset(dr, df) else {
            continue;
        };

        match position.piece_at(to) {
            None => out.push(Move::builder(from, to, piece).build()),
            Some(target) if target.color != piece.color => {
                out.push(Move::builder(from, to, piece).captures(target).build())
            }
            Some(_) => {}
        }
    }
}

fn slider_moves(
    position: &Position,
    piece: Piece,
    from: Square,
    rays: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, df) in rays {
        let mut square = from;
        while let Some(to) = square.offset(dr, df) {
            square = to;
            match position.piece_at(to) {
                None => out.push(Move::builder(from, to, piece).build()),
                Some(target) => {
                    if target.color != piece.color {
                        out.push(
                            Move::builder(from, to, piece).captures(target).build(),
                        );
                    }
                    break;
                }
            }
        }
    }
}

fn castle_moves(position: &Position, piece: Piece, from: Square, out: &mut Vec<Move>) {
    let color = piece.color;
    let rank = color.back_rank();

    // Castling is only shaped around the standard home squares; a position
    // whose rights disagree with its piece placement generates nothing.
    if from != Square::at(rank, 4) {
        return;
    }

    let opponent = color.flip();
    let rook = Piece::new(color, PieceType::Rook);
    let empty = |file: u8| position.piece_at(Square::at(rank, file)).is_none();
    let safe = |file: u8| {
        !attacks::is_square_attacked_by(position, Square::at(rank, file), opponent)
    };

    // Kingside: f- and g-files clear, king path e-f-g unattacked.
    if position.castling().contains(Castling::kingside(color))
        && position.piece_at(Square::at(rank, 7)) == Some(rook)
        && empty(5)
        && empty(6)
        && safe(4)
        && safe(5)
        && safe(6)
    {
        out.push(
            Move::builder(from, Square::at(rank, 6), piece)
                .is_castle()
                .build(),
        );
    }

    // Queenside: b-, c- and d-files clear, king path e-d-c unattacked.
    if position.castling().contains(Castling::queenside(color))
        && position.piece_at(Square::at(rank, 0)) == Some(rook)
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(4)
        && safe(3)
        && safe(2)
    {
        out.push(
            Move::builder(from, Square::at(rank, 2), piece)
                .is_castle()
                .build(),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::assert_in_any_order;
    use pretty_assertions::assert_eq;

    fn moves_from(fen: &str, from: Square) -> Vec<Move> {
        let position = Position::from_fen(fen).unwrap();
        legal_moves(&position)
            .into_iter()
            .filter(|m| m.from() == from)
            .collect()
    }

    fn targets(moves: &[Move]) -> Vec<Square> {
        moves.iter().map(|m| m.to()).collect()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::starting_position();
        assert_eq!(legal_moves(&position).len(), 20);
    }

    #[test]
    fn pawn_single_and_double_pushes() {
        let moves = moves_from(STARTING, Square::E2);
        assert_in_any_order(targets(&moves), vec![Square::E3, Square::E4]);

        let double = moves.iter().find(|m| m.to() == Square::E4).unwrap();
        assert!(double.is_double_pawn_push());
    }

    #[test]
    fn pawn_blocked_by_any_piece_cannot_push() {
        // White pawn on e4 blocked by a black pawn on e5.
        let moves = moves_from("4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1", Square::E4);
        assert_eq!(moves, vec![]);
    }

    #[test]
    fn pawn_double_push_blocked_on_the_crossing_square() {
        let moves = moves_from("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves, vec![]);
    }

    #[test]
    fn pawn_captures_diagonally() {
        let moves = moves_from("4k3/8/8/3p1p2/4P3/8/8/4K3 w - - 0 1", Square::E4);
        assert_in_any_order(
            targets(&moves),
            vec![Square::D5, Square::E5, Square::F5],
        );
    }

    #[test]
    fn pawn_promotions_come_in_four_variants() {
        let moves = moves_from("4k3/8/8/8/8/8/6p1/4K2B b - - 0 1", Square::G2);

        let mut promotions: Vec<_> = moves
            .iter()
            .map(|m| (m.to(), m.promotion().map(|p| p.kind)))
            .collect();
        promotions.sort();

        let mut expected = vec![];
        for kind in PieceType::PROMOTION_TARGETS {
            expected.push((Square::G1, Some(kind)));
            expected.push((Square::H1, Some(kind)));
        }
        expected.sort();

        assert_eq!(promotions, expected);
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut position = Position::starting_position();
        for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            let m = position.find_uci_move(uci.parse().unwrap()).unwrap();
            position = position.successor(m);
        }

        let capture = legal_moves(&position)
            .into_iter()
            .find(|m| m.is_en_passant())
            .expect("e5d6 en passant should be available");
        assert_eq!(capture.from(), Square::E5);
        assert_eq!(capture.to(), Square::D6);
        assert_eq!(capture.captured_piece(), Some(Piece::BLACK_PAWN));
    }

    #[test]
    fn en_passant_requires_the_capturing_rank() {
        // En passant target set, but the white pawn stands on e4, not the
        // fifth rank: no en passant capture may be generated.
        let position =
            Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert!(legal_moves(&position).iter().any(|m| m.is_en_passant()));

        let position =
            Position::from_fen("4k3/8/3p4/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
        assert!(!legal_moves(&position).iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn knight_jumps_ignore_blockers_but_not_own_pieces() {
        let moves = moves_from(STARTING, Square::G1);
        assert_in_any_order(targets(&moves), vec![Square::F3, Square::H3]);
    }

    #[test]
    fn sliders_stop_at_the_first_piece() {
        let moves = moves_from("4k3/8/8/8/1p2R2P/8/8/4K3 w - - 0 1", Square::E4);

        assert!(targets(&moves).contains(&Square::B4));
        assert!(!targets(&moves).contains(&Square::A4));
        assert!(targets(&moves).contains(&Square::G4));
        assert!(!targets(&moves).contains(&Square::H4));

        let capture = moves.iter().find(|m| m.to() == Square::B4).unwrap();
        assert_eq!(capture.captured_piece(), Some(Piece::BLACK_PAWN));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        // The rook on b2 covers a2 and b1; capturing it is the only move.
        let moves = moves_from("4k3/8/8/8/8/8/1r6/K7 w - - 0 1", Square::A1);
        assert_eq!(targets(&moves), vec![Square::B2]);
    }

    #[test]
    fn both_castles_generated_when_the_path_is_clear() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Square::E1);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_in_any_order(
            castles.iter().map(|m| m.to()),
            vec![Square::C1, Square::G1],
        );
    }

    #[test]
    fn castle_blocked_by_pieces_between() {
        let moves = moves_from("4k3/8/8/8/8/8/8/R2QK1NR w KQ - 0 1", Square::E1);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn castle_blocked_through_attacked_square() {
        // The rook on f2 attacks f1, a square the king crosses when castling
        // kingside. Queenside is unaffected.
        let moves = moves_from("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1", Square::E1);
        let castles: Vec<_> = moves
            .iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to())
            .collect();
        assert_eq!(castles, vec![Square::C1]);
    }

    #[test]
    fn no_castling_out_of_check() {
        // The rook on e2 checks the king directly; neither castle is an
        // evasion.
        let moves = moves_from("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1", Square::E1);
        assert!(!moves.iter().any(|m| m.is_castle()));
        assert_in_any_order(
            targets(&moves),
            vec![Square::D1, Square::E2, Square::F1],
        );
    }

    #[test]
    fn no_castle_rights_no_castle_moves() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1", Square::E1);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn pinned_piece_cannot_expose_the_king() {
        // The white knight on d2 is pinned by the rook on d8.
        let position =
            Position::from_fen("3rk3/8/8/8/8/8/3N4/3K4 w - - 0 1").unwrap();
        assert!(!legal_moves(&position)
            .iter()
            .any(|m| m.from() == Square::D2));
    }

    #[test]
    fn pinned_knight_stays_put_under_a_file_pin() {
        // The knight on e2 shields the king from the rook on e8: its only
        // pseudo-legal moves all expose the king, so the king's sidesteps
        // are the full move list.
        let position =
            Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&position);

        assert_in_any_order(
            targets(&moves),
            vec![Square::D1, Square::D2, Square::F1, Square::F2],
        );
    }

    const STARTING: &str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
}
