//! End-to-end rules scenarios played through the `Game` history.

use hrokur_core::board::{Color, Piece, Position, Square};
use hrokur_core::game::Game;
use hrokur_core::rules::{self, GameOver};

fn play_all(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        assert!(
            game.try_push_uci(uci.parse().unwrap()).is_some(),
            "{uci} is not legal in {}",
            game.latest().fen()
        );
    }
}

#[test]
fn starting_position_has_exactly_twenty_legal_moves() {
    let moves = rules::legal_moves(&Position::starting_position());
    assert_eq!(moves.len(), 20);

    // 16 pawn moves and 4 knight moves.
    let pawn_moves = moves.iter().filter(|m| m.piece() == Piece::WHITE_PAWN);
    assert_eq!(pawn_moves.count(), 16);
}

#[test]
fn fools_mate_ends_in_checkmate_for_black() {
    let mut game = Game::default();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert_eq!(
        game.game_over(),
        Some(GameOver::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn knight_shuffle_draws_by_threefold_repetition() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"],
    );

    assert_eq!(game.game_over(), Some(GameOver::ThreefoldRepetition));
}

#[test]
fn en_passant_round_trip() {
    let mut game = Game::default();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    let capture = rules::legal_moves(game.latest())
        .into_iter()
        .find(|m| m.to_string() == "e5d6")
        .expect("e5d6 should be legal");
    assert!(capture.is_en_passant());

    game.apply(capture);
    let position = game.latest();
    assert_eq!(position.piece_at(Square::D6), Some(Piece::WHITE_PAWN));
    assert_eq!(position.piece_at(Square::D5), None);
}

#[test]
fn castling_is_blocked_through_an_attacked_square() {
    // The black rook covers f1, which the king crosses castling kingside;
    // queenside stays available.
    let position =
        Position::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();

    let moves: Vec<String> = rules::legal_moves(&position)
        .iter()
        .map(|m| m.to_string())
        .collect();

    assert!(!moves.contains(&"e1g1".to_string()), "moves: {moves:?}");
    assert!(moves.contains(&"e1c1".to_string()), "moves: {moves:?}");
}

#[test]
fn every_legal_move_leaves_the_king_safe() {
    // Spot-check the legality filter across a handful of middlegame and
    // tactical positions.
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1",
        "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ];

    for fen in fens {
        let position = Position::from_fen(fen).unwrap();
        let mover = position.to_move();

        for m in rules::legal_moves(&position) {
            let next = position.successor(m);
            let king = next.king_square(mover).unwrap();
            assert!(
                !rules::is_square_attacked_by(&next, king, mover.flip()),
                "{m} leaves the king attacked in {fen}"
            );
        }
    }
}

#[test]
fn terminal_classification_is_exhaustive_without_moves() {
    // Any position with no legal moves is either checkmate or stalemate.
    let fens = [
        ("4R1k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", true),
        ("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", false),
    ];

    for (fen, expect_mate) in fens {
        let game = Game::new(Position::from_fen(fen).unwrap());
        assert!(rules::legal_moves(game.latest()).is_empty());

        match game.game_over() {
            Some(GameOver::Checkmate { .. }) => assert!(expect_mate, "{fen}"),
            Some(GameOver::Stalemate) => assert!(!expect_mate, "{fen}"),
            other => panic!("{fen} classified as {other:?}"),
        }
    }
}
