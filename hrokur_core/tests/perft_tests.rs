use hrokur_core::board::Position;
use hrokur_core::perft::perft;

#[test]
fn perft_from_the_starting_position() {
    let start = Position::starting_position();

    assert_eq!(perft(&start, 1), 20);
    assert_eq!(perft(&start, 2), 400);
    assert_eq!(perft(&start, 3), 8_902);
    assert_eq!(perft(&start, 4), 197_281);
}

#[test]
fn perft_exercises_castling() {
    // A rook endgame with all castling rights live, counted by hand.
    let position =
        Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    // 5 king moves + 2 castles + 10 a-rook moves + 9 h-rook moves.
    assert_eq!(perft(&position, 1), 26);
}

#[test]
fn perft_counts_promotions() {
    let position =
        Position::from_fen("n3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    // b7b8 and b7xa8, four promotion pieces each, plus five king moves.
    assert_eq!(perft(&position, 1), 13);
}

#[test]
fn perft_counts_en_passant() {
    let position =
        Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();

    let moves: Vec<String> = hrokur_core::rules::legal_moves(&position)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert!(moves.contains(&"e5d6".to_string()), "moves: {moves:?}");
    assert!(moves.contains(&"e5e6".to_string()));
}
