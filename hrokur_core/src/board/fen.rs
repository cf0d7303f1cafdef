use thiserror::Error;

use super::{Castling, Color, Piece, PieceType, Position, Square};

/// Error produced when a FEN string fails to parse or validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("expected 6 fields, got {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks, got {0}")]
    WrongRankCount(usize),
    #[error("rank {0:?} does not describe exactly 8 squares")]
    BadRankWidth(String),
    #[error("{0:?} is not a piece letter or empty-run digit")]
    BadPieceChar(char),
    #[error("side to move must be `w` or `b`, got {0:?}")]
    BadSideToMove(String),
    #[error("{0:?} is not a castling rights field")]
    BadCastling(String),
    #[error("{0:?} is not an en passant target field")]
    BadEnPassant(String),
    #[error("en passant target {0} is not on rank 3 or 6")]
    EnPassantOffTargetRank(Square),
    #[error("{0:?} is not a halfmove clock")]
    BadHalfmoveClock(String),
    #[error("halfmove clock {0} is out of range 0-100")]
    HalfmoveClockOutOfRange(u32),
    #[error("{0:?} is not a fullmove number")]
    BadFullmoveNumber(String),
    #[error("expected exactly one {0:?} king, got {1}")]
    WrongKingCount(Color, u8),
    #[error("{0:?} has {1} pawns (at most 8)")]
    TooManyPawns(Color, u8),
    #[error("{0:?} has more extra pieces than promoted pawns could supply")]
    TooManyPieces(Color),
}

pub(crate) fn parse_fen(fen: &str) -> Result<Position, FenParseError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [placement, side, castling, en_passant, halfmove_clock, fullmoves] = fields[..] else {
        return Err(FenParseError::WrongFieldCount(fields.len()));
    };

    let board = parse_placement(placement)?;
    validate_material(&board)?;

    let to_move = match side {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(FenParseError::BadSideToMove(side.to_string())),
    };

    let castling = Castling::from_fen_field(castling)
        .ok_or_else(|| FenParseError::BadCastling(castling.to_string()))?;

    let en_passant = match en_passant {
        "-" => None,
        text => {
            let square: Square = text
                .parse()
                .map_err(|_| FenParseError::BadEnPassant(text.to_string()))?;
            if !matches!(square.rank(), 2 | 5) {
                return Err(FenParseError::EnPassantOffTargetRank(square));
            }
            Some(square)
        }
    };

    let halfmove_clock: u32 = halfmove_clock
        .parse()
        .map_err(|_| FenParseError::BadHalfmoveClock(halfmove_clock.to_string()))?;
    if halfmove_clock > 100 {
        return Err(FenParseError::HalfmoveClockOutOfRange(halfmove_clock));
    }

    let fullmoves: u32 = fullmoves
        .parse()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| FenParseError::BadFullmoveNumber(fullmoves.to_string()))?;

    Ok(Position::new(
        board,
        to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmoves,
    ))
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenParseError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::WrongRankCount(ranks.len()));
    }

    let mut board = [None; 64];

    // FEN lists ranks from 8 down to 1.
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for c in rank_text.chars() {
            match c {
                '1'..='8' => file += c as u8 - b'0',
                _ => {
                    let piece = Piece::try_from_fen_char(c)
                        .ok_or(FenParseError::BadPieceChar(c))?;
                    if file >= 8 {
                        return Err(FenParseError::BadRankWidth(rank_text.to_string()));
                    }
                    board[Square::at(rank, file).index()] = Some(piece);
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::BadRankWidth(rank_text.to_string()));
        }
    }

    Ok(board)
}

/// Rejects boards outside physical material limits: exactly one king each,
/// at most 8 pawns per side, and no more pieces beyond the starting set
/// than the missing pawns could have promoted into.
fn validate_material(board: &[Option<Piece>; 64]) -> Result<(), FenParseError> {
    for color in [Color::White, Color::Black] {
        let count = |kind| {
            board
                .iter()
                .flatten()
                .filter(|piece| piece.color == color && piece.is(kind))
                .count() as u8
        };

        let kings = count(PieceType::King);
        if kings != 1 {
            return Err(FenParseError::WrongKingCount(color, kings));
        }

        let pawns = count(PieceType::Pawn);
        if pawns > 8 {
            return Err(FenParseError::TooManyPawns(color, pawns));
        }

        let starting_set = [
            (PieceType::Knight, 2),
            (PieceType::Bishop, 2),
            (PieceType::Rook, 2),
            (PieceType::Queen, 1),
        ];
        let extras: u8 = starting_set
            .iter()
            .map(|&(kind, base)| count(kind).saturating_sub(base))
            .sum();
        if extras > 8 - pawns {
            return Err(FenParseError::TooManyPieces(color));
        }
    }

    Ok(())
}

pub(crate) fn format_fen(position: &Position) -> String {
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty_run = 0;
        for file in 0..8 {
            match position.piece_at(Square::at(rank, file)) {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        fen.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    fen.push(piece.as_fen_char());
                }
            }
        }
        if empty_run > 0 {
            fen.push((b'0' + empty_run) as char);
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(if position.to_move().is_white() { 'w' } else { 'b' });

    fen.push(' ');
    fen.push_str(&position.castling().to_string());

    fen.push(' ');
    match position.en_passant() {
        Some(square) => fen.push_str(&square.to_string()),
        None => fen.push('-'),
    }

    fen.push(' ');
    fen.push_str(&position.halfmove_clock().to_string());
    fen.push(' ');
    fen.push_str(&position.fullmoves().to_string());

    fen
}
