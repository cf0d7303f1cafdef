use std::fmt::{self, Display, Write};
use std::str::FromStr;

use thiserror::Error;

use super::{Move, PieceType, Square};

/// A move in the wire format of the Universal Chess Interface.
///
/// Only the source square, destination square and optional promotion are
/// carried, e.g. `e2e4`, `e1g1` (castling as a king move), `e7e8q`. Mapping
/// this onto a real [`Move`] requires a position; see
/// [`Position::find_move`](super::Position::find_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl UciMove {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn new_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Error produced when text is not a long algebraic move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUciMoveError {
    #[error("expected 4 or 5 characters, got {0}")]
    WrongLength(usize),
    #[error("{0} is not a square")]
    BadSquare(String),
    #[error("{0:?} is not a promotion piece")]
    BadPromotion(char),
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !matches!(s.len(), 4 | 5) || !s.is_ascii() {
            return Err(ParseUciMoveError::WrongLength(s.chars().count()));
        }

        let square = |text: &str| {
            text.parse::<Square>()
                .map_err(|_| ParseUciMoveError::BadSquare(text.to_string()))
        };

        let from = square(&s[0..2])?;
        let to = square(&s[2..4])?;

        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match c {
                'q' => Some(PieceType::Queen),
                'r' => Some(PieceType::Rook),
                'b' => Some(PieceType::Bishop),
                'n' => Some(PieceType::Knight),
                _ => return Err(ParseUciMoveError::BadPromotion(c)),
            },
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

impl From<Move> for UciMove {
    fn from(m: Move) -> Self {
        Self {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion().map(|piece| piece.kind),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_quiet_moves() {
        assert_eq!("e2e4".parse(), Ok(UciMove::new(Square::E2, Square::E4)));
        assert_eq!("g8f6".parse(), Ok(UciMove::new(Square::G8, Square::F6)));
    }

    #[test]
    fn parse_promotions() {
        let cases = [
            ("e7e8q", PieceType::Queen),
            ("e7e8r", PieceType::Rook),
            ("a2a1b", PieceType::Bishop),
            ("a2a1n", PieceType::Knight),
        ];

        for (text, promotion) in cases {
            let parsed: UciMove = text.parse().unwrap();
            assert_eq!(parsed.promotion, Some(promotion));
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            UciMove::from_str("e2"),
            Err(ParseUciMoveError::WrongLength(2))
        );
        assert_eq!(
            UciMove::from_str("e2e4e5"),
            Err(ParseUciMoveError::WrongLength(6))
        );
        assert_eq!(
            UciMove::from_str("z2e4"),
            Err(ParseUciMoveError::BadSquare("z2".to_string()))
        );
        assert_eq!(
            UciMove::from_str("e2e9"),
            Err(ParseUciMoveError::BadSquare("e9".to_string()))
        );
        assert_eq!(
            UciMove::from_str("e7e8k"),
            Err(ParseUciMoveError::BadPromotion('k'))
        );
    }

    #[test]
    fn display_round_trip() {
        for text in ["e2e4", "e1g1", "e7e8q", "b2a1n"] {
            let parsed: UciMove = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }
}
