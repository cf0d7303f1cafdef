use std::fmt::{self, Display, Write};
use std::str::FromStr;

use thiserror::Error;

/// A single square of the chessboard.
///
/// Stored as an index in `0..64`, with 0 being a1, 7 being h1, and 63 being
/// h8. Ranks and files are numbered 0-7 internally; the conventional names
/// (rank 1-8, file a-h) appear only in the text representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Construct a square from a rank and file, both in `0..8`.
    ///
    /// Returns [`None`] if either coordinate is out of range.
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    /// Construct a square from a rank and file known to be in range.
    ///
    /// Panics if either coordinate is 8 or more. Intended for coordinates
    /// that are literals or already bounds-checked.
    pub const fn at(rank: u8, file: u8) -> Self {
        match Self::new(rank, file) {
            Some(square) => square,
            None => panic!("rank and file must be in 0..8"),
        }
    }

    /// Construct a square from an index in `0..64`.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the index of this square in `0..64`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the rank of this square, in `0..8` (0 is rank 1).
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file of this square, in `0..8` (0 is the a-file).
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Steps from this square by a signed number of ranks and files.
    ///
    /// Returns [`None`] if the step leaves the board. This is the primitive
    /// that ray scans and jump tables are built on.
    pub fn offset(self, ranks: i8, files: i8) -> Option<Self> {
        let rank = self.rank() as i8 + ranks;
        let file = self.file() as i8 + files;

        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Self::at(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// Color parity of the square: 0 for dark squares, 1 for light squares.
    ///
    /// Two squares with equal parity are the same color.
    pub const fn parity(self) -> u8 {
        (self.rank() + self.file()) % 2
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

/// Error produced when parsing a square from coordinate text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a square like `e4`, got {0:?}")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square::at(rank - b'1', file - b'a'))
            }
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.file()) as char)?;
        f.write_char((b'1' + self.rank()) as char)
    }
}

macro_rules! square_consts {
    ($($name:ident => ($rank:expr, $file:expr);)*) => {
        impl Square {
            $(pub const $name: Square = Square::at($rank, $file);)*
        }
    };
}

square_consts! {
    A1 => (0, 0); B1 => (0, 1); C1 => (0, 2); D1 => (0, 3);
    E1 => (0, 4); F1 => (0, 5); G1 => (0, 6); H1 => (0, 7);
    A2 => (1, 0); B2 => (1, 1); C2 => (1, 2); D2 => (1, 3);
    E2 => (1, 4); F2 => (1, 5); G2 => (1, 6); H2 => (1, 7);
    A3 => (2, 0); B3 => (2, 1); C3 => (2, 2); D3 => (2, 3);
    E3 => (2, 4); F3 => (2, 5); G3 => (2, 6); H3 => (2, 7);
    A4 => (3, 0); B4 => (3, 1); C4 => (3, 2); D4 => (3, 3);
    E4 => (3, 4); F4 => (3, 5); G4 => (3, 6); H4 => (3, 7);
    A5 => (4, 0); B5 => (4, 1); C5 => (4, 2); D5 => (4, 3);
    E5 => (4, 4); F5 => (4, 5); G5 => (4, 6); H5 => (4, 7);
    A6 => (5, 0); B6 => (5, 1); C6 => (5, 2); D6 => (5, 3);
    E6 => (5, 4); F6 => (5, 5); G6 => (5, 6); H6 => (5, 7);
    A7 => (6, 0); B7 => (6, 1); C7 => (6, 2); D7 => (6, 3);
    E7 => (6, 4); F7 => (6, 5); G7 => (6, 6); H7 => (6, 7);
    A8 => (7, 0); B8 => (7, 1); C8 => (7, 2); D8 => (7, 3);
    E8 => (7, 4); F8 => (7, 5); G8 => (7, 6); H8 => (7, 7);
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn square_new_accepts_board_coordinates_only() {
        assert_eq!(Square::new(0, 0), Some(Square::A1));
        assert_eq!(Square::new(3, 4), Some(Square::E4));
        assert_eq!(Square::new(7, 7), Some(Square::H8));

        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::new(200, 3), None);
    }

    #[test]
    fn square_rank_and_file_round_trip() {
        for rank in 0..8 {
            for file in 0..8 {
                let square = Square::at(rank, file);
                assert_eq!(square.rank(), rank);
                assert_eq!(square.file(), file);
            }
        }
    }

    #[test]
    fn square_from_index() {
        for index in 0..64 {
            assert_eq!(Square::from_index(index).map(|s| s.index()), Some(index));
        }
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn square_offset_stays_on_the_board() {
        assert_eq!(Square::E4.offset(1, 0), Some(Square::E5));
        assert_eq!(Square::E4.offset(-1, -1), Some(Square::D3));
        assert_eq!(Square::E4.offset(2, 1), Some(Square::F6));

        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H8.offset(1, 0), None);
    }

    #[test]
    fn square_parity_matches_board_coloring() {
        // a1 is a dark square, h1 is light.
        assert_eq!(Square::A1.parity(), 0);
        assert_eq!(Square::H1.parity(), 1);
        assert_eq!(Square::A8.parity(), 1);
        assert_eq!(Square::H8.parity(), 0);
    }

    #[test]
    fn square_display_and_parse_round_trip() {
        for square in Square::all() {
            let text = square.to_string();
            assert_eq!(text.parse(), Ok(square));
        }
    }

    #[test]
    fn square_parse_rejects_garbage() {
        for bad in ["", "e", "e9", "i4", "4e", "e44"] {
            assert!(bad.parse::<Square>().is_err(), "{bad:?} should not parse");
        }
    }
}
