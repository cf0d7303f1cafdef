use std::fmt::{self, Display};

use bitflags::bitflags;

use super::Color;

bitflags! {
    /// Castling rights still held by either player.
    ///
    /// A right is held as long as the king and the corresponding rook have
    /// not moved (and the rook has not been captured on its home square).
    /// Whether a castle is actually playable right now — empty squares
    /// between king and rook, no checks along the king's path — is a
    /// property of the position and is decided during move generation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Castling: u8 {
        const WHITE_KINGSIDE  = 1 << 0;
        const WHITE_QUEENSIDE = 1 << 1;
        const BLACK_KINGSIDE  = 1 << 2;
        const BLACK_QUEENSIDE = 1 << 3;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for Castling {
    fn default() -> Self {
        Self::all()
    }
}

impl Castling {
    /// Both rights of the given player.
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE,
            Color::Black => Self::BLACK,
        }
    }

    /// The kingside right of the given player.
    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    /// The queenside right of the given player.
    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Parses the third FEN field (`KQkq`, any subset, or `-`).
    pub fn from_fen_field(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::empty());
        }

        let mut rights = Self::empty();
        for c in field.chars() {
            rights |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
        }
        Some(rights)
    }
}

impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for (right, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn castling_default_is_all_rights() {
        assert_eq!(Castling::default(), Castling::all());
    }

    #[test]
    fn castling_fen_field_round_trip() {
        for field in ["-", "K", "Qk", "KQkq", "Kkq", "q"] {
            let rights = Castling::from_fen_field(field).unwrap();
            assert_eq!(rights.to_string(), field);
        }
    }

    #[test]
    fn castling_fen_field_rejects_unknown_letters() {
        assert_eq!(Castling::from_fen_field("KA"), None);
        assert_eq!(Castling::from_fen_field("kqx"), None);
        assert_eq!(Castling::from_fen_field("--"), None);
    }

    #[test]
    fn castling_per_color_helpers() {
        assert_eq!(
            Castling::for_color(Color::White),
            Castling::WHITE_KINGSIDE | Castling::WHITE_QUEENSIDE
        );
        assert_eq!(Castling::kingside(Color::Black), Castling::BLACK_KINGSIDE);
        assert_eq!(Castling::queenside(Color::Black), Castling::BLACK_QUEENSIDE);
    }
}
