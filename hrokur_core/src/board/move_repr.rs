use std::fmt::{self, Display};

use bitflags::bitflags;

use super::{Piece, PieceType, Square};

bitflags! {
    /// Markers for moves that need special handling when applied.
    ///
    /// At most one of these is set on any move.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct MoveFlags: u8 {
        /// An initial two-square pawn advance, which opens an en passant
        /// opportunity for the opponent.
        const DOUBLE_PAWN_PUSH = 1 << 0;
        /// A castle, encoded as the two-square king move. The rook
        /// relocation is implied.
        const CASTLE           = 1 << 1;
        /// An en passant capture. The captured pawn is not on the
        /// destination square.
        const EN_PASSANT       = 1 << 2;
    }
}

/// A fully described chess move.
///
/// Records everything needed to derive the successor position: the squares,
/// the moving piece, what (if anything) was captured, the chosen promotion,
/// and the special-move markers. Constructed once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    promotion: Option<Piece>,
    flags: MoveFlags,
}

impl Move {
    /// Starts building a move of `piece` from `from` to `to`.
    pub const fn builder(from: Square, to: Square, piece: Piece) -> MoveBuilder {
        MoveBuilder {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    /// The square the piece moved from.
    pub const fn from(self) -> Square {
        self.from
    }

    /// The square the piece moved to.
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece that moved.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The captured piece, if any.
    ///
    /// For an en passant capture the captured pawn stands beside the
    /// destination, on the capturing pawn's starting rank.
    pub const fn captured_piece(self) -> Option<Piece> {
        self.captured
    }

    /// The piece this pawn became, if the move is a promotion.
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    pub const fn flags(self) -> MoveFlags {
        self.flags
    }

    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    pub const fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub const fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    /// True if the moving piece is of the given kind.
    pub const fn is_move_of(self, kind: PieceType) -> bool {
        self.piece.is(kind)
    }

    /// True if the move captures a piece of the given kind.
    pub const fn is_capture_of(self, kind: PieceType) -> bool {
        match self.captured {
            Some(piece) => piece.is(kind),
            None => false,
        }
    }
}

impl Display for Move {
    /// Formats the move in the long algebraic form used on the wire, e.g.
    /// `e2e4` or `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.kind.as_lowercase_char())?;
        }
        Ok(())
    }
}

/// Builder for [`Move`], used by move generation and tests.
#[derive(Debug, Clone, Copy)]
pub struct MoveBuilder {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    promotion: Option<Piece>,
    flags: MoveFlags,
}

impl MoveBuilder {
    pub const fn captures(mut self, piece: Piece) -> Self {
        self.captured = Some(piece);
        self
    }

    pub const fn promotes_to(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }

    pub const fn is_double_pawn_push(mut self) -> Self {
        self.flags = MoveFlags::DOUBLE_PAWN_PUSH;
        self
    }

    pub const fn is_castle(mut self) -> Self {
        self.flags = MoveFlags::CASTLE;
        self
    }

    pub const fn is_en_passant(mut self) -> Self {
        self.flags = MoveFlags::EN_PASSANT;
        self
    }

    pub const fn build(self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            piece: self.piece,
            captured: self.captured,
            promotion: self.promotion,
            flags: self.flags,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn move_accessors_report_builder_inputs() {
        let m = Move::builder(Square::E2, Square::E4, Piece::WHITE_PAWN)
            .is_double_pawn_push()
            .build();

        assert_eq!(m.from(), Square::E2);
        assert_eq!(m.to(), Square::E4);
        assert_eq!(m.piece(), Piece::WHITE_PAWN);
        assert_eq!(m.captured_piece(), None);
        assert_eq!(m.promotion(), None);
        assert!(m.is_double_pawn_push());
        assert!(!m.is_castle());
        assert!(!m.is_en_passant());
        assert!(!m.is_capture());
    }

    #[test]
    fn move_capture_and_promotion() {
        let m = Move::builder(Square::B7, Square::A8, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_ROOK)
            .promotes_to(Piece::WHITE_QUEEN)
            .build();

        assert!(m.is_capture());
        assert!(m.is_capture_of(PieceType::Rook));
        assert!(!m.is_capture_of(PieceType::Queen));
        assert_eq!(m.promotion(), Some(Piece::WHITE_QUEEN));
        assert!(m.is_move_of(PieceType::Pawn));
    }

    #[test]
    fn move_display_is_long_algebraic() {
        let quiet = Move::builder(Square::G1, Square::F3, Piece::WHITE_KNIGHT).build();
        assert_eq!(quiet.to_string(), "g1f3");

        let promo = Move::builder(Square::E7, Square::E8, Piece::WHITE_PAWN)
            .promotes_to(Piece::WHITE_QUEEN)
            .build();
        assert_eq!(promo.to_string(), "e7e8q");
    }

    #[test]
    fn en_passant_capture_flags() {
        let m = Move::builder(Square::E5, Square::D6, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_PAWN)
            .is_en_passant()
            .build();

        assert!(m.is_en_passant());
        assert!(m.is_capture());
    }
}
