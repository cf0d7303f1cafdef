//! The position model: squares, pieces, moves, castling rights, FEN and
//! Zobrist hashing.

mod castling;
mod fen;
mod move_repr;
mod piece;
mod square;
mod uci_move;
mod zobrist;

use std::fmt::{self, Display};

pub use castling::Castling;
pub use fen::FenParseError;
pub use move_repr::{Move, MoveBuilder, MoveFlags};
pub use piece::{Color, Piece, PieceType};
pub use square::{ParseSquareError, Square};
pub use uci_move::{ParseUciMoveError, UciMove};
pub use zobrist::ZobristHash;

use crate::rules;

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A complete chess position.
///
/// Carries everything needed to decide the legality of the next move: piece
/// placement, side to move, castling rights, the en passant target (set iff
/// the previous move was a double pawn push), the half-move clock and the
/// full-move number, plus a cached Zobrist fingerprint of the
/// repetition-relevant state.
///
/// `Position` is a value type. Successors are derived with
/// [`Position::successor`]; a position is never mutated once it is part of a
/// [`Game`](crate::game::Game) history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    to_move: Color,
    castling: Castling,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
    hash: ZobristHash,
}

impl Position {
    pub fn new(
        board: [Option<Piece>; 64],
        to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Self {
        let mut position = Self {
            board,
            to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
            hash: ZobristHash::EMPTY,
        };
        position.hash = position.compute_hash();
        position
    }

    /// The standard starting position.
    pub fn starting_position() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting position FEN is valid")
    }

    /// Parses and validates a 6-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        fen::parse_fen(fen)
    }

    /// Renders this position as a FEN string.
    pub fn fen(&self) -> String {
        fen::format_fen(self)
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    /// The square a pawn may be captured onto en passant, if the previous
    /// move was a double pawn push.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move, for the fifty-move rule.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Full moves since the start of the game, starting at 1.
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// The cached Zobrist fingerprint of this position.
    pub fn hash(&self) -> ZobristHash {
        self.hash
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Iterates over every piece on the board with its square.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (piece, square)))
    }

    /// Finds the king of the given color.
    ///
    /// Every position that passed FEN validation has exactly one king per
    /// side, so this only returns [`None`] for hand-built boards.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(piece, _)| piece == Piece::new(color, PieceType::King))
            .map(|(_, square)| square)
    }

    /// Finds the legal move matching a source square, destination square and
    /// promotion choice, as received over the wire.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Option<Move> {
        rules::legal_moves(self)
            .into_iter()
            .find(|m| {
                m.from() == from
                    && m.to() == to
                    && m.promotion().map(|piece| piece.kind) == promotion
            })
    }

    /// Finds the legal move matching a wire-format move.
    pub fn find_uci_move(&self, uci: UciMove) -> Option<Move> {
        self.find_move(uci.from, uci.to, uci.promotion)
    }

    /// Derives the position after `m` is played.
    ///
    /// Assumes `m` is a legal move of this position; the caller is expected
    /// to have taken it from [`rules::legal_moves`] or [`Self::find_move`].
    pub fn successor(&self, m: Move) -> Self {
        let mut next = self.clone();
        next.make_move(m);
        next
    }

    fn make_move(&mut self, m: Move) {
        let placed = m.promotion().unwrap_or_else(|| m.piece());

        self.board[m.from().index()] = None;
        if m.is_en_passant() {
            // The captured pawn is beside the destination, on the rank the
            // capturing pawn started from.
            let captured = Square::at(m.from().rank(), m.to().file());
            self.board[captured.index()] = None;
        }
        self.board[m.to().index()] = Some(placed);

        if m.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(m.to());
            let rook = self.board[rook_from.index()].take();
            self.board[rook_to.index()] = rook;
        }

        self.castling.remove(rights_removed_by(m));

        self.en_passant = if m.is_double_pawn_push() {
            let rank = (m.from().rank() + m.to().rank()) / 2;
            Some(Square::at(rank, m.from().file()))
        } else {
            None
        };

        if m.is_capture() || m.is_move_of(PieceType::Pawn) {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.to_move.is_black() {
            self.fullmoves += 1;
        }
        self.to_move = self.to_move.flip();

        self.hash = self.compute_hash();
    }

    fn compute_hash(&self) -> ZobristHash {
        let mut hash = ZobristHash::EMPTY;
        for (piece, square) in self.pieces() {
            hash ^= ZobristHash::piece(piece, square);
        }
        hash ^ ZobristHash::side_to_move(self.to_move)
            ^ ZobristHash::castling(self.castling)
            ^ ZobristHash::en_passant(self.en_passant)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::at(rank, file)) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{:?} to move", self.to_move)
    }
}

/// Where the rook stands before and after a castle, given the king's
/// destination square.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    match king_to.file() {
        // Kingside: rook hops from the h-file to the f-file.
        6 => (Square::at(rank, 7), Square::at(rank, 5)),
        // Queenside: rook hops from the a-file to the d-file.
        2 => (Square::at(rank, 0), Square::at(rank, 3)),
        _ => unreachable!("castle destination must be on the c- or g-file"),
    }
}

fn rights_removed_by(m: Move) -> Castling {
    let mut removed = Castling::empty();

    if m.is_move_of(PieceType::King) {
        removed |= Castling::for_color(m.piece().color);
    } else if m.is_move_of(PieceType::Rook) {
        removed |= rook_home_right(m.from());
    }

    if m.is_capture_of(PieceType::Rook) {
        removed |= rook_home_right(m.to());
    }

    removed
}

fn rook_home_right(square: Square) -> Castling {
    match square {
        Square::A1 => Castling::WHITE_QUEENSIDE,
        Square::H1 => Castling::WHITE_KINGSIDE,
        Square::A8 => Castling::BLACK_QUEENSIDE,
        Square::H8 => Castling::BLACK_KINGSIDE,
        _ => Castling::empty(),
    }
}
