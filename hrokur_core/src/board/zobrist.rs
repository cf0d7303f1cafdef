use std::fmt::{self, Debug};
use std::ops::{BitXor, BitXorAssign};
use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};

use super::{Castling, Color, Piece, Square};

/// A 64-bit Zobrist fingerprint of a position.
///
/// Built by XOR-ing per-feature random keys for piece placement, side to
/// move, castling rights and the en passant file. The half-move clock and
/// move number are deliberately not hashed, so positions that repeat for
/// the purposes of the threefold rule hash identically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZobristHash(pub u64);

impl ZobristHash {
    pub const EMPTY: Self = Self(0);

    /// Key for `piece` standing on `square`.
    pub fn piece(piece: Piece, square: Square) -> Self {
        Self(keys().piece_square[piece.table_index()][square.index()])
    }

    /// Key for the side to move. White contributes nothing.
    pub fn side_to_move(color: Color) -> Self {
        match color {
            Color::White => Self::EMPTY,
            Color::Black => Self(keys().black_to_move),
        }
    }

    /// Key for a castling-rights state.
    pub fn castling(castling: Castling) -> Self {
        Self(keys().castling[castling.bits() as usize])
    }

    /// Key for an en passant target, keyed by file.
    pub fn en_passant(target: Option<Square>) -> Self {
        match target {
            Some(square) => Self(keys().en_passant_file[square.file() as usize]),
            None => Self::EMPTY,
        }
    }
}

impl BitXor for ZobristHash {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for ZobristHash {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Debug for ZobristHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZobristHash({:#018x})", self.0)
    }
}

struct ZobristKeys {
    piece_square: [[u64; 64]; 12],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> Self {
        // Fixed seed so hashes are stable across runs and threads.
        let mut rng = rand_chacha::ChaCha12Rng::from_seed([
            0x68, 0x72, 0x6f, 0x6b, 0x75, 0x72, 0x20, 0x7a, 0x6f, 0x62, 0x72, 0x69, 0x73, 0x74,
            0x20, 0x6b, 0x65, 0x79, 0x73, 0x20, 0x76, 0x31, 0x2e, 0x30, 0x9e, 0x37, 0x79, 0xb9,
            0x7f, 0x4a, 0x7c, 0x15,
        ]);

        let mut piece_square = [[0u64; 64]; 12];
        for per_piece in piece_square.iter_mut() {
            per_piece.fill_with(|| rng.next_u64());
        }

        let black_to_move = rng.next_u64();

        let mut castling = [0u64; 16];
        castling.fill_with(|| rng.next_u64());

        let mut en_passant_file = [0u64; 8];
        en_passant_file.fill_with(|| rng.next_u64());

        Self {
            piece_square,
            black_to_move,
            castling,
            en_passant_file,
        }
    }
}

fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(ZobristKeys::generate)
}
