use std::fmt::{self, Display};
use std::ops::Neg;

/// A search score, from the perspective of the side to move.
///
/// Ordinary scores are centipawns. Mate scores are encoded as
/// `±(MATE - plies_to_mate)`, so a shorter mate always compares better than
/// a longer one, and any mate outranks any material score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(pub i32);

impl Score {
    /// Larger than any reachable score; the initial alpha-beta window.
    pub const INF: Self = Self(1_000_000);

    pub const DRAW: Self = Self(0);

    const MATE: i32 = 100_000;
    const MATE_THRESHOLD: i32 = 90_000;

    /// The score of a position in which the side to move is checkmated,
    /// `ply` plies below the root.
    pub const fn mated_in(ply: u32) -> Self {
        Self(-(Self::MATE - ply as i32))
    }

    /// The score of delivering checkmate `ply` plies below the root.
    pub const fn mate_in(ply: u32) -> Self {
        Self(Self::MATE - ply as i32)
    }

    pub const fn is_mate(self) -> bool {
        self.0.abs() > Self::MATE_THRESHOLD
    }

    /// Signed distance to mate in plies: positive when the side to move is
    /// mating, negative when it is being mated. [`None`] for non-mate
    /// scores.
    pub const fn mate_distance_plies(self) -> Option<i32> {
        if self.is_mate() {
            Some(self.0.signum() * (Self::MATE - self.0.abs()))
        } else {
            None
        }
    }

    /// Signed distance to mate in full moves, as reported in UCI
    /// `score mate` fields.
    pub const fn mate_distance_moves(self) -> Option<i32> {
        match self.mate_distance_plies() {
            Some(plies) => Some(plies.signum() * (plies.abs() + 1) / 2),
            None => None,
        }
    }

    /// The score in centipawns, or [`None`] for mate scores.
    pub const fn as_centipawns(self) -> Option<i32> {
        if self.is_mate() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl Neg for Score {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_distance_moves() {
            Some(moves) => write!(f, "mate {moves}"),
            None => write!(f, "cp {}", self.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shorter_mates_score_higher() {
        assert!(Score::mate_in(1) > Score::mate_in(3));
        assert!(Score::mate_in(3) > Score(500));
        assert!(Score::mated_in(2) < Score(-500));
        assert!(Score::mated_in(2) < Score::mated_in(4));
    }

    #[test]
    fn negation_flips_the_mating_side() {
        assert_eq!(-Score::mated_in(3), Score::mate_in(3));
        assert_eq!(-Score(120), Score(-120));
    }

    #[test]
    fn mate_distances() {
        assert_eq!(Score::mate_in(1).mate_distance_plies(), Some(1));
        assert_eq!(Score::mated_in(4).mate_distance_plies(), Some(-4));
        assert_eq!(Score(300).mate_distance_plies(), None);

        // Plies convert to full moves rounding up.
        assert_eq!(Score::mate_in(1).mate_distance_moves(), Some(1));
        assert_eq!(Score::mate_in(3).mate_distance_moves(), Some(2));
        assert_eq!(Score::mated_in(2).mate_distance_moves(), Some(-1));
    }

    #[test]
    fn display_uses_uci_score_fields() {
        assert_eq!(Score(42).to_string(), "cp 42");
        assert_eq!(Score(-815).to_string(), "cp -815");
        assert_eq!(Score::mate_in(3).to_string(), "mate 2");
        assert_eq!(Score::mated_in(2).to_string(), "mate -1");
    }

    #[test]
    fn centipawn_conversion_excludes_mates() {
        assert_eq!(Score(250).as_centipawns(), Some(250));
        assert_eq!(Score::mate_in(5).as_centipawns(), None);
    }
}
