use std::fmt::{self, Display};
use std::time::Duration;

use hrokur_core::board::UciMove;
use hrokur_engine::{Score, SearchInfo};
use nom::{
    branch::alt,
    combinator::rest,
    multi::many1,
    sequence::preceded,
    IResult, Parser,
};
use nom_permutation::permutation_opt;

use crate::format_utils::SpaceSepFormatter;
use crate::parsing::utils::{
    token_i32, token_millis, token_tag, token_u32, token_u64, token_uci_move,
};

/// An `info` line: the fields this engine emits while searching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UciInfo {
    pub depth: Option<u32>,
    pub time: Option<Duration>,
    pub nodes: Option<u64>,
    pub nps: Option<u64>,
    pub score: Option<UciInfoScore>,
    pub pv: Vec<UciMove>,
    pub string: Option<String>,
}

impl UciInfo {
    /// An `info string …` message.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            string: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn parser(input: &str) -> IResult<&str, Self> {
        permutation_opt((
            preceded(token_tag("depth"), token_u32),
            preceded(token_tag("time"), token_millis),
            preceded(token_tag("nodes"), token_u64),
            preceded(token_tag("nps"), token_u64),
            preceded(token_tag("score"), UciInfoScore::parser),
            preceded(token_tag("pv"), many1(token_uci_move)),
            preceded(token_tag("string"), rest.map(str::trim)),
        ))
        .map(|(depth, time, nodes, nps, score, pv, string)| Self {
            depth,
            time: time.flatten(),
            nodes,
            nps,
            score,
            pv: pv.unwrap_or_default(),
            string: string.map(|s| s.to_string()),
        })
        .parse(input)
    }
}

impl Display for UciInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = SpaceSepFormatter::new(f);

        out.push_option("depth", self.depth)?;
        out.push_option("time", self.time.map(|d| d.as_millis()))?;
        out.push_option("nodes", self.nodes)?;
        out.push_option("nps", self.nps)?;
        out.push_option("score", self.score.as_ref())?;

        if !self.pv.is_empty() {
            out.push_str("pv")?;
            for m in &self.pv {
                out.push(m)?;
            }
        }

        // `string` swallows the rest of the line, so it always goes last.
        out.push_option("string", self.string.as_ref())
    }
}

impl From<&SearchInfo> for UciInfo {
    fn from(info: &SearchInfo) -> Self {
        let millis = info.elapsed.as_millis().max(1) as u64;

        Self {
            depth: Some(info.depth),
            time: Some(info.elapsed),
            nodes: Some(info.nodes),
            nps: Some(info.nodes * 1000 / millis),
            score: Some(info.score.into()),
            pv: info.pv.iter().map(|&m| m.into()).collect(),
            string: None,
        }
    }
}

/// The `score` field of an `info` line: centipawns or moves-to-mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciInfoScore {
    Centipawns(i32),
    Mate(i32),
}

impl UciInfoScore {
    pub fn parser(input: &str) -> IResult<&str, Self> {
        alt((
            preceded(token_tag("cp"), token_i32).map(Self::Centipawns),
            preceded(token_tag("mate"), token_i32).map(Self::Mate),
        ))(input)
    }
}

impl Display for UciInfoScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciInfoScore::Centipawns(cp) => write!(f, "cp {cp}"),
            UciInfoScore::Mate(moves) => write!(f, "mate {moves}"),
        }
    }
}

impl From<Score> for UciInfoScore {
    fn from(score: Score) -> Self {
        match score.mate_distance_moves() {
            Some(moves) => Self::Mate(moves),
            None => Self::Centipawns(score.0),
        }
    }
}
