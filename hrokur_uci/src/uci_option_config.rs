use std::fmt::{self, Display};

use nom::{
    branch::alt,
    combinator::{map_opt, opt, rest},
    sequence::{preceded, tuple},
    IResult, Parser,
};

use crate::format_utils::SpaceSepFormatter;
use crate::parsing::utils::{take_tokens_till, take_tokens_until, token_i64, token_tag};

/// An `option` declaration, as advertised in the `uci` handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOptionConfig {
    Check {
        name: String,
        default: Option<bool>,
    },
    Spin {
        name: String,
        default: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    },
    String {
        name: String,
        default: Option<String>,
    },
}

impl UciOptionConfig {
    pub fn name(&self) -> &str {
        match self {
            UciOptionConfig::Check { name, .. }
            | UciOptionConfig::Spin { name, .. }
            | UciOptionConfig::String { name, .. } => name,
        }
    }

    pub fn parser(input: &str) -> IResult<&str, Self> {
        let fields = tuple((
            preceded(token_tag("name"), take_tokens_till(token_tag("type"))),
            preceded(
                token_tag("type"),
                alt((
                    token_tag("check"),
                    token_tag("spin"),
                    token_tag("string"),
                )),
            ),
            opt(preceded(
                token_tag("default"),
                alt((
                    take_tokens_until(token_tag("min")),
                    take_tokens_until(token_tag("max")),
                    rest.map(str::trim),
                )),
            )),
            opt(preceded(token_tag("min"), token_i64)),
            opt(preceded(token_tag("max"), token_i64)),
        ));

        map_opt(fields, |(name, kind, default, min, max)| {
            Self::from_raw(name, kind, default, min, max)
        })(input)
    }

    fn from_raw(
        name: &str,
        kind: &str,
        default: Option<&str>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Option<Self> {
        let name = name.to_string();

        Some(match kind {
            "check" => Self::Check {
                name,
                default: default.and_then(|d| match d {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }),
            },
            "spin" => Self::Spin {
                name,
                default: default.and_then(|d| d.parse().ok()),
                min,
                max,
            },
            "string" => Self::String {
                name,
                default: default.map(|d| d.to_string()),
            },
            _ => return None,
        })
    }
}

impl Display for UciOptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = SpaceSepFormatter::new(f);

        match self {
            UciOptionConfig::Check { name, default } => {
                out.push_pair("name", name)?;
                out.push_pair("type", &"check")?;
                out.push_option("default", *default)
            }
            UciOptionConfig::Spin {
                name,
                default,
                min,
                max,
            } => {
                out.push_pair("name", name)?;
                out.push_pair("type", &"spin")?;
                out.push_option("default", *default)?;
                out.push_option("min", *min)?;
                out.push_option("max", *max)
            }
            UciOptionConfig::String { name, default } => {
                out.push_pair("name", name)?;
                out.push_pair("type", &"string")?;
                out.push_option("default", default.as_ref())
            }
        }
    }
}
