//! Token-level nom helpers shared by the message parsers.
//!
//! UCI lines are whitespace-separated token streams; these combinators lift
//! nom's character-level parsers to operate one token at a time.

use std::str::FromStr;
use std::time::Duration;

use hrokur_core::board::UciMove;
use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{i32, i64, space0, space1, u32, u64},
    combinator::{eof, fail},
    error::{Error, ErrorKind, ParseError},
    error_position, IResult, Parser,
};

/// Consumes one whitespace-delimited token, along with surrounding spaces.
pub fn token(input: &str) -> IResult<&str, &str> {
    let (input, _) = space0(input)?;
    let (input, word) = take_till1(|c: char| c.is_whitespace())(input)?;
    let (input, _) = alt((space1, eof))(input)?;

    Ok((input, word))
}

/// Succeeds only if the next token equals `expected`.
pub fn token_tag(expected: &str) -> impl Fn(&str) -> IResult<&str, &str> + '_ {
    move |input: &str| {
        let (rest, word) = token(input)?;
        if word == expected {
            Ok((rest, word))
        } else {
            Err(nom::Err::Error(error_position!(input, ErrorKind::Tag)))
        }
    }
}

/// Applies `parser` to the next token; the token must be consumed whole.
pub fn tokenize<'a, O>(
    mut parser: impl Parser<&'a str, O, Error<&'a str>>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    move |input: &str| {
        let (rest, word) = token(input)?;
        match parser.parse(word) {
            Ok(("", value)) => Ok((rest, value)),
            _ => Err(nom::Err::Error(Error::from_error_kind(
                input,
                ErrorKind::Verify,
            ))),
        }
    }
}

/// Collects tokens until `recognizer` matches, without consuming the match.
/// Fails if the input runs out first.
pub fn take_tokens_until<'a, E: ParseError<&'a str>>(
    mut recognizer: impl Parser<&'a str, &'a str, E>,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |original: &str| {
        let mut input = original;

        while !input.is_empty() {
            if recognizer.parse(input).is_ok() {
                let consumed = original.len() - input.len();
                return Ok((input, original[..consumed].trim()));
            }
            let (rest, _) = token(input)?;
            input = rest;
        }

        fail(original)
    }
}

/// Collects tokens until `recognizer` matches or the input ends.
pub fn take_tokens_till<'a, E: ParseError<&'a str>>(
    recognizer: impl Parser<&'a str, &'a str, E>,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    alt((take_tokens_until(recognizer), nom::combinator::rest.map(str::trim)))
}

pub fn token_i32(input: &str) -> IResult<&str, i32> {
    tokenize(i32)(input)
}

pub fn token_i64(input: &str) -> IResult<&str, i64> {
    tokenize(i64)(input)
}

pub fn token_u32(input: &str) -> IResult<&str, u32> {
    tokenize(u32)(input)
}

pub fn token_u64(input: &str) -> IResult<&str, u64> {
    tokenize(u64)(input)
}

/// Parses a millisecond count into a [`Duration`].
///
/// Some GUIs send negative clock values; those parse successfully but carry
/// no duration.
pub fn token_millis(input: &str) -> IResult<&str, Option<Duration>> {
    let (input, millis) = tokenize(i64)(input)?;
    if millis < 0 {
        Ok((input, None))
    } else {
        Ok((input, Some(Duration::from_millis(millis as u64))))
    }
}

/// Parses the next token as a long algebraic move.
pub fn token_uci_move(input: &str) -> IResult<&str, UciMove> {
    let (rest, word) = token(input)?;
    match UciMove::from_str(word) {
        Ok(m) => Ok((rest, m)),
        Err(_) => Err(nom::Err::Error(error_position!(input, ErrorKind::Verify))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hrokur_core::board::Square;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_splits_on_whitespace() {
        assert_eq!(token("go depth 3"), Ok(("depth 3", "go")));
        assert_eq!(token("  padded   out  "), Ok(("out  ", "padded")));
        assert_eq!(token("last"), Ok(("", "last")));
        assert!(token("   ").is_err());
        assert!(token("").is_err());
    }

    #[test]
    fn token_tag_matches_exactly() {
        assert_eq!(token_tag("go")("go depth 3"), Ok(("depth 3", "go")));
        assert!(token_tag("go")("going 3").is_err());
        assert!(token_tag("go")("stop").is_err());
    }

    #[test]
    fn tokenize_requires_the_whole_token() {
        assert_eq!(token_u32("42 rest"), Ok(("rest", 42)));
        assert!(token_u32("42x rest").is_err());
        assert!(token_u32("x42").is_err());
    }

    #[test]
    fn take_tokens_until_stops_before_the_marker() {
        let mut parser = take_tokens_until::<nom::error::Error<&str>>(token_tag("value"));
        assert_eq!(
            parser("Clear Hash value true"),
            Ok(("value true", "Clear Hash"))
        );
        assert!(parser("no marker here").is_err());
    }

    #[test]
    fn take_tokens_till_accepts_missing_marker() {
        let mut parser = take_tokens_till::<nom::error::Error<&str>>(token_tag("value"));
        assert_eq!(parser("no marker here"), Ok(("", "no marker here")));
    }

    #[test]
    fn millis_tokens() {
        assert_eq!(
            token_millis("1500"),
            Ok(("", Some(Duration::from_millis(1500))))
        );
        assert_eq!(token_millis("-20"), Ok(("", None)));
        assert!(token_millis("soon").is_err());
    }

    #[test]
    fn uci_move_tokens() {
        let (rest, m) = token_uci_move("e2e4 e7e5").unwrap();
        assert_eq!(rest, "e7e5");
        assert_eq!(m, UciMove::new(Square::E2, Square::E4));

        assert!(token_uci_move("notamove").is_err());
    }
}
