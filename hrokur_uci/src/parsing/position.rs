use nom::{
    branch::alt,
    combinator::{opt, value},
    multi::{count, many0},
    sequence::preceded,
    IResult,
};

use crate::uci_position::{UciPositionBase, UciPositionSpec};

use super::utils::{token, token_tag, token_uci_move};

pub fn position_body(input: &str) -> IResult<&str, UciPositionSpec> {
    let (input, base) = position_base(input)?;
    let (input, moves) = opt(preceded(token_tag("moves"), many0(token_uci_move)))(input)?;

    Ok((
        input,
        UciPositionSpec {
            base,
            moves: moves.unwrap_or_default(),
        },
    ))
}

fn position_base(input: &str) -> IResult<&str, UciPositionBase> {
    alt((
        value(UciPositionBase::StartPos, token_tag("startpos")),
        fen_base,
    ))(input)
}

fn fen_base(input: &str) -> IResult<&str, UciPositionBase> {
    let (input, _) = token_tag("fen")(input)?;
    let (input, fields) = count(token, 6)(input)?;

    Ok((input, UciPositionBase::Fen(fields.join(" "))))
}
