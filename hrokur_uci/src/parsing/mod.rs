//! nom parsers turning a line of text into a [`UciMessage`].
//!
//! Per the UCI specification, unknown tokens before a recognised command
//! word are skipped (`joho debug on` must parse as `debug on`), and
//! anything after a complete command is ignored.

mod position;
pub mod utils;


use nom::{
    branch::alt,
    combinator::{opt, rest, success},
    multi::{many0, many_till},
    sequence::{preceded, tuple},
    IResult, Parser,
};
use nom_permutation::permutation_opt;

use position::position_body;
use utils::{
    take_tokens_till, token, token_millis, token_tag, token_u32, token_u64,
    token_uci_move,
};

use crate::uci_info::UciInfo;
use crate::uci_message::UciMessage;
use crate::uci_option_config::UciOptionConfig;
use crate::uci_search_control::UciSearchControl;
use crate::uci_time_control::UciTimeControl;

pub fn uci_message(input: &str) -> IResult<&str, UciMessage> {
    let command = alt((
        // GUI to engine.
        preceded(token_tag("uci"), success(UciMessage::Uci)),
        preceded(token_tag("debug"), debug_body),
        preceded(token_tag("isready"), success(UciMessage::IsReady)),
        preceded(token_tag("setoption"), set_option_body),
        preceded(token_tag("ucinewgame"), success(UciMessage::UciNewGame)),
        preceded(
            token_tag("position"),
            position_body.map(UciMessage::Position),
        ),
        preceded(token_tag("go"), go_body),
        preceded(token_tag("stop"), success(UciMessage::Stop)),
        preceded(token_tag("ponderhit"), success(UciMessage::PonderHit)),
        preceded(token_tag("quit"), success(UciMessage::Quit)),
        // Engine to GUI.
        preceded(token_tag("id"), id_body),
        preceded(token_tag("uciok"), success(UciMessage::UciOk)),
        preceded(token_tag("readyok"), success(UciMessage::ReadyOk)),
        preceded(token_tag("bestmove"), best_move_body),
        preceded(token_tag("info"), UciInfo::parser.map(UciMessage::Info)),
        preceded(
            token_tag("option"),
            UciOptionConfig::parser.map(UciMessage::Option),
        ),
    ));

    // Skip over any leading tokens that don't start a command.
    let (input, (_, message)) = many_till(token, command).parse(input)?;

    Ok((input, message))
}

fn debug_body(input: &str) -> IResult<&str, UciMessage> {
    // A bare `debug` means on.
    let on = match token(input) {
        Ok((_, word)) => word != "off",
        Err(_) => true,
    };

    Ok(("", UciMessage::Debug(on)))
}

fn set_option_body(input: &str) -> IResult<&str, UciMessage> {
    let (input, _) = token_tag("name")(input)?;
    let (input, name) = take_tokens_till(token_tag("value"))(input)?;
    let (input, value) = opt(preceded(token_tag("value"), rest))(input)?;

    Ok((
        input,
        UciMessage::SetOption {
            name: name.to_string(),
            value: value.map(|v| v.trim().to_string()),
        },
    ))
}

fn go_body(input: &str) -> IResult<&str, UciMessage> {
    permutation_opt((
        preceded(token_tag("searchmoves"), many0(token_uci_move)),
        token_tag("ponder"),
        preceded(token_tag("wtime"), token_millis),
        preceded(token_tag("btime"), token_millis),
        preceded(token_tag("winc"), token_millis),
        preceded(token_tag("binc"), token_millis),
        preceded(token_tag("movestogo"), token_u32),
        preceded(token_tag("depth"), token_u32),
        preceded(token_tag("nodes"), token_u64),
        preceded(token_tag("mate"), token_u32),
        preceded(token_tag("movetime"), token_millis),
        token_tag("infinite"),
    ))
    .map(
        |(
            search_moves,
            ponder,
            white_time,
            black_time,
            white_increment,
            black_increment,
            moves_to_go,
            depth,
            nodes,
            mate,
            move_time,
            infinite,
        )| {
            UciMessage::Go {
                time_control: UciTimeControl::from_raw(
                    ponder.is_some(),
                    white_time.flatten(),
                    black_time.flatten(),
                    white_increment.flatten(),
                    black_increment.flatten(),
                    moves_to_go,
                    move_time.flatten(),
                    infinite.is_some(),
                ),
                search_control: UciSearchControl::from_raw(
                    search_moves.unwrap_or_default(),
                    depth,
                    nodes,
                    mate,
                ),
            }
        },
    )
    .parse(input)
}

fn id_body(input: &str) -> IResult<&str, UciMessage> {
    alt((
        preceded(token_tag("name"), rest.map(str::trim)).map(|name| UciMessage::Id {
            name: Some(name.to_string()),
            author: None,
        }),
        preceded(token_tag("author"), rest.map(str::trim)).map(|author| {
            UciMessage::Id {
                name: None,
                author: Some(author.to_string()),
            }
        }),
    ))(input)
}

fn best_move_body(input: &str) -> IResult<&str, UciMessage> {
    tuple((
        token_uci_move,
        opt(preceded(token_tag("ponder"), token_uci_move)),
    ))
    .map(|(best_move, ponder)| UciMessage::BestMove { best_move, ponder })
    .parse(input)
}
