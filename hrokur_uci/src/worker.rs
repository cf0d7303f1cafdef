//! The engine worker: owns the game, handles one command at a time, and is
//! the only writer of stdout.
//!
//! The reader thread parses stdin lines and feeds [`WorkerInput`]s through
//! a bounded channel. While a search runs (on this same thread), the
//! [`QueuePoller`] drains the channel at the search's poll sites: `stop`
//! and `quit` request cancellation, `isready` is answered on the spot, and
//! everything else is pushed back to be handled in order once the search
//! has returned and `bestmove` has been sent.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;

use hrokur_core::board::Position;
use hrokur_core::game::Game;
use hrokur_engine::{self, SearchHandler, SearchInfo, SearchLimits};

use crate::{
    UciInfo, UciMessage, UciOptionConfig, UciPositionBase, UciPositionSpec,
    UciSearchControl, UciTimeControl,
};

/// Capacity of the reader-to-worker command queue. Small on purpose; a
/// reader that gets this far ahead of the engine can wait.
pub const COMMAND_QUEUE_CAPACITY: usize = 64;

/// What the reader thread enqueues: a parsed message, or a line that
/// parsed as nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerInput {
    Message(UciMessage),
    Malformed(String),
}

pub fn engine_name() -> String {
    format!("Hrókur {}", env!("CARGO_PKG_VERSION"))
}

pub const ENGINE_AUTHOR: &str = "the Hrókur developers";

fn advertised_options() -> Vec<UciOptionConfig> {
    vec![UciOptionConfig::Check {
        name: "Ponder".to_string(),
        default: Some(false),
    }]
}

/// The engine worker. Generic over its output sink so tests can capture
/// the protocol exchange in memory.
pub struct EngineWorker<W> {
    game: Game,
    debug: bool,
    options: Vec<(String, Option<String>)>,
    pending: VecDeque<UciMessage>,
    out: W,
}

impl<W: Write> EngineWorker<W> {
    pub fn new(out: W) -> Self {
        Self {
            game: Game::default(),
            debug: false,
            options: Vec::new(),
            pending: VecDeque::new(),
            out,
        }
    }

    /// Handles commands until `quit` (or the reader hangs up). Returns the
    /// output sink.
    pub fn run(mut self, rx: &Receiver<WorkerInput>) -> io::Result<W> {
        loop {
            let input = match self.pending.pop_front() {
                Some(message) => WorkerInput::Message(message),
                // A disconnected reader means stdin is gone; shut down as
                // if told to quit.
                None => match rx.recv() {
                    Ok(input) => input,
                    Err(_) => WorkerInput::Message(UciMessage::Quit),
                },
            };

            match input {
                WorkerInput::Malformed(line) => self.report_unparsed(&line)?,
                WorkerInput::Message(UciMessage::Quit) => break,
                WorkerInput::Message(message) => self.handle(message, rx)?,
            }
        }

        Ok(self.out)
    }

    fn handle(&mut self, message: UciMessage, rx: &Receiver<WorkerInput>) -> io::Result<()> {
        match message {
            UciMessage::Uci => {
                writeln!(self.out, "{}", UciMessage::id_name(engine_name()))?;
                writeln!(self.out, "{}", UciMessage::id_author(ENGINE_AUTHOR))?;
                for option in advertised_options() {
                    writeln!(self.out, "{}", UciMessage::Option(option))?;
                }
                writeln!(self.out, "{}", UciMessage::UciOk)?;
            }

            UciMessage::Debug(on) => self.debug = on,

            UciMessage::IsReady => writeln!(self.out, "{}", UciMessage::ReadyOk)?,

            UciMessage::SetOption { name, value } => self.record_option(name, value),

            UciMessage::UciNewGame => self.game = Game::default(),

            UciMessage::Position(spec) => self.handle_position(spec)?,

            UciMessage::Go {
                time_control,
                search_control,
            } => self.handle_go(time_control, search_control, rx)?,

            // With no search in flight these have nothing to act on.
            UciMessage::Stop | UciMessage::PonderHit => {}

            // Quit is intercepted in `run`.
            UciMessage::Quit => {}

            // Engine-to-GUI traffic arriving on stdin is ignored.
            UciMessage::Id { .. }
            | UciMessage::UciOk
            | UciMessage::ReadyOk
            | UciMessage::BestMove { .. }
            | UciMessage::Info(_)
            | UciMessage::Option(_) => {}
        }

        Ok(())
    }

    fn record_option(&mut self, name: String, value: Option<String>) {
        match self.options.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.options.push((name, value)),
        }
    }

    /// Replaces the game with one built from the command. A FEN that fails
    /// validation drops the command and keeps the previous game; an
    /// illegal move ends the move list early.
    fn handle_position(&mut self, spec: UciPositionSpec) -> io::Result<()> {
        let initial = match &spec.base {
            UciPositionBase::StartPos => Position::starting_position(),
            UciPositionBase::Fen(fen) => match Position::from_fen(fen) {
                Ok(position) => position,
                Err(error) => {
                    if self.debug {
                        writeln!(
                            self.out,
                            "{}",
                            UciMessage::info_string(format!(
                                "error: rejected fen {fen:?}: {error}"
                            ))
                        )?;
                    }
                    return Ok(());
                }
            },
        };

        let mut game = Game::new(initial);
        for uci in spec.moves {
            if game.try_push_uci(uci).is_none() {
                if self.debug {
                    writeln!(
                        self.out,
                        "{}",
                        UciMessage::info_string(format!("illegal move {uci}"))
                    )?;
                }
                break;
            }
        }

        self.game = game;
        Ok(())
    }

    fn handle_go(
        &mut self,
        time_control: Option<UciTimeControl>,
        search_control: Option<UciSearchControl>,
        rx: &Receiver<WorkerInput>,
    ) -> io::Result<()> {
        let limits = build_limits(time_control, search_control);
        let stop_requested = AtomicBool::new(false);

        let result = {
            let mut poller = QueuePoller {
                rx,
                pending: &mut self.pending,
                out: &mut self.out,
                debug: self.debug,
                stop_requested: &stop_requested,
            };
            hrokur_engine::find_best_move(
                self.game.latest(),
                self.game.repetition(),
                limits,
                &mut poller,
            )
        };

        let final_info = SearchInfo {
            depth: result.stats.depth,
            score: result.score,
            nodes: result.stats.nodes,
            elapsed: result.elapsed,
            pv: result.best_move.into_iter().collect(),
        };
        writeln!(self.out, "{}", UciMessage::Info(UciInfo::from(&final_info)))?;

        match result.best_move {
            Some(m) => {
                writeln!(self.out, "{}", UciMessage::best_move(m.into()))?;
            }
            // No legal move to report: the conventional null move.
            None => writeln!(self.out, "bestmove 0000")?,
        }

        Ok(())
    }

    fn report_unparsed(&mut self, line: &str) -> io::Result<()> {
        if self.debug {
            writeln!(
                self.out,
                "{}",
                UciMessage::info_string(format!("error: cannot parse {line:?}"))
            )?;
        }
        Ok(())
    }
}

/// Maps the parsed `go` arguments onto [`SearchLimits`].
///
/// Clock fields (`wtime` and friends) are accepted but place no limit on
/// the search: allocating thinking time from the game clock is out of
/// scope, and only explicit limits are honored.
fn build_limits(
    time_control: Option<UciTimeControl>,
    search_control: Option<UciSearchControl>,
) -> SearchLimits {
    let mut limits = SearchLimits::default();

    match time_control {
        Some(UciTimeControl::Infinite) => limits.infinite = true,
        Some(UciTimeControl::MoveTime(duration)) => limits.move_time = Some(duration),
        Some(UciTimeControl::Ponder) => limits.ponder = true,
        Some(UciTimeControl::TimeLeft { .. }) | None => {}
    }

    if let Some(control) = search_control {
        limits.depth = control.depth;
        limits.nodes = control.nodes;
        limits.search_moves = control.search_moves;
    }

    limits
}

/// The search-side view of the command queue.
///
/// Runs at every poll site of the search. Ordering is preserved: nothing
/// is handled out of turn, the queue is merely drained into the worker's
/// push-back buffer, with the three exceptions the protocol demands
/// (stop/quit cancellation, isready's immediate answer, and a new go
/// preempting the running search).
struct QueuePoller<'a, W> {
    rx: &'a Receiver<WorkerInput>,
    pending: &'a mut VecDeque<UciMessage>,
    out: &'a mut W,
    debug: bool,
    stop_requested: &'a AtomicBool,
}

impl<W: Write> SearchHandler for QueuePoller<'_, W> {
    fn should_stop(&mut self) -> bool {
        while let Ok(input) = self.rx.try_recv() {
            match input {
                WorkerInput::Malformed(line) => {
                    if self.debug {
                        let _ = writeln!(
                            self.out,
                            "{}",
                            UciMessage::info_string(format!("error: cannot parse {line:?}"))
                        );
                    }
                }

                WorkerInput::Message(UciMessage::Stop) => {
                    self.stop_requested.store(true, Ordering::Relaxed);
                }

                WorkerInput::Message(UciMessage::Quit) => {
                    self.stop_requested.store(true, Ordering::Relaxed);
                    self.pending.push_back(UciMessage::Quit);
                }

                WorkerInput::Message(UciMessage::IsReady) => {
                    let _ = writeln!(self.out, "{}", UciMessage::ReadyOk);
                }

                WorkerInput::Message(go @ UciMessage::Go { .. }) => {
                    self.stop_requested.store(true, Ordering::Relaxed);
                    self.pending.push_back(go);
                }

                WorkerInput::Message(message) => self.pending.push_back(message),
            }
        }

        self.stop_requested.load(Ordering::Relaxed)
    }

    fn report(&mut self, info: &SearchInfo) {
        let _ = writeln!(self.out, "{}", UciMessage::Info(UciInfo::from(info)));
    }
}
