//! Process entry: wires stdin to the engine worker.
//!
//! Two long-lived threads. The main thread owns stdin: it reads a line,
//! parses it, and enqueues the result on a bounded channel. The worker
//! thread owns the game, the search and stdout. `quit` (or EOF) ends both.

use std::io::{self, BufRead};
use std::sync::mpsc::sync_channel;
use std::thread;

use hrokur_uci::worker::{EngineWorker, WorkerInput, COMMAND_QUEUE_CAPACITY};
use hrokur_uci::UciMessage;

/// A panic on either thread must not leave the other waiting forever.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        original(panic_info);
        std::process::exit(1);
    }));
}

fn main() {
    install_panic_hook();

    let (tx, rx) = sync_channel::<WorkerInput>(COMMAND_QUEUE_CAPACITY);

    let worker = thread::spawn(move || EngineWorker::new(io::stdout()).run(&rx));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            // EOF or a read error: treat as quit.
            None | Some(Err(_)) => {
                let _ = tx.send(WorkerInput::Message(UciMessage::Quit));
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let input = match trimmed.parse::<UciMessage>() {
            Ok(message) => WorkerInput::Message(message),
            Err(_) => WorkerInput::Malformed(trimmed.to_string()),
        };

        let is_quit = matches!(input, WorkerInput::Message(UciMessage::Quit));
        if tx.send(input).is_err() || is_quit {
            break;
        }
    }

    drop(tx);
    if let Ok(Err(error)) = worker.join() {
        eprintln!("error writing to stdout: {error}");
        std::process::exit(1);
    }
}
