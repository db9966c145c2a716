//! Headless native drop channel: one stdin line per physical drop.
//!
//! Paths within a line are tab-separated. `:clear` and `:quit` are commands.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use shelf_core::{DropEvent, Msg};
use shelf_logging::shelf_warn;

use super::app::LoopEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Drop(Vec<String>),
    Clear,
    Quit,
}

pub fn parse_line(line: &str) -> InputCommand {
    match line.trim() {
        ":clear" => InputCommand::Clear,
        ":quit" | ":q" => InputCommand::Quit,
        _ => InputCommand::Drop(
            line.trim_end_matches(['\r', '\n'])
                .split('\t')
                .filter(|path| !path.trim().is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        ),
    }
}

pub fn into_loop_event(command: InputCommand) -> LoopEvent {
    match command {
        InputCommand::Drop(paths) => LoopEvent::Drop(DropEvent::NativeDrop(paths)),
        InputCommand::Clear => LoopEvent::Msg(Msg::ClearClicked),
        InputCommand::Quit => LoopEvent::Quit,
    }
}

/// Registers the stdin listener. End of input quits the app.
pub fn spawn_stdin_listener(tx: mpsc::Sender<LoopEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("shelfsend-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        shelf_warn!("Failed to read drop input: {}", err);
                        break;
                    }
                };
                if tx.send(into_loop_event(parse_line(&line))).is_err() {
                    return;
                }
            }
            let _ = tx.send(LoopEvent::Quit);
        })?;
    Ok(())
}
