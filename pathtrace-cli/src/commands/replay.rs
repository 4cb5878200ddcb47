//! Replay command - drive a playback session from stdin
//!
//! Reads one command per line and prints the current step after each:
//!
//! ```text
//! n, next        advance one step
//! p, prev        go back one step
//! g <n>, goto    jump to step n (zero-based)
//! e, end         jump to the last step
//! r, reset       back to "not started"
//! q, quit        leave (EOF works too)
//! ```

use super::{record, RecordArgs};
use crate::config::PathtraceConfig;
use crate::output::{OutputConfig, Outputter, StepView};
use anyhow::Result;
use colored::Colorize;
use pathtrace_core::{Graph, PlaybackController};
use std::io::{self, BufRead, Write};

const HELP: &str = "Commands: n(ext), p(rev), g(oto) <n>, e(nd), r(eset), q(uit)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    Goto(usize),
    End,
    Reset,
    Help,
    Quit,
}

fn parse(line: &str) -> std::result::Result<Command, String> {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        // A bare return advances, like a pager.
        None | Some("n") | Some("next") => Command::Next,
        Some("p") | Some("prev") | Some("previous") => Command::Previous,
        Some("e") | Some("end") => Command::End,
        Some("r") | Some("reset") => Command::Reset,
        Some("h") | Some("help") | Some("?") => Command::Help,
        Some("q") | Some("quit") | Some("exit") => Command::Quit,
        Some("g") | Some("goto") => {
            let arg = parts.next().ok_or("goto needs a step number")?;
            let index = arg
                .parse()
                .map_err(|_| format!("'{}' is not a step number", arg))?;
            Command::Goto(index)
        }
        Some(other) => return Err(format!("Unknown command '{}'. {}", other, HELP)),
    };
    Ok(command)
}

pub fn run(args: &RecordArgs, config: &PathtraceConfig, output: OutputConfig) -> Result<()> {
    let recording = record(args, config)?;
    let mut controller = PlaybackController::new(recording.trace);
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(
        &mut controller,
        &recording.graph,
        stdin.lock(),
        &mut stdout.lock(),
        &output,
    )
}

/// Apply commands from `input` until `quit` or EOF, writing each resulting
/// step to `out`.
pub fn session<R: BufRead, W: Write>(
    controller: &mut PlaybackController,
    graph: &Graph,
    mut input: R,
    out: &mut W,
    config: &OutputConfig,
) -> Result<()> {
    writeln!(out, "{} steps recorded. {}", controller.len(), HELP)?;

    let mut line = String::new();
    loop {
        write!(out, "{} ", ">".cyan())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match parse(line.trim()) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message.yellow())?;
                continue;
            }
        };
        tracing::debug!(?command, position = ?controller.position(), "replay command");

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Next => {
                controller.next();
            }
            Command::Previous => {
                controller.previous();
            }
            Command::End => {
                controller.seek_end();
            }
            Command::Reset => controller.reset(),
            Command::Goto(index) => {
                if let Err(e) = controller.seek(index) {
                    writeln!(out, "{}", e.to_string().yellow())?;
                    continue;
                }
            }
        }

        let view = StepView {
            position: controller.position(),
            total: controller.len(),
            step: controller.current(),
            graph,
        };
        writeln!(out, "{}", view.render(config))?;
    }

    Ok(())
}
