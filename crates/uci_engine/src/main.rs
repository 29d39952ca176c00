//! UCI front end for the classical engine.
//!
//! Speaks enough UCI to serve as the practice opponent's delegate process.
//! Logs go to stderr; stdout is reserved for the protocol.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chess_core::{move_to_uci, set_position_from_uci, Position};
use classical_engine::ClassicalEngine;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_DEPTH: u8 = 3;
const MAX_DEPTH: u8 = 8;
const MAX_SKILL_LEVEL: u8 = 20;

#[derive(Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

struct UciSession {
    engine: ClassicalEngine,
    pos: Position,
    depth: u8,
}

impl UciSession {
    fn new() -> Self {
        Self {
            engine: ClassicalEngine::new(),
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
        }
    }

    fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Control> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return Ok(Control::Continue);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min 1 max {MAX_DEPTH}"
                )?;
                writeln!(
                    out,
                    "option name Skill Level type spin default {MAX_SKILL_LEVEL} min 0 max {MAX_SKILL_LEVEL}"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut self.pos, &parts[1..]) {
                    warn!(error = %e, "bad position command, resetting to the start position");
                    self.pos = Position::startpos();
                }
            }
            "go" => {
                // movetime and clocks are accepted but the search is depth-bounded.
                let depth = option_value::<u8>(&parts[1..], "depth")
                    .map_or(self.depth, |d| d.clamp(1, MAX_DEPTH));
                let best = match self.engine.search(&self.pos, depth) {
                    Ok(result) => {
                        debug!(depth, nodes = result.nodes, score = result.score, "search done");
                        result.best_move
                    }
                    Err(e) => {
                        warn!(error = %e, "search failed");
                        None
                    }
                };
                match best {
                    Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv))?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "quit" => return Ok(Control::Quit),
            _ => debug!(line, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(Control::Continue)
    }

    /// `setoption name <Name...> value <N>`
    fn set_option(&mut self, args: &[&str]) {
        let Some(value_at) = args.iter().position(|&x| x == "value") else {
            return;
        };
        let name = args[..value_at]
            .iter()
            .skip_while(|&&x| x == "name")
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let Some(Ok(value)) = args.get(value_at + 1).map(|v| v.parse::<i32>()) else {
            return;
        };

        match name.as_str() {
            "Depth" => self.depth = value.clamp(1, MAX_DEPTH as i32) as u8,
            "Skill Level" => self.depth = depth_for_skill(value),
            _ => debug!(%name, "ignoring unknown option"),
        }
    }
}

/// Maps skill 0..=20 onto depth 1..=5.
fn depth_for_skill(skill: i32) -> u8 {
    1 + (skill.clamp(0, MAX_SKILL_LEVEL as i32) / 5) as u8
}

fn option_value<T: std::str::FromStr>(args: &[&str], key: &str) -> Option<T> {
    let at = args.iter().position(|&x| x == key)?;
    args.get(at + 1)?.parse().ok()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new();

    for line in stdin.lock().lines() {
        if session.handle(&line?, &mut stdout)? == Control::Quit {
            break;
        }
    }
    Ok(())
}
