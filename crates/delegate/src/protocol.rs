//! The subset of UCI spoken to a delegate engine.

use std::fmt;
use std::time::Duration;

use chess_core::Move;

use crate::SessionFault;

/// Parameters for the `go` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime: Option<Duration>,
}

/// Commands sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    UciNewGame,
    Position { fen: String },
    Go(GoParams),
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Uci => f.write_str("uci"),
            Command::IsReady => f.write_str("isready"),
            Command::SetOption { name, value } => write!(f, "setoption name {name} value {value}"),
            Command::UciNewGame => f.write_str("ucinewgame"),
            Command::Position { fen } => write!(f, "position fen {fen}"),
            Command::Go(params) => {
                f.write_str("go")?;
                if let Some(depth) = params.depth {
                    write!(f, " depth {depth}")?;
                }
                if let Some(movetime) = params.movetime {
                    write!(f, " movetime {}", movetime.as_millis())?;
                }
                Ok(())
            }
            Command::Quit => f.write_str("quit"),
        }
    }
}

/// One line of engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `id name <name>`
    Name(String),
    UciOk,
    ReadyOk,
    /// `bestmove <move>`; `None` for the null moves `(none)` and `0000`.
    BestMove(Option<Move>),
    /// Anything else (`info`, `option`, `id author`, banners).
    Other,
}

impl Response {
    /// Parses a line of engine output.
    ///
    /// Only a `bestmove` line can be malformed; unknown lines are ignored.
    pub fn parse(line: &str) -> Result<Response, SessionFault> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("uciok") => Ok(Response::UciOk),
            Some("readyok") => Ok(Response::ReadyOk),
            Some("id") if parts.next() == Some("name") => {
                Ok(Response::Name(parts.collect::<Vec<_>>().join(" ")))
            }
            Some("bestmove") => match parts.next() {
                Some("(none)") | Some("0000") => Ok(Response::BestMove(None)),
                Some(text) => Move::from_uci(text)
                    .map(|mv| Response::BestMove(Some(mv)))
                    .ok_or_else(|| SessionFault::Malformed {
                        line: line.to_string(),
                    }),
                None => Err(SessionFault::Malformed {
                    line: line.to_string(),
                }),
            },
            _ => Ok(Response::Other),
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
