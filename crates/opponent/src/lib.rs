//! Practice opponent
//!
//! The move decision engine behind the practice board: given a position it
//! asks an optional external UCI engine for a move, checks that move against
//! the legal moves, and falls back to the built-in alpha-beta search whenever
//! the delegate is missing, slow, broken or wrong.
//!
//! # Usage
//!
//! ```bash
//! # Pick a move for a position
//! cargo run -p opponent -- choose --fen "8/8/8/8/8/8/6k1/7K w - - 0 1"
//!
//! # Consult Stockfish first
//! cargo run -p opponent -- choose --engine /usr/games/stockfish --strength 5
//!
//! # Play against it
//! cargo run -p opponent -- play --color white
//! ```

mod config;
mod coordinator;
mod error;
mod practice;
mod self_play;

pub use config::OpponentConfig;
pub use coordinator::{ChosenMove, Decision, MoveSource, Opponent};
pub use error::{ConfigError, DecisionError, PracticeError};
pub use practice::{apply_move_text, DrawReason, MoveReport, PracticeGame, PracticeStatus};
pub use self_play::{GameRecord, GameResult, SelfPlay, SelfPlayConfig, Termination};
