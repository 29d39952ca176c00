//! Error types for the opponent crate.

use std::io;
use std::path::PathBuf;

use chess_core::{FenError, RulesFault};
use thiserror::Error;

/// Failure of [`crate::Opponent::choose_move`].
///
/// Delegate problems never show up here: they are absorbed by falling back to
/// the search. Only a rules fault is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("rules fault during move selection: {0}")]
    Rules(#[from] RulesFault),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search_depth must be at least 1")]
    InvalidDepth,
}

/// Errors from the practice-game and move-report surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PracticeError {
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FenError),

    #[error("invalid move text '{text}'")]
    InvalidMoveText { text: String },

    #[error("illegal move '{text}'")]
    IllegalMove { text: String },

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Decision(#[from] DecisionError),
}
