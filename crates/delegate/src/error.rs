use std::io;
use std::time::Duration;

use thiserror::Error;

/// What went wrong inside a delegate session.
#[derive(Error, Debug)]
pub enum SessionFault {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error talking to the engine: {0}")]
    Io(#[from] io::Error),

    #[error("no '{waiting_for}' within {after:?}")]
    Timeout {
        waiting_for: &'static str,
        after: Duration,
    },

    #[error("engine exited while waiting for '{waiting_for}'")]
    ProcessExited { waiting_for: &'static str },

    #[error("malformed engine output: {line:?}")]
    Malformed { line: String },

    #[error("engine reported no move")]
    NoMove,
}

/// Failure reported to the caller of [`crate::Delegate::request_move`].
#[derive(Error, Debug)]
pub enum DelegateError {
    /// The session never came up or was already demoted; nothing was sent.
    #[error("delegate engine unavailable")]
    Unavailable,

    /// This request failed. The session has been demoted to unavailable.
    #[error("delegate request failed: {0}")]
    RequestFailed(#[source] SessionFault),
}
