//! Delegate Engine Adapter
//!
//! Owns an optional external chess engine process and turns it into a plain
//! `Position -> Move` call. Every process-level problem (missing binary, crash,
//! garbage output, timeout) is reported as a [`DelegateError`] and demotes the
//! session to [`SessionState::Unavailable`]; nothing is retried.

mod error;
pub mod protocol;
mod uci_process;

use chess_core::{Move, Position};

pub use error::{DelegateError, SessionFault};
pub use uci_process::{DelegateSettings, UciDelegate, MAX_SKILL_LEVEL};

/// Lifecycle of a delegate session.
///
/// `Uninitialized -> Ready | Unavailable`, `Ready -> Ready | Unavailable`.
/// `Unavailable` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Unavailable,
}

/// A move source that may fail independently of the caller.
pub trait Delegate: Send {
    fn state(&self) -> SessionState;

    /// Asks for a move in `pos`.
    ///
    /// The returned move is only syntactically valid; callers must check it
    /// against the legal moves of `pos` themselves.
    fn request_move(&mut self, pos: &Position) -> Result<Move, DelegateError>;

    /// Releases the session. Later requests answer [`DelegateError::Unavailable`].
    fn shutdown(&mut self);
}

impl<D: Delegate + ?Sized> Delegate for Box<D> {
    fn state(&self) -> SessionState {
        (**self).state()
    }

    fn request_move(&mut self, pos: &Position) -> Result<Move, DelegateError> {
        (**self).request_move(pos)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}
