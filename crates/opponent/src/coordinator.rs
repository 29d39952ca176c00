//! Move selection: ask the delegate, fall back to the search.

use chess_core::{legal_moves, Move, Position};
use classical_engine::ClassicalEngine;
use delegate_engine::{Delegate, DelegateError, SessionState, UciDelegate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::OpponentConfig;
use crate::error::DecisionError;

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Delegate,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenMove {
    /// Always taken from the position's legal move list.
    pub mv: Move,
    pub source: MoveSource,
    /// Search score for the side to move; `None` for delegate moves.
    pub score: Option<i32>,
    /// Nodes searched; 0 for delegate moves.
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move(ChosenMove),
    /// The side to move has no legal move. Not an error.
    NoLegalMoves,
}

impl Decision {
    pub fn chosen(&self) -> Option<&ChosenMove> {
        match self {
            Decision::Move(chosen) => Some(chosen),
            Decision::NoLegalMoves => None,
        }
    }
}

/// The practice opponent.
///
/// Holds the fallback engine and an optional delegate session. `choose_move`
/// takes `&mut self`; wrap it in a `Mutex` to share it between threads.
pub struct Opponent {
    config: OpponentConfig,
    engine: ClassicalEngine,
    delegate: Option<Box<dyn Delegate>>,
}

impl Opponent {
    /// Builds an opponent from config. A configured delegate is started on
    /// the first request.
    pub fn new(config: OpponentConfig) -> Self {
        let delegate = config
            .delegate_settings()
            .map(|settings| Box::new(UciDelegate::new(settings)) as Box<dyn Delegate>);
        Self {
            config,
            engine: ClassicalEngine::new(),
            delegate,
        }
    }

    /// Builds an opponent around an already constructed delegate.
    pub fn with_delegate(config: OpponentConfig, delegate: Box<dyn Delegate>) -> Self {
        Self {
            config,
            engine: ClassicalEngine::new(),
            delegate: Some(delegate),
        }
    }

    /// `None` when no delegate is configured.
    pub fn delegate_state(&self) -> Option<SessionState> {
        self.delegate.as_ref().map(|d| d.state())
    }

    /// Picks the next move for the side to move in `pos`.
    ///
    /// The returned move is always one of `legal_moves(pos)`. Delegate
    /// failures fall back to the search and are never returned.
    pub fn choose_move(&mut self, pos: &Position) -> Result<Decision, DecisionError> {
        let legal = legal_moves(pos);
        if legal.is_empty() {
            return Ok(Decision::NoLegalMoves);
        }

        if let Some(mv) = self.ask_delegate(pos, &legal) {
            return Ok(Decision::Move(ChosenMove {
                mv,
                source: MoveSource::Delegate,
                score: None,
                nodes: 0,
            }));
        }

        let result = self.engine.search(pos, self.config.search_depth.max(1))?;
        Ok(match result.best_move {
            Some(mv) => Decision::Move(ChosenMove {
                mv,
                source: MoveSource::Search,
                score: Some(result.score),
                nodes: result.nodes,
            }),
            None => Decision::NoLegalMoves,
        })
    }

    /// Delegate move, if the delegate is up and answered with a legal move.
    fn ask_delegate(&mut self, pos: &Position, legal: &[Move]) -> Option<Move> {
        let delegate = self.delegate.as_mut()?;
        if delegate.state() == SessionState::Unavailable {
            return None;
        }

        match delegate.request_move(pos) {
            Ok(mv) => {
                let found = legal.iter().copied().find(|&m| m == mv);
                if found.is_none() {
                    debug!(%mv, fen = %pos.to_fen(), "discarding illegal delegate move");
                }
                found
            }
            Err(DelegateError::Unavailable) => None,
            Err(e) => {
                warn!(error = %e, "delegate failed, falling back to search");
                None
            }
        }
    }

    /// Releases the delegate process, if any.
    pub fn shutdown(&mut self) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.shutdown();
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
