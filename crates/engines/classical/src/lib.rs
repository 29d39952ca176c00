//! Classical Chess Engine
//!
//! Negamax alpha-beta search over a pure material evaluation. This is the
//! fallback move source for the practice opponent and the engine behind the
//! `uci_engine` binary.

mod eval;
mod search;

use chess_core::{Move, Position, RulesFault};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use eval::{evaluate, evaluate_relative, PIECE_VALUES};
pub use search::{pick_best_move, search, SearchOutcome, SearchParams, INFINITY, MATE_SCORE};

/// Outcome of a [`ClassicalEngine`] search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
}

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// Owns the node counter and the RNG used when no root move improves on the
/// search sentinel.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
    rng: StdRng,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed RNG seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Searches `pos` to `depth` plies with the full window.
    pub fn search(&mut self, pos: &Position, depth: u8) -> Result<SearchResult, RulesFault> {
        self.search_with(pos, &SearchParams::new(depth))
    }

    pub fn search_with(
        &mut self,
        pos: &Position,
        params: &SearchParams,
    ) -> Result<SearchResult, RulesFault> {
        self.nodes = 0;
        let outcome = pick_best_move(pos, params, &mut self.nodes, &mut self.rng)?;

        Ok(SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: params.max_depth,
            nodes: self.nodes,
        })
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn name(&self) -> &str {
        "Classical v1.0"
    }

    pub fn author(&self) -> &str {
        "ML-chess"
    }

    pub fn new_game(&mut self) {
        self.nodes = 0;
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
