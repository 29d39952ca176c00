//! Self-play runner: the opponent plays both sides of a game.

use chess_core::{legal_moves, Color, GameStatus, Position};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::{Decision, Opponent};
use crate::error::PracticeError;

/// Configuration for a self-play game
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Plies to play before declaring a draw
    pub max_plies: u32,
    /// Log every move
    pub verbose: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            verbose: false,
        }
    }
}

/// Result from White's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn as_pgn(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    MaxPlies,
}

/// A finished self-play game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in coordinate notation
    pub moves: Vec<String>,
    pub result: GameResult,
    pub termination: Termination,
    pub final_fen: String,
}

/// Plays the opponent against itself
pub struct SelfPlay {
    config: SelfPlayConfig,
}

impl SelfPlay {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    /// Plays one game from `start`, checking every chosen move against the
    /// legal moves of the position it was played in.
    pub fn run(
        &self,
        opponent: &mut Opponent,
        start: Position,
    ) -> Result<GameRecord, PracticeError> {
        let mut pos = start;
        let mut moves = Vec::new();

        for ply in 0..self.config.max_plies {
            if pos.is_game_over() {
                break;
            }

            let chosen = match opponent.choose_move(&pos)? {
                Decision::Move(chosen) => chosen,
                Decision::NoLegalMoves => break,
            };
            if !legal_moves(&pos).contains(&chosen.mv) {
                return Err(PracticeError::IllegalMove {
                    text: chosen.mv.to_string(),
                });
            }

            if self.config.verbose {
                info!(
                    ply = ply + 1,
                    mv = %chosen.mv,
                    source = ?chosen.source,
                    score = ?chosen.score,
                    "self-play move"
                );
            }

            pos.make_move(chosen.mv).map_err(crate::DecisionError::from)?;
            moves.push(chosen.mv.to_string());
        }

        let (result, termination) = match pos.status() {
            GameStatus::Checkmate {
                winner: Color::White,
            } => (GameResult::WhiteWins, Termination::Checkmate),
            GameStatus::Checkmate {
                winner: Color::Black,
            } => (GameResult::BlackWins, Termination::Checkmate),
            GameStatus::Stalemate => (GameResult::Draw, Termination::Stalemate),
            GameStatus::FiftyMoveRule => (GameResult::Draw, Termination::FiftyMoveRule),
            GameStatus::InsufficientMaterial => {
                (GameResult::Draw, Termination::InsufficientMaterial)
            }
            GameStatus::Ongoing => (GameResult::Draw, Termination::MaxPlies),
        };

        Ok(GameRecord {
            moves,
            result,
            termination,
            final_fen: pos.to_fen(),
        })
    }
}

#[cfg(test)]
#[path = "self_play_tests.rs"]
mod self_play_tests;
