//! Practice games against the opponent, and the single-move report used by
//! the `apply` command.

use std::fmt;

use chess_core::{legal_moves, Color, GameStatus, Move, PieceKind, Position, rank_of};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::{ChosenMove, Decision, Opponent};
use crate::error::PracticeError;

/// Result of applying one move to a FEN position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Whether the move was legal and applied.
    pub ok: bool,
    /// Position after the move, or the input position when `ok` is false.
    pub fen: String,
    /// Legal moves in the returned position, in coordinate notation.
    pub legal_moves: Vec<String>,
}

/// Applies `move_text` to the position described by `fen`.
///
/// A well-formed but illegal move is not an error: the report comes back with
/// `ok: false` and the legal moves of the unchanged position.
pub fn apply_move_text(fen: &str, move_text: &str) -> Result<MoveReport, PracticeError> {
    let mut pos = Position::from_fen(fen)?;
    let parsed = Move::from_uci(move_text).ok_or_else(|| PracticeError::InvalidMoveText {
        text: move_text.to_string(),
    })?;

    let legal = legal_moves(&pos);
    let Some(mv) = legal.iter().copied().find(|&m| m == parsed) else {
        return Ok(MoveReport {
            ok: false,
            fen: fen.to_string(),
            legal_moves: to_text(&legal),
        });
    };

    pos.make_move(mv).map_err(crate::DecisionError::from)?;
    Ok(MoveReport {
        ok: true,
        fen: pos.to_fen(),
        legal_moves: to_text(&legal_moves(&pos)),
    })
}

fn to_text(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::InsufficientMaterial => "insufficient material",
        })
    }
}

/// Game state from the human player's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeStatus {
    YourMove,
    ComputerMove,
    YouWin,
    YouLose,
    Draw(DrawReason),
}

impl fmt::Display for PracticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeStatus::YourMove => f.write_str("Your move"),
            PracticeStatus::ComputerMove => f.write_str("Computer's move"),
            PracticeStatus::YouWin => f.write_str("You Win!"),
            PracticeStatus::YouLose => f.write_str("You Lose!"),
            PracticeStatus::Draw(reason) => write!(f, "Draw: {reason}"),
        }
    }
}

/// A human playing one colour against the opponent.
pub struct PracticeGame {
    position: Position,
    human: Color,
    opponent: Opponent,
    moves: Vec<Move>,
}

impl PracticeGame {
    pub fn new(opponent: Opponent, human: Color, start: Position) -> Self {
        Self {
            position: start,
            human,
            opponent,
            moves: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn human(&self) -> Color {
        self.human
    }

    /// Moves played so far, both sides.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn opponent_mut(&mut self) -> &mut Opponent {
        &mut self.opponent
    }

    pub fn status(&self) -> PracticeStatus {
        match self.position.status() {
            GameStatus::Ongoing if self.position.side_to_move == self.human => {
                PracticeStatus::YourMove
            }
            GameStatus::Ongoing => PracticeStatus::ComputerMove,
            GameStatus::Checkmate { winner } if winner == self.human => PracticeStatus::YouWin,
            GameStatus::Checkmate { .. } => PracticeStatus::YouLose,
            GameStatus::Stalemate => PracticeStatus::Draw(DrawReason::Stalemate),
            GameStatus::FiftyMoveRule => PracticeStatus::Draw(DrawReason::FiftyMoveRule),
            GameStatus::InsufficientMaterial => {
                PracticeStatus::Draw(DrawReason::InsufficientMaterial)
            }
        }
    }

    /// Plays the human's move given in coordinate notation.
    ///
    /// A pawn reaching the last rank without a promotion letter becomes a
    /// queen. Rejected moves leave the game unchanged.
    pub fn play_human(&mut self, text: &str) -> Result<Move, PracticeError> {
        if self.position.is_game_over() {
            return Err(PracticeError::GameOver);
        }
        if self.position.side_to_move != self.human {
            return Err(PracticeError::NotYourTurn);
        }

        let mut wanted = Move::from_uci(text).ok_or_else(|| PracticeError::InvalidMoveText {
            text: text.to_string(),
        })?;
        if wanted.promo.is_none() && self.is_pawn_to_last_rank(wanted) {
            wanted.promo = Some(PieceKind::Queen);
        }

        let mv = legal_moves(&self.position)
            .into_iter()
            .find(|&m| m == wanted)
            .ok_or_else(|| PracticeError::IllegalMove {
                text: text.to_string(),
            })?;

        self.apply(mv)?;
        Ok(mv)
    }

    fn is_pawn_to_last_rank(&self, mv: Move) -> bool {
        self.position
            .piece_at(mv.from)
            .is_some_and(|pc| pc.kind == PieceKind::Pawn)
            && matches!(rank_of(mv.to), 0 | 7)
    }

    /// Lets the opponent move if it is its turn and the game is not over.
    pub fn reply(&mut self) -> Result<Option<ChosenMove>, PracticeError> {
        if self.position.side_to_move == self.human || self.position.is_game_over() {
            return Ok(None);
        }

        match self.opponent.choose_move(&self.position)? {
            Decision::Move(chosen) => {
                self.apply(chosen.mv)?;
                info!(mv = %chosen.mv, source = ?chosen.source, "opponent moved");
                Ok(Some(chosen))
            }
            Decision::NoLegalMoves => Ok(None),
        }
    }

    fn apply(&mut self, mv: Move) -> Result<(), PracticeError> {
        self.position
            .make_move(mv)
            .map_err(crate::DecisionError::from)?;
        self.moves.push(mv);
        Ok(())
    }
}

#[cfg(test)]
#[path = "practice_tests.rs"]
mod practice_tests;
