//! Error types for position setup and move application.

use thiserror::Error;

/// A FEN string that does not describe a playable position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {found}")]
    MissingFields { found: usize },

    #[error("expected 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece letter '{letter}'")]
    InvalidPiece { letter: char },

    #[error("invalid side to move '{field}'")]
    InvalidSideToMove { field: String },

    #[error("invalid castling field '{field}'")]
    InvalidCastling { field: String },

    #[error("invalid en-passant square '{field}'")]
    InvalidEnPassant { field: String },

    #[error("invalid move counter '{field}'")]
    InvalidCounter { field: String },

    #[error("expected one {color:?} king, found {found}")]
    KingCount { color: crate::Color, found: usize },
}

/// Raised when make/unmake is asked to do something the board cannot support.
///
/// Positions are validated before any square is touched, so a fault leaves the
/// board as it was. Callers should still treat it as fatal for the current search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesFault {
    #[error("no piece on {square} for move {mv}")]
    EmptySquare { square: String, mv: String },

    #[error("piece on {square} does not belong to the side to move")]
    WrongSide { square: String },

    #[error("castling move {mv} has no rook on {square}")]
    MissingRook { square: String, mv: String },
}

/// A UCI `position` command that could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionCommandError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("move {index} '{text}' is not legal in the running position")]
    IllegalMove { index: usize, text: String },
}
