//! Chess rules for the practice opponent.
//!
//! Position setup from FEN, legal move generation, make/unmake, game-end
//! detection, and coordinate move notation. Everything the move decision
//! engine needs from the rules of the game lives here.

pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use board::*;
pub use error::{FenError, PositionCommandError, RulesFault};
pub use movegen::{legal_moves, legal_moves_into};
pub use perft::perft;
pub use types::*;
pub use uci::*;
