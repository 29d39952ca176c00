//! Material-based position evaluation.

use chess_core::{Color, PieceKind, Position};

/// Material values in centipawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Material balance from White's point of view.
///
/// Kings count for nothing: mate is scored by the search from terminal
/// detection, never by material.
pub fn evaluate(pos: &Position) -> i32 {
    let mut counts = [[0i32; 6]; 2];
    for pc in pos.board.iter().flatten() {
        counts[pc.color.idx()][pc.kind.idx()] += 1;
    }

    PieceKind::ALL
        .iter()
        .map(|kind| {
            let i = kind.idx();
            PIECE_VALUES[i] * (counts[Color::White.idx()][i] - counts[Color::Black.idx()][i])
        })
        .sum()
}

/// Same score as [`evaluate`], seen by the side to move.
///
/// - Positive = good for side to move
/// - Negative = bad for side to move
#[inline]
pub fn evaluate_relative(pos: &Position) -> i32 {
    match pos.side_to_move {
        Color::White => evaluate(pos),
        Color::Black => -evaluate(pos),
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
