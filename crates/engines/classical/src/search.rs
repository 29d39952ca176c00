//! Negamax search with alpha-beta pruning

use chess_core::{legal_moves_into, Move, Position, RulesFault};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::eval::evaluate_relative;

/// Bound used for the full search window.
pub const INFINITY: i32 = 1_000_000;

/// Base score for a mated side. Remaining depth is added so faster mates win.
pub const MATE_SCORE: i32 = 100_000;

/// Depth and window for a top-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub max_depth: u8,
    pub alpha: i32,
    pub beta: i32,
}

impl SearchParams {
    /// Full window at the given depth (at least one ply).
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            alpha: -INFINITY,
            beta: INFINITY,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Result of [`pick_best_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move and its score, `None` only when there are no legal moves.
    pub best_move: Option<(Move, i32)>,
    /// True if no candidate beat the `-INFINITY` sentinel and the move was drawn at random.
    pub random_fallback: bool,
}

/// Picks the move to play from `pos`.
///
/// Each root move is scored with one ply of [`search`] at `max_depth - 1`
/// using the params' window. The first move reaching a strictly higher score
/// is kept, so ties go to the earliest move in enumeration order.
pub fn pick_best_move<R: Rng + ?Sized>(
    pos: &Position,
    params: &SearchParams,
    nodes: &mut u64,
    rng: &mut R,
) -> Result<SearchOutcome, RulesFault> {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);

    if moves.is_empty() {
        return Ok(SearchOutcome {
            best_move: None,
            random_fallback: false,
        });
    }

    let child_depth = params.max_depth.saturating_sub(1);
    let mut best: Option<(Move, i32)> = None;
    let mut best_score = -INFINITY;

    for &mv in &moves {
        let score = score_move(&mut tmp, mv, child_depth, -params.beta, -params.alpha, nodes)?;

        if score > best_score {
            best_score = score;
            best = Some((mv, score));
        }
    }

    if best.is_some() {
        return Ok(SearchOutcome {
            best_move: best,
            random_fallback: false,
        });
    }

    let fallback = moves.choose(rng).map(|&mv| (mv, best_score));
    Ok(SearchOutcome {
        best_move: fallback,
        random_fallback: true,
    })
}

/// Recursive negamax with alpha-beta pruning.
///
/// Returns the score for the side to move in `pos`. The position is restored
/// before returning, including when a make/unmake fault is propagated.
pub fn search(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
) -> Result<i32, RulesFault> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);

    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            return Ok(-(MATE_SCORE + depth as i32));
        }
        return Ok(0);
    }

    if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
        return Ok(0);
    }

    if depth == 0 {
        return Ok(evaluate_relative(pos));
    }

    let mut best = -INFINITY;

    for mv in moves {
        let score = score_move(pos, mv, depth - 1, -beta, -alpha, nodes)?;

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    Ok(best)
}

/// Plays `mv`, searches the reply position and takes the move back.
///
/// Returns the score from the mover's side. `child_alpha`/`child_beta` are
/// the window as seen by the opponent. The move is taken back before any
/// fault from the child search is returned.
fn score_move(
    pos: &mut Position,
    mv: Move,
    depth: u8,
    child_alpha: i32,
    child_beta: i32,
    nodes: &mut u64,
) -> Result<i32, RulesFault> {
    let undo = pos.make_move(mv)?;
    *nodes += 1;
    let child = search(pos, depth, child_alpha, child_beta, nodes);
    pos.unmake_move(mv, undo)?;
    Ok(-child?)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
