use crate::{board::Position, error::PositionCommandError, movegen::legal_moves, types::*};

/// Coordinate notation: `e2e4`, `e7e8q`.
pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Parse `txt` and match it against the legal moves of `pos`.
///
/// Returns the generated move (with castle/en-passant flags set) or `None` if
/// the text is malformed or names no legal move. The promotion piece must match
/// exactly: `e7e8` does not select `e7e8q`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let wanted = Move::from_uci(txt)?;
    legal_moves(pos).into_iter().find(|m| *m == wanted)
}

/// Apply the arguments of a UCI `position` command.
///
/// Supports `startpos` and `fen <fields>`, each optionally followed by
/// `moves <m1> <m2> ...`. The command is applied as a whole: on any error
/// `pos` is left untouched.
pub fn set_position_from_uci(
    pos: &mut Position,
    args: &[&str],
) -> Result<(), PositionCommandError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut next = match setup.split_first() {
        Some((&"fen", fields)) => Position::from_fen(&fields.join(" "))?,
        _ => Position::startpos(),
    };

    for (index, txt) in moves.iter().skip(1).enumerate() {
        let illegal = || PositionCommandError::IllegalMove {
            index,
            text: txt.to_string(),
        };
        let mv = parse_uci_move(&next, txt).ok_or_else(illegal)?;
        next.make_move(mv).map_err(|_| illegal())?;
    }
    *pos = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
