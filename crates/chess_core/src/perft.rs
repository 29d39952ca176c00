use crate::{board::Position, error::RulesFault, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &mut Position, depth: u8) -> Result<u64, RulesFault> {
    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> Result<u64, RulesFault> {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return Ok(1);
        };

        legal_moves_into(pos, buf);
        if rest.is_empty() {
            // Bulk count at the horizon.
            return Ok(buf.len() as u64);
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv)?;
            let counted = inner(pos, depth - 1, rest);
            pos.unmake_move(mv, undo)?;
            nodes += counted?;
        }
        Ok(nodes)
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}
