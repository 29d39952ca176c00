use crate::{board::Position, types::*};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Order is stable: origin squares a1..h8, then each piece's direction pattern.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| match pos.make_move(mv) {
        Ok(undo) => {
            let illegal = pos.in_check(mover);
            let restored = pos.unmake_move(mv, undo).is_ok();
            debug_assert!(restored, "take-back of a freshly played move failed");
            restored && !illegal
        }
        Err(_) => false,
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_rays(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_rays(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_rays(pos, from, us, &DIAGONALS, out);
                gen_rays(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_DELTAS, out);
                gen_castle(pos, from, us, out);
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(PROMOTIONS.iter().map(|&pk| Move::with_promo(from, to, pk)));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            // The pawn taken en passant stands beside us on the target file.
            None if pos.en_passant == Some(to)
                && sq(f + df, r).and_then(|s| pos.piece_at(s))
                    == Some(Piece {
                        color: c.other(),
                        kind: PieceKind::Pawn,
                    }) =>
            {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

/// Single-step movers (knight, king).
fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

/// Sliding movers, stopping at the first occupied square on each ray.
fn gen_rays(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// One castling option: right held, the rook's corner, squares that must be
/// empty, squares the king crosses that must not be attacked, and the king's
/// destination.
struct CastleLane {
    allowed: bool,
    rook: u8,
    empty: &'static [u8],
    safe: &'static [u8],
    king_to: u8,
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, lanes) = match c {
        Color::White => (
            4u8,
            [
                CastleLane {
                    allowed: pos.castling.wk,
                    rook: 7,
                    empty: &[5, 6],
                    safe: &[5, 6],
                    king_to: 6,
                },
                CastleLane {
                    allowed: pos.castling.wq,
                    rook: 0,
                    empty: &[3, 2, 1],
                    safe: &[3, 2],
                    king_to: 2,
                },
            ],
        ),
        Color::Black => (
            60u8,
            [
                CastleLane {
                    allowed: pos.castling.bk,
                    rook: 63,
                    empty: &[61, 62],
                    safe: &[61, 62],
                    king_to: 62,
                },
                CastleLane {
                    allowed: pos.castling.bq,
                    rook: 56,
                    empty: &[59, 58, 57],
                    safe: &[59, 58],
                    king_to: 58,
                },
            ],
        ),
    };
    if from != home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let own_rook = Some(Piece {
        color: c,
        kind: PieceKind::Rook,
    });
    for lane in lanes {
        if lane.allowed
            && pos.piece_at(lane.rook) == own_rook
            && lane.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && lane.safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(from, lane.king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
