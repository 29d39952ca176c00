use crate::error::{FenError, RulesFault};
use crate::movegen::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, legal_moves};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Position {
    pub fn startpos() -> Self {
        match Self::from_fen(START_FEN) {
            Ok(p) => p,
            Err(e) => unreachable!("start position FEN rejected: {e}"),
        }
    }

    /// Parse a Forsyth-Edwards Notation string.
    ///
    /// The halfmove and fullmove counters may be omitted and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) {
                        return Err(FenError::RankWidth { rank: 8 - rank_idx });
                    }
                    file += d as i8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch)
                        .ok_or(FenError::InvalidPiece { letter: ch })?;
                    let sq = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    board[sq as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(FenError::InvalidSideToMove {
                    field: stm_part.to_string(),
                });
            }
        };

        let mut castling = CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        };
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => {
                        return Err(FenError::InvalidCastling {
                            field: castle_part.to_string(),
                        });
                    }
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            let ep_rank = match side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            match coord_to_sq(ep_part) {
                Some(s) if rank_of(s) == ep_rank => Some(s),
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        field: ep_part.to_string(),
                    });
                }
            }
        };

        let halfmove_clock: u32 = halfmove_part.parse().map_err(|_| FenError::InvalidCounter {
            field: halfmove_part.to_string(),
        })?;
        let fullmove_number: u32 = fullmove_part.parse().map_err(|_| FenError::InvalidCounter {
            field: fullmove_part.to_string(),
        })?;

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };

        for color in [Color::White, Color::Black] {
            let found = pos
                .board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if found != 1 {
                return Err(FenError::KingCount { color, found });
            }
        }

        Ok(pos)
    }

    /// Serialize to FEN. Round-trips any position accepted by [`Position::from_fen`].
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank as u8) * 8 + file as u8;
                match self.piece_at(s) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (flag, c) in [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ] {
            if flag {
                out.push(c);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| {
            self.piece_at(s)
                .is_some_and(|pc| pc.color == c && pc.kind == PieceKind::King)
        })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Option<u8>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A white pawn attacks the target from one rank below, a black pawn from above.
        let pawn_rank = match by {
            Color::White => tr - 1,
            Color::Black => tr + 1,
        };
        if [-1, 1]
            .iter()
            .any(|df| holds(sq(tf + df, pawn_rank), &[PieceKind::Pawn]))
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let sliders: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if holds(Some(s), &kinds) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// Apply `mv`, returning the record needed to take it back.
    ///
    /// The move is assumed to come from the legal move list of this position.
    /// Anything the board cannot carry out is reported before a square changes.
    pub fn make_move(&mut self, mv: Move) -> Result<Undo, RulesFault> {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).ok_or_else(|| RulesFault::EmptySquare {
            square: sq_to_coord(from),
            mv: mv.to_string(),
        })?;
        if moved.color != self.side_to_move {
            return Err(RulesFault::WrongSide {
                square: sq_to_coord(from),
            });
        }

        // Determine rook squares by destination
        // White: e1->g1 rook h1->f1, e1->c1 rook a1->d1
        // Black: e8->g8 rook h8->f8, e8->c8 rook a8->d8
        let castle_rook = if mv.is_castle && moved.kind == PieceKind::King {
            let squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            match squares {
                Some((rf, rt)) => {
                    let rook = self
                        .piece_at(rf)
                        .filter(|pc| pc.color == moved.color && pc.kind == PieceKind::Rook)
                        .ok_or_else(|| RulesFault::MissingRook {
                            square: sq_to_coord(rf),
                            mv: mv.to_string(),
                        })?;
                    Some((rf, rt, rook))
                }
                None => None,
            }
        } else {
            None
        };

        let ep_victim = if mv.is_en_passant {
            let behind = match moved.color {
                Color::White => rank_of(to) - 1,
                Color::Black => rank_of(to) + 1,
            };
            let cs = sq(file_of(to), behind)
                .filter(|&cs| {
                    self.piece_at(cs)
                        == Some(Piece {
                            color: moved.color.other(),
                            kind: PieceKind::Pawn,
                        })
                })
                .ok_or_else(|| RulesFault::EmptySquare {
                    square: sq_to_coord(to),
                    mv: mv.to_string(),
                })?;
            Some(cs)
        } else {
            None
        };

        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        // Handle en-passant capture
        let ep_captured_sq = ep_victim;
        if let Some(cs) = ep_victim {
            captured = self.piece_at(cs);
            self.set_piece(cs, None);
            reset_hmc = true;
        }

        // Move piece (promotion handled after)
        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        // Promotion
        if moved.kind == PieceKind::Pawn {
            let r = rank_of(to);
            if (moved.color == Color::White && r == 7) || (moved.color == Color::Black && r == 0) {
                let promo = mv.promo.unwrap_or(PieceKind::Queen);
                self.set_piece(
                    to,
                    Some(Piece {
                        color: moved.color,
                        kind: promo,
                    }),
                );
            }
        }

        let mut rook_move = None;
        if let Some((rf, rt, rook)) = castle_rook {
            self.set_piece(rf, None);
            self.set_piece(rt, Some(rook));
            rook_move = Some((rf, rt));
        }

        // Update castling rights if king/rook moved or rook captured
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 0 {
                        self.castling.wq = false;
                    }
                    if from == 7 {
                        self.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 56 {
                        self.castling.bq = false;
                    }
                    if from == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }
        // If rook captured on its home square, remove right
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            match cp.color {
                Color::White => {
                    if to == 0 {
                        self.castling.wq = false;
                    }
                    if to == 7 {
                        self.castling.wk = false;
                    }
                }
                Color::Black => {
                    if to == 56 {
                        self.castling.bq = false;
                    }
                    if to == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }

        // Double pawn push sets en-passant square
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(from);
            let tr = rank_of(to);
            if (moved.color == Color::White && fr == 1 && tr == 3)
                || (moved.color == Color::Black && fr == 6 && tr == 4)
            {
                // ep square is the square passed over
                self.en_passant = sq(file_of(from), (fr + tr) / 2);
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        // Switch side
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.other();

        Ok(Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        })
    }

    /// Take back `mv` using the record returned by [`Position::make_move`].
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) -> Result<(), RulesFault> {
        let from = mv.from;
        let to = mv.to;

        let mut piece_on_to = self.piece_at(to).ok_or_else(|| RulesFault::EmptySquare {
            square: sq_to_coord(to),
            mv: mv.to_string(),
        })?;
        let rook = match undo.rook_move {
            Some((_, rt)) => Some(self.piece_at(rt).ok_or_else(|| RulesFault::MissingRook {
                square: sq_to_coord(rt),
                mv: mv.to_string(),
            })?),
            None => None,
        };

        // Restore side
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        // Undo castling rook move
        if let (Some((rf, rt)), Some(rook)) = (undo.rook_move, rook) {
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // If it was a promotion, revert to pawn
        if undo.moved_piece.kind == PieceKind::Pawn {
            piece_on_to = undo.moved_piece;
        }

        self.set_piece(to, None);
        self.set_piece(from, Some(piece_on_to));

        // Restore captured piece
        if mv.is_en_passant {
            if let Some(cs) = undo.ep_captured_sq {
                self.set_piece(cs, undo.captured);
            }
        } else {
            self.set_piece(to, undo.captured);
        }
        Ok(())
    }

    /// Fifty-move rule: 100 halfmoves without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// True when neither side can possibly deliver mate.
    ///
    /// Covers bare kings, a single minor piece, and any number of bishops
    /// standing on squares of one colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishops = 0;
        let mut bishop_square_colors = [false; 2];
        for s in 0..64u8 {
            let Some(pc) = self.piece_at(s) else {
                continue;
            };
            match pc.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    bishop_square_colors[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
                PieceKind::King => {}
            }
        }
        if knights + bishops <= 1 {
            return true;
        }
        knights == 0 && !(bishop_square_colors[0] && bishop_square_colors[1])
    }

    /// Game state as seen by the side to move.
    pub fn status(&self) -> GameStatus {
        let moves = legal_moves(self);
        if moves.is_empty() {
            if self.in_check(self.side_to_move) {
                return GameStatus::Checkmate {
                    winner: self.side_to_move.other(),
                };
            }
            return GameStatus::Stalemate;
        }
        if self.is_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }
        if self.is_fifty_move_draw() {
            return GameStatus::FiftyMoveRule;
        }
        GameStatus::Ongoing
    }

    pub fn is_game_over(&self) -> bool {
        self.status() != GameStatus::Ongoing
    }
}

/// Outcome of [`Position::status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl GameStatus {
    /// PGN-style result string.
    pub fn result(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "*",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate
            | GameStatus::FiftyMoveRule
            | GameStatus::InsufficientMaterial => "1/2-1/2",
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::FiftyMoveRule | GameStatus::InsufficientMaterial
        )
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
