use super::*;
use chess_core::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Full-width minimax with the same terminal rules as `search`, no pruning.
fn reference_minimax(pos: &mut Position, depth: u8) -> i32 {
    let moves = chess_core::legal_moves(pos);
    if moves.is_empty() {
        return if pos.in_check(pos.side_to_move) {
            -(MATE_SCORE + depth as i32)
        } else {
            0
        };
    }
    if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
        return 0;
    }
    if depth == 0 {
        return evaluate_relative(pos);
    }
    let mut best = -INFINITY;
    for mv in moves {
        let undo = pos.make_move(mv).unwrap();
        best = best.max(-reference_minimax(pos, depth - 1));
        pos.unmake_move(mv, undo).unwrap();
    }
    best
}

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_search_matches_reference_minimax() {
    let cases: [(&str, u8); 6] = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 3),
        ("4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1", 3),
        ("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4", 2),
    ];
    for (f, depth) in cases {
        let mut pos = fen(f);
        let mut nodes = 0;
        let got = search(&mut pos, depth, -INFINITY, INFINITY, &mut nodes).unwrap();
        let expected = reference_minimax(&mut pos, depth);
        assert_eq!(got, expected, "{f} at depth {depth}");
        assert!(nodes > 0);
    }
}

#[test]
fn test_search_leaves_position_untouched() {
    let start = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut pos = start.clone();
    let mut nodes = 0;
    search(&mut pos, 3, -INFINITY, INFINITY, &mut nodes).unwrap();
    assert_eq!(pos, start);
}

#[test]
fn test_terminal_scores() {
    let mut nodes = 0;

    let mut mated = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(
        search(&mut mated, 3, -INFINITY, INFINITY, &mut nodes).unwrap(),
        -(MATE_SCORE + 3)
    );

    let mut stalemate = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(search(&mut stalemate, 3, -INFINITY, INFINITY, &mut nodes).unwrap(), 0);

    // A queen up, but the clock has run out.
    let mut fifty = fen("4k3/8/8/8/8/8/8/3QK3 w - - 100 90");
    assert_eq!(search(&mut fifty, 2, -INFINITY, INFINITY, &mut nodes).unwrap(), 0);

    let mut quiet = fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
    assert_eq!(search(&mut quiet, 0, -INFINITY, INFINITY, &mut nodes).unwrap(), -900);
}

#[test]
fn test_pick_best_move_finds_mate_in_one() {
    let pos = fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let mate = chess_core::parse_uci_move(&pos, "e1e8").unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for depth in 2..=3 {
        let mut nodes = 0;
        let outcome = pick_best_move(&pos, &SearchParams::new(depth), &mut nodes, &mut rng).unwrap();
        let (mv, score) = outcome.best_move.unwrap();
        assert_eq!(mv, mate, "depth {depth}");
        assert_eq!(score, MATE_SCORE + depth as i32 - 1);
        assert!(!outcome.random_fallback);
    }
}

#[test]
fn test_pick_best_move_first_seen_wins_ties() {
    // Nothing can be captured within two plies, so every root move scores 0.
    let pos = Position::startpos();
    let first = chess_core::legal_moves(&pos)[0];
    let mut rng = StdRng::seed_from_u64(1);

    for depth in 1..=2 {
        let mut nodes = 0;
        let outcome = pick_best_move(&pos, &SearchParams::new(depth), &mut nodes, &mut rng).unwrap();
        assert_eq!(outcome.best_move, Some((first, 0)));
    }
}

#[test]
fn test_pick_best_move_prefers_capture() {
    // Free black queen on d5.
    let pos = fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let mut nodes = 0;
    let mut rng = StdRng::seed_from_u64(3);
    let outcome = pick_best_move(&pos, &SearchParams::new(2), &mut nodes, &mut rng).unwrap();
    let (mv, score) = outcome.best_move.unwrap();
    assert_eq!(mv.to_string(), "d1d5");
    assert_eq!(score, 500);
}

#[test]
fn test_pick_best_move_without_moves() {
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    let mut nodes = 0;
    let mut rng = StdRng::seed_from_u64(0);
    let outcome = pick_best_move(&pos, &SearchParams::new(3), &mut nodes, &mut rng).unwrap();
    assert_eq!(outcome.best_move, None);
    assert_eq!(nodes, 0);
}

#[test]
fn test_search_params_clamp_depth() {
    assert_eq!(SearchParams::new(0).max_depth, 1);
    assert_eq!(SearchParams::new(4).alpha, -INFINITY);
    assert_eq!(SearchParams::new(4).beta, INFINITY);
}

#[test]
fn test_fault_on_a_move_leaves_position_intact() {
    let start = Position::startpos();
    let mut pos = start.clone();
    let mut nodes = 0;
    // e3 is empty
    let err = score_move(&mut pos, Move::new(20, 28), 2, -INFINITY, INFINITY, &mut nodes);
    assert!(matches!(err, Err(RulesFault::EmptySquare { .. })));
    assert_eq!(pos, start);
    assert_eq!(nodes, 0);

    let start = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut pos = start.clone();
    let mut castle = Move::new(4, 6);
    castle.is_castle = true;
    let err = score_move(&mut pos, castle, 3, -INFINITY, INFINITY, &mut nodes);
    assert!(matches!(err, Err(RulesFault::MissingRook { .. })));
    assert_eq!(pos, start);
}

#[test]
fn test_score_move_restores_position_after_deep_search() {
    let start = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let mut pos = start.clone();
    let mut nodes = 0;
    for mv in chess_core::legal_moves(&start).into_iter().take(4) {
        let score = score_move(&mut pos, mv, 1, -INFINITY, INFINITY, &mut nodes).unwrap();
        let mut child = start.clone();
        child.make_move(mv).unwrap();
        assert_eq!(score, -reference_minimax(&mut child, 1));
        assert_eq!(pos, start);
    }
    assert!(nodes > 4);
}
