use super::*;

#[test]
fn test_start_position_is_deterministic() {
    let pos = Position::startpos();
    let mut first = ClassicalEngine::new();
    let mut second = ClassicalEngine::new();

    let a = first.search(&pos, 2).unwrap();
    let b = first.search(&pos, 2).unwrap();
    let c = second.search(&pos, 2).unwrap();

    assert!(a.best_move.is_some());
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a.depth, 2);
    assert_eq!(first.nodes(), a.nodes);
}

#[test]
fn test_search_does_not_touch_caller_position() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = pos.clone();
    let mut engine = ClassicalEngine::with_seed(42);
    engine.search(&pos, 2).unwrap();
    assert_eq!(pos, before);
}

#[test]
fn test_no_legal_moves_reports_none() {
    let pos = Position::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = ClassicalEngine::with_seed(0);
    let result = engine.search(&pos, 2).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn test_new_game_resets_nodes() {
    let mut engine = ClassicalEngine::default();
    engine.search(&Position::startpos(), 1).unwrap();
    assert_eq!(engine.nodes(), 20);
    engine.new_game();
    assert_eq!(engine.nodes(), 0);
}
