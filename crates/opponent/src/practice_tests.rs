use super::*;
use crate::OpponentConfig;

fn game(fen: &str, human: Color) -> PracticeGame {
    let opponent = Opponent::new(OpponentConfig::search_only(2));
    PracticeGame::new(opponent, human, Position::from_fen(fen).unwrap())
}

#[test]
fn test_apply_legal_move() {
    let report = apply_move_text(chess_core::START_FEN, "e2e4").unwrap();
    assert!(report.ok);
    assert_eq!(
        report.fen,
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    assert_eq!(report.legal_moves.len(), 20);
    assert!(report.legal_moves.contains(&"e7e5".to_string()));
}

#[test]
fn test_apply_illegal_move_keeps_position() {
    let report = apply_move_text(chess_core::START_FEN, "e2e5").unwrap();
    assert!(!report.ok);
    assert_eq!(report.fen, chess_core::START_FEN);
    assert_eq!(report.legal_moves.len(), 20);
}

#[test]
fn test_apply_rejects_bad_input() {
    assert!(matches!(
        apply_move_text("not a fen", "e2e4"),
        Err(PracticeError::InvalidPosition(_))
    ));
    assert_eq!(
        apply_move_text(chess_core::START_FEN, "e2"),
        Err(PracticeError::InvalidMoveText {
            text: "e2".to_string()
        })
    );
}

#[test]
fn test_report_serializes_to_json() {
    let report = apply_move_text("7k/8/8/8/8/8/8/K7 w - - 0 1", "a1a2").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["fen"], "7k/8/8/8/8/8/K7/8 b - - 1 1");
    assert_eq!(json["legal_moves"].as_array().unwrap().len(), 3);
}

#[test]
fn test_human_then_computer() {
    let mut game = game(chess_core::START_FEN, Color::White);
    assert_eq!(game.status(), PracticeStatus::YourMove);
    assert_eq!(game.status().to_string(), "Your move");

    game.play_human("e2e4").unwrap();
    assert_eq!(game.status().to_string(), "Computer's move");
    assert_eq!(game.play_human("d2d4"), Err(PracticeError::NotYourTurn));

    let reply = game.reply().unwrap().unwrap();
    assert_eq!(game.moves().len(), 2);
    assert_eq!(game.moves()[1], reply.mv);
    assert_eq!(game.status(), PracticeStatus::YourMove);

    // Nothing to do on the human's turn.
    assert_eq!(game.reply().unwrap(), None);
}

#[test]
fn test_illegal_human_move_changes_nothing() {
    let mut game = game(chess_core::START_FEN, Color::White);
    let before = game.position().clone();
    assert_eq!(
        game.play_human("e2e5"),
        Err(PracticeError::IllegalMove {
            text: "e2e5".to_string()
        })
    );
    assert!(matches!(
        game.play_human("zz"),
        Err(PracticeError::InvalidMoveText { .. })
    ));
    assert_eq!(game.position(), &before);
    assert!(game.moves().is_empty());
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut queened = game("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", Color::White);
    let mv = queened.play_human("b7b8").unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Queen));

    let mut underpromoted = game("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", Color::White);
    let mv = underpromoted.play_human("b7b8n").unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Knight));
}

#[test]
fn test_human_as_black_waits_for_computer() {
    let mut game = game(chess_core::START_FEN, Color::Black);
    assert_eq!(game.human(), Color::Black);
    assert_eq!(game.status(), PracticeStatus::ComputerMove);
    assert_eq!(game.play_human("e7e5"), Err(PracticeError::NotYourTurn));
    assert!(game.reply().unwrap().is_some());
    assert_eq!(game.status(), PracticeStatus::YourMove);
}

#[test]
fn test_end_of_game_statuses() {
    // Human (White) just mated Black.
    let won = game(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        Color::White,
    );
    assert_eq!(won.status(), PracticeStatus::YouWin);
    assert_eq!(won.status().to_string(), "You Win!");

    let lost = game(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        Color::Black,
    );
    assert_eq!(lost.status().to_string(), "You Lose!");

    let mut drawn = game("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", Color::Black);
    assert_eq!(drawn.status().to_string(), "Draw: stalemate");
    assert_eq!(drawn.play_human("a8a7"), Err(PracticeError::GameOver));

    let bare = game("8/8/8/4k3/8/4K3/8/8 w - - 0 1", Color::White);
    assert_eq!(
        bare.status(),
        PracticeStatus::Draw(DrawReason::InsufficientMaterial)
    );
}

#[test]
fn test_computer_finishes_mate() {
    let mut game = game("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", Color::Black);
    let reply = game.reply().unwrap().unwrap();
    assert_eq!(reply.mv.to_string(), "e1e8");
    assert_eq!(game.status(), PracticeStatus::YouLose);
    assert_eq!(game.reply().unwrap(), None);
}
