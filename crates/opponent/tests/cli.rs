//! End-to-end checks of the `opponent` binary.

use std::process::Command;

fn opponent() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_opponent"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_apply_prints_report() {
    let out = opponent()
        .args(["apply", "--fen", chess_core::START_FEN, "--move", "g1f3"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["ok"], true);
    assert_eq!(
        report["fen"],
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1"
    );
}

#[test]
fn test_choose_two_kings() {
    let out = opponent()
        .args(["choose", "--fen", "8/8/8/8/8/8/6k1/7K w - - 0 1", "--depth", "2", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let decision: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(decision["move"], "h1g2");
    assert_eq!(decision["source"], "search");
}

#[test]
fn test_choose_with_missing_engine_still_moves() {
    let out = opponent()
        .args([
            "choose",
            "--fen",
            "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1",
            "--depth",
            "2",
            "--engine",
            "/nonexistent/stockfish",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "e1e8");
}

#[test]
fn test_stalemate_has_no_move() {
    let out = opponent()
        .args(["choose", "--fen", "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "(none)");
}

#[test]
fn test_bad_fen_fails() {
    let out = opponent()
        .args(["choose", "--fen", "8/8/8 w"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn test_selfplay_outputs_record() {
    let out = opponent()
        .args(["selfplay", "--plies", "4", "--depth", "1"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let record: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(record["moves"].as_array().unwrap().len(), 4);
    assert_eq!(record["termination"], "max_plies");
}
