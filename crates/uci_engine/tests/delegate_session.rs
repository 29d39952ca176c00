//! The engine binary driven through the delegate adapter, as the practice
//! opponent uses it.

use std::time::Duration;

use chess_core::{legal_moves, Position};
use delegate_engine::{Delegate, DelegateSettings, SessionState, UciDelegate};

fn settings() -> DelegateSettings {
    let mut settings = DelegateSettings::new(env!("CARGO_BIN_EXE_uci_engine"));
    settings.skill_level = 5;
    settings.depth = Some(2);
    settings.handshake_timeout = Duration::from_secs(10);
    settings.move_timeout = Duration::from_secs(10);
    settings
}

#[test]
fn test_delegate_handshake_and_moves() {
    let mut delegate = UciDelegate::new(settings());
    delegate.start().unwrap();
    assert_eq!(delegate.state(), SessionState::Ready);
    assert_eq!(delegate.engine_name(), Some("Classical v1.0"));

    for fen in [
        chess_core::START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/8/8/8/8/8/6k1/7K w - - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        let mv = delegate.request_move(&pos).unwrap();
        assert!(legal_moves(&pos).contains(&mv), "{fen}: {mv}");
    }
    assert_eq!(delegate.state(), SessionState::Ready);

    delegate.shutdown();
    assert_eq!(delegate.state(), SessionState::Unavailable);
}

#[test]
fn test_delegate_finds_mate() {
    let mut delegate = UciDelegate::new(settings());
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    assert_eq!(delegate.request_move(&pos).unwrap().to_string(), "e1e8");
}

#[test]
fn test_no_move_demotes_session() {
    let mut delegate = UciDelegate::new(settings());
    let stalemate = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(delegate.request_move(&stalemate).is_err());
    assert_eq!(delegate.state(), SessionState::Unavailable);
}
