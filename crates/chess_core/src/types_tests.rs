use super::*;

#[test]
fn test_move_equality_ignores_flags() {
    let mut castle = Move::new(4, 6);
    castle.is_castle = true;
    assert_eq!(castle, Move::new(4, 6));
}

#[test]
fn test_move_equality_compares_promotion() {
    // e7e8 without a promotion piece is a different move from e7e8q
    let plain = Move::new(52, 60);
    let queen = Move::with_promo(52, 60, PieceKind::Queen);
    let knight = Move::with_promo(52, 60, PieceKind::Knight);
    assert_ne!(plain, queen);
    assert_ne!(queen, knight);
    assert_eq!(queen, Move::with_promo(52, 60, PieceKind::Queen));
}

#[test]
fn test_move_from_uci() {
    assert_eq!(Move::from_uci("e2e4"), Some(Move::new(12, 28)));
    assert_eq!(
        Move::from_uci("a7a8q"),
        Some(Move::with_promo(48, 56, PieceKind::Queen))
    );
    assert_eq!(
        Move::from_uci("h2h1N"),
        Some(Move::with_promo(15, 7, PieceKind::Knight))
    );
}

#[test]
fn test_move_from_uci_rejects_garbage() {
    for txt in ["", "e2", "e2e", "i2e4", "e9e4", "e7e8k", "e7e8p", "e7e8qq", "0000", "é2e4"] {
        assert_eq!(Move::from_uci(txt), None, "{txt:?} should not parse");
    }
}

#[test]
fn test_coord_round_trip() {
    for s in 0..64u8 {
        assert_eq!(coord_to_sq(&sq_to_coord(s)), Some(s));
    }
}

#[test]
fn test_piece_symbol() {
    let wq = Piece {
        color: Color::White,
        kind: PieceKind::Queen,
    };
    let bn = Piece {
        color: Color::Black,
        kind: PieceKind::Knight,
    };
    assert_eq!(wq.symbol(), 'Q');
    assert_eq!(bn.symbol(), 'n');
}
