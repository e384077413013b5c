use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rookbot::{Board, Color, EngineError, Piece, PieceKind, Square};

fn sq(label: &str) -> Square {
    label.parse().expect("valid square")
}

fn play(board: &mut Board, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        board.move_piece(sq(from), sq(to)).expect("piece on origin");
    }
}

#[test]
fn fools_mate_is_detected_as_checkmate() {
    let mut b = Board::new();
    play(&mut b, &[("F2", "F3"), ("E7", "E5"), ("G2", "G4"), ("D8", "H4")]);
    let moves = b.get_moves(Color::White, None);
    assert!(moves.is_empty(), "white should have no legal moves: {moves:?}");
    assert!(b.is_finished());
    assert!(b.is_check_mate());
}

#[test]
fn stalemate_finishes_without_checkmate() {
    let mut b = Board::from_json(r#"{"pieces":{"A8":"k","B6":"Q","C6":"K"},"turn":"black"}"#).unwrap();
    assert!(!b.has_playing_player_check());
    assert!(b.moves().is_empty());
    assert!(b.is_finished());
    assert!(!b.is_check_mate());
}

#[test]
fn turn_alternates_on_every_move_including_castling() {
    let mut b = Board::new();
    let line = [
        ("E2", "E4"), ("E7", "E5"), ("G1", "F3"), ("B8", "C6"),
        ("F1", "C4"), ("G8", "F6"), ("E1", "G1"), ("F8", "C5"),
    ];
    let mut expected = Color::White;
    for (from, to) in line {
        assert_eq!(b.playing_color(), expected);
        let legal = b.moves();
        assert!(legal[&sq(from)].contains(&sq(to)), "{from}{to} should be legal");
        b.move_piece(sq(from), sq(to)).unwrap();
        expected = !expected;
    }
    assert_eq!(b.playing_color(), Color::White);
    assert_eq!(b.position().full_move, 5);
}

#[test]
fn castling_moves_the_rook_and_clears_rights() {
    let mut b = Board::new();
    b.remove_piece(Square::F1);
    b.remove_piece(Square::G1);
    assert!(b.moves()[&Square::E1].contains(&Square::G1));

    b.move_piece(Square::E1, Square::G1).unwrap();
    assert_eq!(b.piece(Square::G1), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(b.piece(Square::F1), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert!(b.is_empty(Square::H1));
    assert!(!b.position().castling.white_short);
    assert!(!b.position().castling.white_long);
    assert!(b.position().castling.black_short);
    assert_eq!(b.playing_color(), Color::Black);
    assert_eq!(b.position().half_move, 1);
    assert_eq!(b.position().full_move, 1);
}

#[test]
fn castling_is_gated_by_blockers_and_attacks() {
    let mut b = Board::new();
    b.remove_piece(Square::F1);
    b.remove_piece(Square::G1);
    b.set_piece(Square::G1, Piece::new(Color::White, PieceKind::Knight));
    assert!(!b.moves()[&Square::E1].contains(&Square::G1));

    let json = r#"{"pieces":{"E1":"K","H1":"R","A1":"R","E8":"k","F8":"r"},
        "castling":{"whiteShort":true,"whiteLong":true,"blackShort":false,"blackLong":false}}"#;
    let mut b = Board::from_json(json).unwrap();
    let king_moves = &b.moves()[&Square::E1];
    assert!(!king_moves.contains(&Square::G1), "F1 is attacked");
    assert!(king_moves.contains(&Square::C1));

    let json = r#"{"pieces":{"E1":"K","H1":"R","A1":"R","E8":"k","E5":"r"},
        "castling":{"whiteShort":true,"whiteLong":true,"blackShort":false,"blackLong":false}}"#;
    let mut b = Board::from_json(json).unwrap();
    let king_moves = b.moves().remove(&Square::E1).unwrap_or_default();
    assert!(!king_moves.contains(&Square::G1) && !king_moves.contains(&Square::C1), "king in check cannot castle");
}

#[test]
fn queenside_castle_needs_the_rook_only_square_empty_but_not_safe() {
    let json = r#"{"pieces":{"E1":"K","A1":"R","E8":"k","B8":"r"},
        "castling":{"whiteShort":false,"whiteLong":true,"blackShort":false,"blackLong":false}}"#;
    let mut b = Board::from_json(json).unwrap();
    assert!(b.moves()[&Square::E1].contains(&Square::C1), "B1 may be attacked");

    b.set_piece(Square::B1, Piece::new(Color::White, PieceKind::Knight));
    assert!(!b.moves()[&Square::E1].contains(&Square::C1), "B1 must be empty");

    b.move_piece(Square::B1, sq("A3")).unwrap();
    b.move_piece(Square::E8, sq("E7")).unwrap();
    b.move_piece(Square::E1, Square::C1).unwrap();
    assert_eq!(b.piece(Square::D1), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert!(b.is_empty(Square::A1));
}

#[test]
fn rook_moves_clear_a_single_right() {
    let mut b = Board::new();
    play(&mut b, &[("H2", "H4"), ("A7", "A5"), ("H1", "H3"), ("A8", "A6")]);
    let c = b.position().castling;
    assert!(!c.white_short && c.white_long);
    assert!(!c.black_long && c.black_short);
}

#[test]
fn en_passant_target_lives_for_one_ply() {
    let mut b = Board::new();
    b.move_piece(sq("E2"), sq("E4")).unwrap();
    assert_eq!(b.position().en_passant, Some(sq("E3")));
    b.move_piece(sq("A7"), sq("A6")).unwrap();
    assert_eq!(b.position().en_passant, None);
    b.move_piece(sq("E4"), sq("E5")).unwrap();
    assert_eq!(b.position().en_passant, None, "single step never sets a target");
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let json = r#"{"pieces":{"E1":"K","E8":"k","E5":"P","D7":"p"},"turn":"black"}"#;
    let mut b = Board::from_json(json).unwrap();
    b.move_piece(sq("D7"), sq("D5")).unwrap();
    assert_eq!(b.position().en_passant, Some(sq("D6")));
    assert!(b.moves()[&sq("E5")].contains(&sq("D6")));

    b.move_piece(sq("E5"), sq("D6")).unwrap();
    assert!(b.is_empty(sq("D5")));
    assert_eq!(b.piece(sq("D6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(b.position().en_passant, None);
    assert_eq!(b.position().half_move, 0);
}

#[test]
fn pawns_auto_promote_to_queens() {
    for file in ["A", "D", "H"] {
        let json = format!(r#"{{"pieces":{{"E1":"K","B3":"k","{file}7":"P"}}}}"#);
        let mut b = Board::from_json(&json).unwrap();
        b.move_piece(sq(&format!("{file}7")), sq(&format!("{file}8"))).unwrap();
        assert_eq!(b.piece(sq(&format!("{file}8"))), Some(Piece::new(Color::White, PieceKind::Queen)));
    }
    let json = r#"{"pieces":{"E1":"K","E8":"k","C2":"p"},"turn":"black"}"#;
    let mut b = Board::from_json(json).unwrap();
    b.move_piece(sq("C2"), sq("C1")).unwrap();
    assert_eq!(b.piece(sq("C1")).map(Piece::to_char), Some('q'));
}

#[test]
fn half_move_clock_resets_on_pawn_moves_and_captures() {
    let mut b = Board::new();
    play(&mut b, &[("G1", "F3"), ("G8", "F6"), ("F3", "G1")]);
    assert_eq!(b.position().half_move, 3);
    b.move_piece(sq("E7"), sq("E5")).unwrap();
    assert_eq!(b.position().half_move, 0);
    play(&mut b, &[("B1", "C3"), ("F6", "E4"), ("C3", "E4")]);
    assert_eq!(b.position().half_move, 0);
}

#[test]
fn legal_moves_never_leave_the_mover_in_check() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..4 {
        let mut b = Board::new();
        for _ in 0..60 {
            let moves: Vec<(Square, Square)> = b
                .moves()
                .into_iter()
                .flat_map(|(from, targets)| targets.into_iter().map(move |to| (from, to)))
                .collect();
            if moves.is_empty() { break; }
            let (from, to) = moves[rng.gen_range(0..moves.len())];
            b.move_piece(from, to).unwrap();
            assert!(!b.has_non_playing_player_check(), "{from}{to} left the mover in check");
        }
    }
}

#[test]
fn pinned_pieces_cannot_expose_the_king() {
    let json = r#"{"pieces":{"E1":"K","E2":"N","E8":"r","A8":"k"}}"#;
    let mut b = Board::from_json(json).unwrap();
    assert!(!b.moves().contains_key(&sq("E2")));
}

#[test]
fn moving_from_an_empty_square_is_an_error() {
    let mut b = Board::new();
    let err = b.move_piece(sq("E4"), sq("E5")).unwrap_err();
    assert!(matches!(err, EngineError::EmptySquare(s) if s == sq("E4")));
}

#[test]
fn validated_mutators_reject_bad_input() {
    let mut b = Board::new();
    assert!(matches!(b.set_piece_str("Z9", "Q"), Err(EngineError::InvalidSquare(_))));
    assert!(matches!(b.set_piece_str("E4", "X"), Err(EngineError::InvalidPiece(_))));
    assert!(matches!(b.remove_piece_str("E44"), Err(EngineError::InvalidSquare(_))));
    assert!(matches!(b.is_empty_str(""), Err(EngineError::InvalidSquare(_))));
    b.set_piece_str("e4", "q").unwrap();
    assert_eq!(b.piece(sq("E4")).map(Piece::to_char), Some('q'));
    assert!(!b.is_empty_str("E4").unwrap());
}

#[test]
fn branching_short_circuit_skips_the_legality_filter() {
    // E2 knight is pinned; with the threshold exceeded its moves come back anyway
    let json = r#"{"pieces":{"E1":"K","E2":"N","E8":"r","A8":"k","A2":"P","B2":"P","C2":"P","G2":"P","H2":"P","B1":"N"}}"#;
    let mut b = Board::from_json(json).unwrap();
    assert!(b.get_moves(Color::White, Some(3)).contains_key(&sq("E2")));
    assert!(b.get_moves(Color::White, Some(0)).contains_key(&sq("E2")), "zero never falls back to filtering");
    assert!(!b.get_moves(Color::White, Some(10)).contains_key(&sq("E2")));
    assert!(!b.get_moves(Color::White, None).contains_key(&sq("E2")));
}
