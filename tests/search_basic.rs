use rand::rngs::mock::StepRng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rookbot::search::eval::{SCORE_MAX, SCORE_MIN};
use rookbot::search::{LevelDepth, NodeScore};
use rookbot::{Board, Color, EngineError, Square};

fn sq(label: &str) -> Square {
    label.parse().expect("valid square")
}

#[test]
fn material_scores_mirror_between_colors() {
    let mut b = Board::new();
    assert_eq!(b.calculate_score(Color::White), 0.0);
    for (from, to) in [("E2", "E4"), ("D7", "D5"), ("E4", "D5"), ("D8", "D5"), ("B1", "C3")] {
        b.move_piece(sq(from), sq(to)).unwrap();
        let w = b.calculate_score(Color::White);
        let bl = b.calculate_score(Color::Black);
        assert_eq!(w + bl, 0.0, "scores not mirrored after {from}{to}: {w} vs {bl}");
    }
    // pawn for pawn traded, then the queen recaptured: level material
    assert_eq!(b.calculate_score(Color::White), 0.0);
}

#[test]
fn terminal_positions_score_at_the_bounds() {
    let mut b = Board::new();
    for (from, to) in [("F2", "F3"), ("E7", "E5"), ("G2", "G4"), ("D8", "H4")] {
        b.move_piece(sq(from), sq(to)).unwrap();
    }
    b.moves();
    assert_eq!(b.calculate_score(Color::White), SCORE_MIN);
    assert_eq!(b.calculate_score(Color::Black), SCORE_MAX);

    let mut b = Board::from_json(r#"{"pieces":{"A8":"k","B6":"Q","C6":"K"},"turn":"black"}"#).unwrap();
    b.moves();
    assert_eq!(b.calculate_score(Color::Black), SCORE_MAX);
    assert_eq!(b.calculate_score(Color::White), SCORE_MIN);
}

#[test]
fn invalid_level_is_rejected() {
    let mut b = Board::new();
    let mut rng = StepRng::new(0, 0);
    let err = b.calculate_ai_moves(9, &mut rng).unwrap_err();
    assert!(matches!(err, EngineError::InvalidLevel { level: 9, .. }));
    assert!(err.to_string().contains("0,1,2,3,4"));
}

#[test]
fn ai_moves_are_all_legal_and_sorted() {
    let mut rng = SmallRng::seed_from_u64(3);
    for level in [0u8, 1] {
        let mut b = Board::new();
        for (from, to) in [("E2", "E4"), ("E7", "E5"), ("G1", "F3")] {
            b.move_piece(sq(from), sq(to)).unwrap();
        }
        let ranked = b.calculate_ai_moves(level, &mut rng).unwrap();
        let legal = b.moves();
        let total: usize = legal.values().map(Vec::len).sum();
        assert_eq!(ranked.len(), total);
        for m in &ranked {
            assert!(legal.get(&m.from).is_some_and(|t| t.contains(&m.to)), "{}{} is not legal", m.from, m.to);
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn search_prefers_winning_queen_capture() {
    let mut b = Board::from_json(r#"{"pieces":{"H1":"K","E2":"Q","A8":"k","E7":"q"}}"#).unwrap();
    let mut rng = StepRng::new(0, 0);
    let best = b.calculate_ai_move(0, &mut rng).unwrap().expect("expected a best move");
    assert_eq!((best.from, best.to), (sq("E2"), sq("E7")), "expected Qe2xe7, got {}{}", best.from, best.to);
}

#[test]
fn search_finds_back_rank_mate() {
    let json = r#"{"pieces":{"G1":"K","A1":"R","G8":"k","F7":"p","G7":"p","H7":"p"}}"#;
    let mut b = Board::from_json(json).unwrap();
    let mut rng = StepRng::new(0, 0);
    let best = b.calculate_ai_move(0, &mut rng).unwrap().unwrap();
    assert_eq!((best.from, best.to), (sq("A1"), sq("A8")));
    assert!(best.score > 900.0, "mate should score near the bound, got {}", best.score);
}

#[test]
fn seeded_rankings_are_reproducible() {
    let mut b = Board::new();
    let first = b.calculate_ai_moves(1, &mut SmallRng::seed_from_u64(99)).unwrap();
    let second = b.calculate_ai_moves(1, &mut SmallRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn finished_position_has_no_ai_move() {
    let mut b = Board::from_json(r#"{"pieces":{"A8":"k","B6":"Q","C6":"K"},"turn":"black"}"#).unwrap();
    let mut rng = StepRng::new(0, 0);
    assert_eq!(b.calculate_ai_move(2, &mut rng).unwrap(), None);
    assert!(b.is_finished());
}

#[test]
fn low_material_bumps_the_level() {
    assert!(!Board::new().should_increase_level());
    let b = Board::from_json(r#"{"pieces":{"H1":"K","E2":"Q","A8":"k","E7":"q"}}"#).unwrap();
    assert_eq!(b.ingame_pieces_value(), 38);
    assert!(b.should_increase_level());
}

#[test]
fn test_move_scores_returns_carried_score_at_leaves() {
    let mut b = Board::new();
    let depth = rookbot::search::level::depth(0);
    let node = b.test_move_scores(Color::White, depth, false, Some(12.5), 1);
    assert_eq!(node.score, 12.5);
    assert!(!node.terminal);
}

const BACK_RANK_MATED: &str = r#"{"pieces":{"G1":"K","A8":"R","G8":"k","F7":"p","G7":"p","H7":"p"},"turn":"black"}"#;

#[test]
fn in_check_nodes_search_past_the_base_depth() {
    let quiet_only = LevelDepth { base: 1, extended: 1 };
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    let node = b.test_move_scores(Color::White, quiet_only, false, Some(7.0), 1);
    assert_eq!(node, NodeScore { score: 7.0, terminal: false });
    assert!(!b.is_finished());

    let extended = LevelDepth { base: 1, extended: 2 };
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    let node = b.test_move_scores(Color::White, extended, false, Some(7.0), 1);
    assert_eq!(node, NodeScore { score: SCORE_MAX - 1.0, terminal: true });
    assert!(b.is_check_mate());
}

#[test]
fn faster_mates_score_further_from_zero() {
    let depth = rookbot::search::level::depth(4);
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    assert_eq!(b.test_move_scores(Color::White, depth, false, None, 1).score, SCORE_MAX - 1.0);
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    assert_eq!(b.test_move_scores(Color::White, depth, false, None, 3).score, SCORE_MAX - 3.0);

    // from the mated side, a later mate is the lesser loss
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    assert_eq!(b.test_move_scores(Color::Black, depth, false, None, 1).score, SCORE_MIN + 1.0);
    let mut b = Board::from_json(BACK_RANK_MATED).unwrap();
    assert_eq!(b.test_move_scores(Color::Black, depth, false, None, 3).score, SCORE_MIN + 3.0);
}

#[test]
fn search_sees_mating_check_replies_through_the_extension() {
    // leaving the first rank allows ...Re1#, which lands on a ply equal to the base depth
    let json = r#"{"pieces":{"G1":"K","F2":"P","G2":"P","H2":"P","D1":"R",
        "G8":"k","F7":"p","G7":"p","H7":"p","E8":"r"}}"#;
    let mut b = Board::from_json(json).unwrap();
    assert!(b.should_increase_level());
    assert_eq!(rookbot::search::level::depth(2), LevelDepth { base: 2, extended: 3 });

    let ranked = b.calculate_ai_moves(1, &mut StepRng::new(0, 0)).unwrap();
    for to in ["D2", "D3", "D4", "D5", "D6", "D7"] {
        let m = ranked
            .iter()
            .find(|m| m.from == sq("D1") && m.to == sq(to))
            .expect("rook move is legal");
        assert!(m.score < -900.0, "D1{to} allows mate but scored {}", m.score);
    }
    let best = ranked[0];
    assert!(best.score > -900.0, "best move {}{} scored {}", best.from, best.to, best.score);
}
