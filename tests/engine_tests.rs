//! End-to-end tests for the gobot engine.
//!
//! These drive the whole pipeline through the public API: position text
//! in, oracle round trip, candidate filtering, search, position text
//! out. The oracles here are tiny deterministic stand-ins.

use std::time::Duration;

use gobot::board::is_vacant;
use gobot::constants::{BATCH_CELLS, CELLS, FILTER_MAX, SIZE};
use gobot::engine::{Engine, EngineError};
use gobot::fen::{decode, format_move, parse_move};
use gobot::oracle::{Oracle, OracleError, UniformOracle};
use gobot::transform::Point;

// =============================================================================
// Helpers and test oracles
// =============================================================================

fn at(row: usize, col: usize) -> Point {
    row * SIZE + col
}

fn empty_fen() -> String {
    vec!["991"; SIZE].join("/")
}

/// Build a position string from sparse rows; unlisted rows stay empty.
fn fen_with_rows(rows: &[(usize, &str)]) -> String {
    let mut all: Vec<String> = vec!["991".to_string(); SIZE];
    for &(row, text) in rows {
        all[row] = text.to_string();
    }
    all.join("/")
}

/// Oracle with one strong opinion in the identity slot.
struct BiasedOracle {
    hot: Point,
}

impl Oracle for BiasedOracle {
    fn predict(&self, _input: &[f32]) -> Result<Vec<f32>, OracleError> {
        let mut data = vec![0.0; BATCH_CELLS];
        data[self.hot] = 0.9;
        Ok(data)
    }
}

/// Oracle that always fails.
struct BrokenOracle;

impl Oracle for BrokenOracle {
    fn predict(&self, _input: &[f32]) -> Result<Vec<f32>, OracleError> {
        Err(OracleError::new("model unavailable"))
    }
}

// =============================================================================
// find_move
// =============================================================================

#[test]
fn test_find_move_on_empty_board() {
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let result = engine
        .find_move(&empty_fen(), Some(Duration::from_millis(50)), &mut sink)
        .unwrap();

    let mv = result.mv.expect("empty board must yield a move");
    assert!(mv < CELLS);

    let after = decode(&result.fen).unwrap();
    assert_eq!(after.last, Some(mv), "the answer marks the played stone");
    assert!(!is_vacant(after.board.cells[mv]));
    assert!(result.confidence >= 0.0);
}

#[test]
fn test_find_move_zero_budget_follows_the_prior() {
    // With no time at all the pick falls back to the strongest
    // candidate; the biased oracle makes that unambiguous.
    let hot = at(3, 3);
    let engine = Engine::new(BiasedOracle { hot });
    let mut sink = |_: &str| {};
    let result = engine
        .find_move(&empty_fen(), Some(Duration::ZERO), &mut sink)
        .unwrap();
    assert_eq!(result.mv, Some(hot));
    assert!(result.confidence > 0.0);
}

#[test]
fn test_find_move_takes_the_obvious_capture() {
    // Four white stones on the top edge with a single liberty. The
    // uniform oracle has no opinion, so the capture hint is the only
    // non-zero weight and the zero-budget pick lands on it.
    let fen = fen_with_rows(&[(0, "wwwwb95"), (1, "1bbb96")]);
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let result = engine
        .find_move(&fen, Some(Duration::ZERO), &mut sink)
        .unwrap();
    assert_eq!(result.mv, Some(at(1, 0)));

    let after = decode(&result.fen).unwrap();
    for col in 0..4 {
        assert!(
            is_vacant(after.board.cells[at(0, col)]),
            "captured stone at column {col} must be gone"
        );
    }
    assert_eq!(after.last, Some(at(1, 0)));
}

#[test]
fn test_find_move_respects_the_ko_cell() {
    let fen = format!("X99/{}", vec!["991"; SIZE - 1].join("/"));
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let result = engine
        .find_move(&fen, Some(Duration::ZERO), &mut sink)
        .unwrap();
    assert_ne!(result.mv, Some(at(0, 0)), "the ko cell is forbidden");
    assert!(result.mv.is_some());
}

#[test]
fn test_find_move_skips_a_capture_hint_on_the_ko_cell() {
    // Fresh snapback: the white stone at (0, 1) is in atari and its only
    // liberty is the ko cell, so the capture hint lands exactly on the
    // one point the side to move may not play.
    let fen = fen_with_rows(&[(0, "Xwb97"), (1, "bb98")]);
    let position = decode(&fen).unwrap();
    assert_eq!(position.ko, Some(at(0, 0)));

    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let result = engine
        .find_move(&fen, Some(Duration::ZERO), &mut sink)
        .unwrap();
    assert!(result.mv.is_some());
    assert_ne!(result.mv, Some(at(0, 0)), "the ko retake is forbidden this turn");
}

#[test]
fn test_find_move_passes_on_a_full_board() {
    let full_row = "b".repeat(SIZE);
    let fen = vec![full_row.as_str(); SIZE].join("/");
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let result = engine.find_move(&fen, None, &mut sink).unwrap();
    assert_eq!(result.mv, None);
    assert_eq!(result.fen, fen, "a pass leaves the position unchanged");
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_find_move_reports_filtered_candidates() {
    let engine = Engine::new(BiasedOracle { hot: at(9, 9) });
    let mut lines = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    engine
        .find_move(&empty_fen(), Some(Duration::ZERO), &mut sink)
        .unwrap();
    assert!(!lines.is_empty());
    assert!(lines[0].starts_with(&format_move(Some(at(9, 9)))));
    assert!(lines.iter().all(|l| l.contains(": ")));
}

// =============================================================================
// advisor
// =============================================================================

#[test]
fn test_advisor_ranks_candidates() {
    let hot = at(15, 2);
    let engine = Engine::new(BiasedOracle { hot });
    let mut sink = |_: &str| {};
    let advice = engine.advisor(7, &empty_fen(), 2.0, &mut sink).unwrap();

    assert!(!advice.is_empty());
    assert!(advice.len() <= FILTER_MAX);
    assert_eq!(advice[0].mv, format_move(Some(hot)));
    assert!(advice[0].weight > 0.0);
    for a in &advice {
        assert_eq!(a.sid, 7);
        assert!(parse_move(&a.mv).is_some(), "{} must name a cell", a.mv);
    }
}

#[test]
fn test_advisor_skips_occupied_cells() {
    let fen = fen_with_rows(&[(4, "2b7w8")]);
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    let advice = engine.advisor(1, &fen, 2.0, &mut sink).unwrap();
    for a in &advice {
        let pos = parse_move(&a.mv).unwrap();
        assert_ne!(pos, at(4, 2));
        assert_ne!(pos, at(4, 10));
    }
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_malformed_positions_are_rejected() {
    let engine = Engine::new(UniformOracle::default());
    let mut sink = |_: &str| {};
    for bad in ["", "991", "zzz", &vec!["991"; SIZE + 1].join("/")] {
        let err = engine.find_move(bad, None, &mut sink).unwrap_err();
        assert!(matches!(err, EngineError::MalformedPosition(_)), "{bad:?}");
        let err = engine.advisor(0, bad, 2.0, &mut sink).unwrap_err();
        assert!(matches!(err, EngineError::MalformedPosition(_)), "{bad:?}");
    }
}

#[test]
fn test_oracle_failure_surfaces() {
    let engine = Engine::new(BrokenOracle);
    let mut sink = |_: &str| {};
    let err = engine.find_move(&empty_fen(), None, &mut sink).unwrap_err();
    assert!(matches!(err, EngineError::Oracle(_)));
    assert!(err.to_string().contains("model unavailable"));
}
