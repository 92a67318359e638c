//! Turning oracle output into move candidates and whittling them down.
//!
//! The oracle answers one request with 16 predictions, one per symmetry
//! and colour variant of the position. [`extract_moves`] folds those
//! back onto canonical coordinates; [`filter_moves`] keeps the handful
//! worth spending simulations on.

use std::cmp::Ordering;

use crate::constants::{BATCH, BATCH_CELLS, CELLS};
use crate::fen::format_move;
use crate::transform::{INVERSE_TRANSFORM, Point, transform};

/// Where a candidate's weight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Oracle,
    Hint,
}

/// A scored move under consideration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pos: Point,
    pub weight: f32,
    pub source: CandidateSource,
}

/// Fold a 16-slot oracle output back onto canonical cells.
///
/// Raw weights are cubed to sharpen the distribution, weights from the
/// colour-negated half are negated back, and each value lands on the
/// cell its slot's symmetry maps to. Forbidden cells are dropped; all
/// other cells come out in board order.
pub fn extract_moves(data: &[f32], forbidden: &[bool; CELLS]) -> Vec<Candidate> {
    debug_assert_eq!(data.len(), BATCH_CELLS);
    let mut acc = [0.0f32; CELLS];
    for slot in 0..BATCH {
        let base = slot * CELLS;
        let n = INVERSE_TRANSFORM[slot];
        for pos in 0..CELLS {
            let raw = data[base + pos];
            let w = raw * raw * raw;
            let cell = transform(pos, n);
            if forbidden[cell] {
                continue;
            }
            acc[cell] += if slot >= BATCH / 2 { -w } else { w };
        }
    }
    let mut moves = Vec::new();
    for (pos, &weight) in acc.iter().enumerate() {
        if forbidden[pos] {
            continue;
        }
        moves.push(Candidate { pos, weight, source: CandidateSource::Oracle });
    }
    moves
}

/// Keep the strongest candidates: the best `min` unconditionally, then
/// close runners-up to at most `max`.
///
/// Candidates are ordered by descending weight magnitude. Past the
/// floor, growth stops at the first candidate whose magnitude times
/// `coeff` no longer reaches its predecessor's. Ties keep their input
/// order. Every kept candidate is echoed to `sink` as
/// `"<coordinate>: <weight>"`.
pub fn filter_moves(
    mut moves: Vec<Candidate>,
    min: usize,
    max: usize,
    coeff: f32,
    sink: &mut dyn FnMut(&str),
) -> Vec<Candidate> {
    moves.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(Ordering::Equal)
    });
    if moves.is_empty() {
        return moves;
    }
    let mut keep = moves.len().min(min).max(1);
    while keep < moves.len() && keep < max {
        if moves[keep].weight.abs() * coeff < moves[keep - 1].weight.abs() {
            break;
        }
        keep += 1;
    }
    moves.truncate(keep);
    for m in &moves {
        sink(&format!("{}: {}", format_move(Some(m.pos)), m.weight));
    }
    moves
}
