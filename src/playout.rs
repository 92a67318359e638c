//! Rollout simulation and position scoring for the search loop.
//!
//! A rollout applies the candidate under investigation, then lets the
//! sides answer each other with moves sampled from fresh oracle
//! distributions until the ply cap is reached or nothing playable
//! remains. The final position is judged by area scoring.

use crate::analysis::{Border, RegionKind, analyze};
use crate::board::{Board, Undo, apply_move, forbidden_cells};
use crate::candidates::{Candidate, extract_moves, filter_moves};
use crate::constants::{FILTER_COEFF, FILTER_MAX, FILTER_MIN};
use crate::oracle::{Oracle, OracleError, predict_position};
use crate::transform::Point;

/// Pick an index from `moves` with probability proportional to weight
/// magnitude. Falls back to a uniform pick when every weight is zero.
fn weighted_choose(moves: &[Candidate], rng: &mut fastrand::Rng) -> Option<usize> {
    if moves.is_empty() {
        return None;
    }
    let total: f32 = moves.iter().map(|m| m.weight.abs()).sum();
    if total <= 0.0 {
        return Some(rng.usize(..moves.len()));
    }
    let draw = rng.f32() * total;
    let mut cum = 0.0;
    for (i, m) in moves.iter().enumerate() {
        cum += m.weight.abs();
        if cum >= draw {
            return Some(i);
        }
    }
    Some(moves.len() - 1)
}

/// Play out one line: `first` for the side to move, then up to `depth`
/// alternating replies sampled from the oracle. Every board mutation is
/// recorded on `undo` so the caller can unwind, including after an
/// oracle error.
///
/// `first` is expected to be playable. An unplayable `first` ends the
/// line immediately with the board untouched, so the caller scores the
/// unchanged position.
pub fn simulate<O: Oracle + ?Sized>(
    board: &mut Board,
    first: Point,
    oracle: &O,
    depth: usize,
    undo: &mut Vec<Undo>,
    rng: &mut fastrand::Rng,
) -> Result<(), OracleError> {
    let mut player = 1.0f32;
    let mut ko = match apply_move(board, first, player, undo) {
        Ok(outcome) => outcome.ko,
        Err(_) => return Ok(()),
    };
    for _ in 0..depth {
        player = -player;
        let data = predict_position(oracle, board, player)?;
        let forbidden = forbidden_cells(board, ko);
        let raw = extract_moves(&data, &forbidden);
        let mut quiet = |_: &str| {};
        let mut moves = filter_moves(raw, FILTER_MIN, FILTER_MAX, FILTER_COEFF, &mut quiet);
        loop {
            let Some(i) = weighted_choose(&moves, rng) else {
                // Nothing playable for this side; the line ends here.
                return Ok(());
            };
            let mv = moves.swap_remove(i);
            match apply_move(board, mv.pos, player, undo) {
                Ok(outcome) => {
                    ko = outcome.ko;
                    break;
                }
                Err(_) => continue,
            }
        }
    }
    Ok(())
}

/// Area score of the position for `player`: own stones plus empty
/// regions bordered exclusively by own stones, minus the same for the
/// opponent. Contested regions count for nobody.
pub fn estimate(board: &Board, player: f32) -> f32 {
    let stat = analyze(board, player);
    let mut score = 0.0;
    for region in &stat.regions {
        let size = region.cells.len() as f32;
        match region.kind {
            RegionKind::Friend => score += size,
            RegionKind::Enemy => score -= size,
            RegionKind::Empty => match region.border {
                Border::Friend => score += size,
                Border::Enemy => score -= size,
                Border::None | Border::Mixed => {}
            },
        }
    }
    score
}
