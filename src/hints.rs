//! Tactical hints: captures and escapes around groups in atari.

use crate::analysis::{BoardStat, RegionKind};
use crate::board::{Board, is_friend, is_vacant};
use crate::candidates::{Candidate, CandidateSource};
use crate::constants::{
    CAPTURE_HINT_BASE, DIRS, ESCAPE_HINT_BASE, ESCAPE_MIN_DAME, HINT_SIZE_STEP,
};
use crate::transform::{Point, navigate};

/// Suggest urgent moves for `player`: taking enemy groups with a single
/// liberty left, and pulling own such groups out when the escape point
/// has enough breathing room. Weights grow with the size of the group at
/// stake.
pub fn tactical_hints(board: &Board, stat: &BoardStat, player: f32) -> Vec<Candidate> {
    let mut hints = Vec::new();
    for region in &stat.regions {
        if region.kind != RegionKind::Enemy || region.dame.len() != 1 {
            continue;
        }
        hints.push(Candidate {
            pos: region.dame[0],
            weight: CAPTURE_HINT_BASE + HINT_SIZE_STEP * region.cells.len() as f32,
            source: CandidateSource::Hint,
        });
    }
    for region in &stat.regions {
        if region.kind != RegionKind::Friend || region.dame.len() != 1 {
            continue;
        }
        let escape = region.dame[0];
        if is_dead(board, stat, escape, player) {
            continue;
        }
        hints.push(Candidate {
            pos: escape,
            weight: ESCAPE_HINT_BASE + HINT_SIZE_STEP * region.cells.len() as f32,
            source: CandidateSource::Hint,
        });
    }
    hints
}

/// A stone played at `pos` is dead on arrival when the liberties of the
/// friendly groups it joins (minus `pos` itself) plus its own empty
/// neighbours come to fewer than [`ESCAPE_MIN_DAME`].
fn is_dead(board: &Board, stat: &BoardStat, pos: Point, player: f32) -> bool {
    let mut dame = 0;
    let mut joined: Vec<usize> = Vec::new();
    for dir in DIRS {
        let Some(q) = navigate(pos, dir) else { continue };
        let v = board.cells[q];
        if is_friend(v, player) {
            let ix = stat.map[q];
            if joined.contains(&ix) {
                continue;
            }
            joined.push(ix);
            dame += stat.regions[ix].dame.len().saturating_sub(1);
        } else if is_vacant(v) {
            dame += 1;
        }
    }
    dame < ESCAPE_MIN_DAME
}
