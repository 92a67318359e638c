//! Whole-board connectivity analysis: empty regions and stone groups.
//!
//! [`analyze`] partitions the board into maximal 4-connected regions in
//! two sweeps. The first collects empty regions and notes which stone
//! colour borders each; the second collects stone groups together with
//! their liberties, opposing boundary stones, and eye candidates. The
//! result is rebuilt from scratch for every position it describes.

use crate::board::{Board, is_friend, is_vacant};
use crate::constants::{CELLS, DIRS};
use crate::transform::{Point, navigate};

/// Classification of a region relative to the analyzed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Empty,
    Friend,
    Enemy,
}

/// Stone colour bordering an empty region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// The region touches no stones at all.
    None,
    Friend,
    Enemy,
    /// The region touches both colours.
    Mixed,
}

/// A maximal 4-connected region of same-classified cells.
#[derive(Debug, Clone)]
pub struct Region {
    pub kind: RegionKind,
    /// Member cells in discovery order.
    pub cells: Vec<Point>,
    /// Bordering stone colour; meaningful for empty regions.
    pub border: Border,
    /// Distinct liberties; meaningful for stone groups.
    pub dame: Vec<Point>,
    /// Liberties lying in an empty region bordered only by this group's
    /// own colour.
    pub eyes: Vec<Point>,
    /// Adjacent cells of the other classification: stones for an empty
    /// region, opposing stones for a group.
    pub edge: Vec<Point>,
    /// Whether some group counts this empty region toward its eyes.
    pub is_eye: bool,
}

/// Region decomposition of one position: a cell-to-region index map plus
/// the region list it points into.
pub struct BoardStat {
    pub map: [usize; CELLS],
    pub regions: Vec<Region>,
}

/// Decompose the board into regions as seen by `player`.
pub fn analyze(board: &Board, player: f32) -> BoardStat {
    let mut map = [0usize; CELLS];
    let mut regions: Vec<Region> = Vec::new();
    let mut done = [false; CELLS];

    // Sweep 1: empty regions and the stone colour they border.
    for start in 0..CELLS {
        if done[start] || !is_vacant(board.cells[start]) {
            continue;
        }
        let ix = regions.len();
        let mut cells = vec![start];
        let mut edge = Vec::new();
        let mut on_edge = [false; CELLS];
        let mut border = Border::None;
        done[start] = true;
        let mut i = 0;
        while i < cells.len() {
            let c = cells[i];
            map[c] = ix;
            for dir in DIRS {
                let Some(q) = navigate(c, dir) else { continue };
                let v = board.cells[q];
                if is_vacant(v) {
                    if !done[q] {
                        done[q] = true;
                        cells.push(q);
                    }
                } else {
                    border = match (border, is_friend(v, player)) {
                        (Border::None, true) => Border::Friend,
                        (Border::None, false) => Border::Enemy,
                        (Border::Friend, false) | (Border::Enemy, true) => Border::Mixed,
                        (b, _) => b,
                    };
                    if !on_edge[q] {
                        on_edge[q] = true;
                        edge.push(q);
                    }
                }
            }
            i += 1;
        }
        regions.push(Region {
            kind: RegionKind::Empty,
            cells,
            border,
            dame: Vec::new(),
            eyes: Vec::new(),
            edge,
            is_eye: false,
        });
    }

    // Sweep 2: stone groups, their liberties and eye candidates.
    for start in 0..CELLS {
        if done[start] {
            continue;
        }
        let friendly = is_friend(board.cells[start], player);
        let ix = regions.len();
        let mut cells = vec![start];
        let mut dame = Vec::new();
        let mut eyes = Vec::new();
        let mut edge = Vec::new();
        let mut on_dame = [false; CELLS];
        let mut on_eye = [false; CELLS];
        let mut on_edge = [false; CELLS];
        done[start] = true;
        let mut i = 0;
        while i < cells.len() {
            let c = cells[i];
            map[c] = ix;
            for dir in DIRS {
                let Some(q) = navigate(c, dir) else { continue };
                let v = board.cells[q];
                if is_vacant(v) {
                    if !on_dame[q] {
                        on_dame[q] = true;
                        dame.push(q);
                    }
                    let empty_ix = map[q];
                    let empty = &mut regions[empty_ix];
                    if empty.kind != RegionKind::Empty {
                        continue;
                    }
                    let owned = if friendly {
                        empty.border == Border::Friend
                    } else {
                        empty.border == Border::Enemy
                    };
                    if owned {
                        if !on_eye[q] {
                            on_eye[q] = true;
                            eyes.push(q);
                        }
                        empty.is_eye = true;
                    }
                } else if is_friend(v, player) == friendly {
                    if !done[q] {
                        done[q] = true;
                        cells.push(q);
                    }
                } else if !on_edge[q] {
                    on_edge[q] = true;
                    edge.push(q);
                }
            }
            i += 1;
        }
        regions.push(Region {
            kind: if friendly { RegionKind::Friend } else { RegionKind::Enemy },
            cells,
            border: Border::None,
            dame,
            eyes,
            edge,
            is_eye: false,
        });
    }

    BoardStat { map, regions }
}
