//! Linear board coordinates and the eight symmetries of the square grid.
//!
//! Cells are numbered row-major from the top-left corner. The symmetry
//! functions are indexed 0..=9: identity, the two axis flips and their
//! composition, both quarter turns, and the four flip/turn composites
//! used to fill the oracle batch.

use crate::constants::{BATCH, CELLS, SIZE};

/// Linear cell index on the board.
pub type Point = usize;

/// Step from `pos` in the direction `dir` (an offset out of
/// [`crate::constants::DIRS`]). Returns `None` when the step leaves the
/// board or wraps across a row edge.
#[inline]
pub fn navigate(pos: Point, dir: isize) -> Option<Point> {
    let next = pos as isize + dir;
    if next < 0 || next >= CELLS as isize {
        return None;
    }
    let next = next as usize;
    // Horizontal steps must stay on the row.
    if dir.abs() == 1 && next / SIZE != pos / SIZE {
        return None;
    }
    Some(next)
}

#[inline]
fn flip_x(pos: Point) -> Point {
    let col = pos % SIZE;
    pos - col + (SIZE - 1 - col)
}

#[inline]
fn flip_y(pos: Point) -> Point {
    let row = pos / SIZE;
    (SIZE - 1 - row) * SIZE + pos % SIZE
}

#[inline]
fn rotate_right(pos: Point) -> Point {
    let row = pos / SIZE;
    let col = pos % SIZE;
    col * SIZE + (SIZE - 1 - row)
}

#[inline]
fn rotate_left(pos: Point) -> Point {
    let row = pos / SIZE;
    let col = pos % SIZE;
    (SIZE - 1 - col) * SIZE + row
}

/// Apply symmetry `n` to a cell. Indices outside 1..=9 act as identity.
pub fn transform(pos: Point, n: usize) -> Point {
    match n {
        1 => flip_x(pos),
        2 => flip_y(pos),
        3 => flip_y(flip_x(pos)),
        4 => rotate_right(pos),
        5 => rotate_left(pos),
        6 => flip_x(rotate_right(pos)),
        7 => flip_x(rotate_left(pos)),
        8 => rotate_left(flip_x(pos)),
        9 => rotate_right(flip_x(pos)),
        _ => pos,
    }
}

/// Symmetry that undoes the one a batch slot was built with. Slots 8..16
/// repeat the first eight transforms with colours negated, so the table
/// repeats too.
pub const INVERSE_TRANSFORM: [usize; BATCH] = [0, 1, 2, 3, 5, 4, 8, 9, 0, 1, 2, 3, 5, 4, 8, 9];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_stays_on_row() {
        // Right edge of the first row.
        assert_eq!(navigate(SIZE - 1, 1), None);
        // Left edge of the second row.
        assert_eq!(navigate(SIZE, -1), None);
        assert_eq!(navigate(SIZE, 1), Some(SIZE + 1));
        assert_eq!(navigate(0, -1), None);
        assert_eq!(navigate(0, -(SIZE as isize)), None);
        assert_eq!(navigate(CELLS - 1, SIZE as isize), None);
        assert_eq!(navigate(0, SIZE as isize), Some(SIZE));
    }

    #[test]
    fn transforms_are_bijective() {
        for n in 0..=9 {
            let mut seen = [false; CELLS];
            for pos in 0..CELLS {
                let t = transform(pos, n);
                assert!(!seen[t], "transform {n} collides at {t}");
                seen[t] = true;
            }
        }
    }

    #[test]
    fn inverse_table_undoes_batch_slots() {
        for slot in 0..BATCH {
            let n = slot % (BATCH / 2);
            for pos in 0..CELLS {
                assert_eq!(
                    transform(transform(pos, n), INVERSE_TRANSFORM[slot]),
                    pos,
                    "slot {slot} does not invert at {pos}"
                );
            }
        }
    }

    #[test]
    fn corner_images() {
        // Top-left corner under each symmetry.
        assert_eq!(transform(0, 0), 0);
        assert_eq!(transform(0, 1), SIZE - 1);
        assert_eq!(transform(0, 2), (SIZE - 1) * SIZE);
        assert_eq!(transform(0, 3), CELLS - 1);
        assert_eq!(transform(0, 4), SIZE - 1);
        assert_eq!(transform(0, 5), (SIZE - 1) * SIZE);
    }
}
