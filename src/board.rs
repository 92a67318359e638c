//! Board state, stone classification, and reversible move execution.
//!
//! The board is a flat array of signed cell intensities. Sign is read
//! relative to a `player` argument of `1.0` or `-1.0`: cells whose value
//! times `player` exceeds the empty threshold belong to that player,
//! values below the negated threshold to the opponent, and anything in
//! between is vacant. Passing `player = -1.0` re-reads the same array
//! from the opponent's side without touching it, which keeps recorded
//! undo entries valid across alternating plies.

use std::fmt;

use crate::analysis::{RegionKind, analyze};
use crate::constants::{CELLS, DIRS, EMPTY_THRESHOLD, SIZE};
use crate::transform::{Point, navigate};

/// A 19x19 board of signed cell intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub cells: [f32; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Board { cells: [0.0; CELLS] }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let v = self.cells[row * SIZE + col];
                let ch = if is_friend(v, 1.0) {
                    'b'
                } else if is_enemy(v, 1.0) {
                    'w'
                } else {
                    '.'
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[inline]
pub fn is_friend(value: f32, player: f32) -> bool {
    value * player > EMPTY_THRESHOLD
}

#[inline]
pub fn is_enemy(value: f32, player: f32) -> bool {
    value * player < -EMPTY_THRESHOLD
}

#[inline]
pub fn is_vacant(value: f32) -> bool {
    value.abs() <= EMPTY_THRESHOLD
}

/// Errors that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The target cell already holds a stone.
    Occupied,
    /// The move would leave its own group without liberties.
    Suicide,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Occupied => write!(f, "cell is occupied"),
            MoveError::Suicide => write!(f, "move is suicide"),
        }
    }
}

impl std::error::Error for MoveError {}

/// One recorded cell mutation, popped in LIFO order to roll back.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    pub pos: Point,
    pub prev: f32,
}

/// What a successful move did to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Stones removed from captured enemy groups.
    pub captured: u32,
    /// Cell the opponent may not retake immediately, when the move was a
    /// single-stone snapback.
    pub ko: Option<Point>,
}

/// Play a stone for `player` at `mv`, recording every cell change on
/// `undo`.
///
/// Enemy groups whose last liberty is `mv` are removed first; only then
/// is the move checked for suicide, so taking a group by filling one's
/// own final liberty stays legal. A failed move leaves both the board
/// and `undo` exactly as they were.
pub fn apply_move(
    board: &mut Board,
    mv: Point,
    player: f32,
    undo: &mut Vec<Undo>,
) -> Result<MoveOutcome, MoveError> {
    if !is_vacant(board.cells[mv]) {
        return Err(MoveError::Occupied);
    }
    let mark = undo.len();
    let stat = analyze(board, player);

    let mut captured = 0u32;
    let mut captured_cell = None;
    let mut taken: Vec<usize> = Vec::new();
    for dir in DIRS {
        let Some(p) = navigate(mv, dir) else { continue };
        let ix = stat.map[p];
        let region = &stat.regions[ix];
        if region.kind != RegionKind::Enemy || region.dame.len() != 1 {
            continue;
        }
        if taken.contains(&ix) {
            continue;
        }
        taken.push(ix);
        for &q in &region.cells {
            undo.push(Undo { pos: q, prev: board.cells[q] });
            board.cells[q] = 0.0;
            captured += 1;
            captured_cell = Some(q);
        }
    }

    undo.push(Undo { pos: mv, prev: board.cells[mv] });
    board.cells[mv] = player;

    if captured == 0 && group_liberties(board, mv, player) == 0 {
        undo_moves(board, undo, mark);
        return Err(MoveError::Suicide);
    }

    let ko = match captured_cell {
        Some(q) if captured == 1 && group_liberties(board, mv, player) == 1 => Some(q),
        _ => None,
    };
    Ok(MoveOutcome { captured, ko })
}

/// Pop undo entries down to `mark`, restoring the recorded cell values.
pub fn undo_moves(board: &mut Board, undo: &mut Vec<Undo>, mark: usize) {
    while undo.len() > mark {
        let Some(u) = undo.pop() else { break };
        board.cells[u.pos] = u.prev;
    }
}

/// Count the distinct liberties of the group containing `start`, whose
/// stones belong to `side`.
pub fn group_liberties(board: &Board, start: Point, side: f32) -> u32 {
    let mut stack = vec![start];
    let mut visited = [false; CELLS];
    let mut counted = [false; CELLS];
    let mut libs = 0;
    visited[start] = true;
    while let Some(pt) = stack.pop() {
        for dir in DIRS {
            let Some(q) = navigate(pt, dir) else { continue };
            let v = board.cells[q];
            if is_vacant(v) {
                if !counted[q] {
                    counted[q] = true;
                    libs += 1;
                }
            } else if is_friend(v, side) && !visited[q] {
                visited[q] = true;
                stack.push(q);
            }
        }
    }
    libs
}

/// Mask of cells that may not be played: every occupied point plus the
/// ko point, if any.
pub fn forbidden_cells(board: &Board, ko: Option<Point>) -> [bool; CELLS] {
    let mut mask = [false; CELLS];
    for (p, &v) in board.cells.iter().enumerate() {
        if !is_vacant(v) {
            mask[p] = true;
        }
    }
    if let Some(k) = ko {
        mask[k] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Point {
        row * SIZE + col
    }

    fn place(board: &mut Board, stones: &[(usize, usize, f32)]) {
        for &(row, col, v) in stones {
            board.cells[at(row, col)] = v;
        }
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut board = Board::new();
        let mut undo = Vec::new();
        board.cells[at(3, 3)] = -1.0;
        let err = apply_move(&mut board, at(3, 3), 1.0, &mut undo);
        assert_eq!(err, Err(MoveError::Occupied));
        assert!(undo.is_empty());
    }

    #[test]
    fn capture_single_stone() {
        let mut board = Board::new();
        // White stone on the top edge, down to one liberty.
        place(&mut board, &[(0, 1, -1.0), (0, 0, 1.0), (1, 1, 1.0)]);
        let mut undo = Vec::new();
        let outcome = apply_move(&mut board, at(0, 2), 1.0, &mut undo).unwrap();
        assert_eq!(outcome.captured, 1);
        assert!(is_vacant(board.cells[at(0, 1)]));
        assert_eq!(outcome.ko, None);
    }

    #[test]
    fn capture_then_undo_restores_board() {
        let mut board = Board::new();
        place(
            &mut board,
            &[
                (5, 5, -1.0),
                (5, 6, -1.0),
                (4, 5, 1.0),
                (4, 6, 1.0),
                (6, 5, 1.0),
                (6, 6, 1.0),
                (5, 4, 1.0),
            ],
        );
        let before = board.clone();
        let mut undo = Vec::new();
        let outcome = apply_move(&mut board, at(5, 7), 1.0, &mut undo).unwrap();
        assert_eq!(outcome.captured, 2);
        assert!(board != before);
        undo_moves(&mut board, &mut undo, 0);
        assert!(board == before);
        assert!(undo.is_empty());
    }

    #[test]
    fn suicide_is_rejected_and_unwound() {
        let mut board = Board::new();
        // Corner point (0, 0) walled in by healthy white stones.
        place(&mut board, &[(0, 1, -1.0), (1, 0, -1.0), (1, 1, -1.0)]);
        let before = board.clone();
        let mut undo = Vec::new();
        let err = apply_move(&mut board, at(0, 0), 1.0, &mut undo);
        assert_eq!(err, Err(MoveError::Suicide));
        assert!(board == before);
        assert!(undo.is_empty());
    }

    #[test]
    fn capturing_from_inside_is_not_suicide() {
        let mut board = Board::new();
        // White corner stone in atari; black takes it by playing what
        // would otherwise be its own last liberty.
        place(
            &mut board,
            &[(0, 0, -1.0), (0, 2, -1.0), (1, 1, -1.0), (1, 0, 1.0)],
        );
        let mut undo = Vec::new();
        let outcome = apply_move(&mut board, at(0, 1), 1.0, &mut undo).unwrap();
        assert_eq!(outcome.captured, 1);
        assert!(is_vacant(board.cells[at(0, 0)]));
    }

    #[test]
    fn snapback_sets_ko() {
        let mut board = Board::new();
        // . b w .
        // b w . w
        // . b w .
        place(
            &mut board,
            &[
                (0, 1, 1.0),
                (0, 2, -1.0),
                (1, 0, 1.0),
                (1, 1, -1.0),
                (1, 3, -1.0),
                (2, 1, 1.0),
                (2, 2, -1.0),
            ],
        );
        let mut undo = Vec::new();
        let outcome = apply_move(&mut board, at(1, 2), 1.0, &mut undo).unwrap();
        assert_eq!(outcome.captured, 1);
        assert_eq!(outcome.ko, Some(at(1, 1)));
    }

    #[test]
    fn multi_stone_capture_is_not_ko() {
        let mut board = Board::new();
        place(
            &mut board,
            &[(0, 0, -1.0), (0, 1, -1.0), (1, 0, 1.0), (1, 1, 1.0)],
        );
        let mut undo = Vec::new();
        let outcome = apply_move(&mut board, at(0, 2), 1.0, &mut undo).unwrap();
        assert_eq!(outcome.captured, 2);
        assert_eq!(outcome.ko, None);
    }

    #[test]
    fn forbidden_covers_stones_and_ko() {
        let mut board = Board::new();
        place(&mut board, &[(9, 9, 1.0), (9, 10, -1.0)]);
        let mask = forbidden_cells(&board, Some(at(0, 0)));
        assert!(mask[at(9, 9)]);
        assert!(mask[at(9, 10)]);
        assert!(mask[at(0, 0)]);
        assert!(!mask[at(5, 5)]);
    }

    #[test]
    fn liberties_merge_across_the_group() {
        let mut board = Board::new();
        place(&mut board, &[(3, 3, 1.0), (3, 4, 1.0)]);
        assert_eq!(group_liberties(&board, at(3, 3), 1.0), 6);
    }
}
