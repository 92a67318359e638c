//! Text codecs for positions and moves, and oracle input construction.
//!
//! Positions travel as 19 run-length rows joined by `/`. Digits encode
//! empty runs and a run flushes at nine, so a fully empty row is `991`.
//! `b` is a stone of the side to move, `w` an opponent stone, the one
//! uppercase letter marks the latest move, and `X` marks a ko cell in
//! place of whatever the cell held. Moves print as a column letter
//! `a`..`s` plus the row counted from the top edge, or the literal
//! `Pass`.

use std::fmt;

use crate::board::{Board, is_friend, is_vacant};
use crate::constants::{BATCH, BATCH_CELLS, CELLS, SIZE};
use crate::transform::{Point, transform};

/// Column letters of the move notation. Unlike GTP, `i` is not skipped.
const COLUMNS: &[u8; SIZE] = b"abcdefghijklmnopqrs";

/// Why a position string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character outside the digit / stone / ko alphabet.
    BadCharacter(char),
    /// Row `0`-based index ran past 19 columns.
    RowOverflow(usize),
    /// Row ended short of 19 columns.
    RowUnderflow(usize),
    /// The string does not hold exactly 19 rows.
    BadRowCount(usize),
    /// More than one ko marker.
    DuplicateKo,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadCharacter(c) => write!(f, "unexpected character {c:?}"),
            ParseError::RowOverflow(row) => write!(f, "row {} overflows the board", row + 1),
            ParseError::RowUnderflow(row) => write!(f, "row {} is too short", row + 1),
            ParseError::BadRowCount(n) => write!(f, "expected {SIZE} rows, found {n}"),
            ParseError::DuplicateKo => write!(f, "more than one ko marker"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A decoded position: the board plus its move-specific annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub board: Board,
    /// Cell the side to move may not play this turn.
    pub ko: Option<Point>,
    /// Cell of the opponent's latest stone.
    pub last: Option<Point>,
}

/// Render a board with optional ko and last-move annotations.
pub fn encode(board: &Board, ko: Option<Point>, last: Option<Point>) -> String {
    let mut out = String::new();
    for row in 0..SIZE {
        if row != 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..SIZE {
            let pos = row * SIZE + col;
            if ko == Some(pos) {
                if empty > 0 {
                    out.push_str(&empty.to_string());
                    empty = 0;
                }
                out.push('X');
                continue;
            }
            let v = board.cells[pos];
            if is_vacant(v) {
                if empty > 8 {
                    out.push_str(&empty.to_string());
                    empty = 0;
                }
                empty += 1;
            } else {
                if empty > 0 {
                    out.push_str(&empty.to_string());
                    empty = 0;
                }
                let ch = if is_friend(v, 1.0) {
                    if last == Some(pos) { 'B' } else { 'b' }
                } else if last == Some(pos) {
                    'W'
                } else {
                    'w'
                };
                out.push(ch);
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out
}

/// Parse the output of [`encode`] back into a position.
pub fn decode(fen: &str) -> Result<Position, ParseError> {
    let mut board = Board::new();
    let mut row = 0;
    let mut col = 0;
    let mut ko = None;
    let mut last = None;
    for c in fen.chars() {
        if c == '/' {
            if col != SIZE {
                return Err(ParseError::RowUnderflow(row));
            }
            row += 1;
            col = 0;
            if row >= SIZE {
                return Err(ParseError::BadRowCount(row + 1));
            }
            continue;
        }
        if let Some(d) = c.to_digit(10) {
            col += d as usize;
            if col > SIZE {
                return Err(ParseError::RowOverflow(row));
            }
            continue;
        }
        if col >= SIZE {
            return Err(ParseError::RowOverflow(row));
        }
        let pos = row * SIZE + col;
        match c {
            'b' => board.cells[pos] = 1.0,
            'B' => {
                board.cells[pos] = 1.0;
                last = Some(pos);
            }
            'w' => board.cells[pos] = -1.0,
            'W' => {
                board.cells[pos] = -1.0;
                last = Some(pos);
            }
            'X' => {
                if ko.is_some() {
                    return Err(ParseError::DuplicateKo);
                }
                ko = Some(pos);
            }
            _ => return Err(ParseError::BadCharacter(c)),
        }
        col += 1;
    }
    if col != SIZE {
        return Err(ParseError::RowUnderflow(row));
    }
    if row != SIZE - 1 {
        return Err(ParseError::BadRowCount(row + 1));
    }
    Ok(Position { board, ko, last })
}

/// Flatten a board into the 16-slot oracle input: the eight symmetries
/// of the position oriented for `player`, then the same eight with the
/// colours negated.
pub fn build_batch(board: &Board, player: f32) -> Vec<f32> {
    let mut batch = vec![0.0f32; BATCH_CELLS];
    for pos in 0..CELLS {
        let v = board.cells[pos] * player;
        for n in 0..BATCH / 2 {
            batch[n * CELLS + transform(pos, n)] = v;
            batch[(n + BATCH / 2) * CELLS + transform(pos, n)] = -v;
        }
    }
    batch
}

/// Render a move as column letter plus row from the top, or `Pass`.
pub fn format_move(mv: Option<Point>) -> String {
    let Some(pos) = mv else {
        return "Pass".to_string();
    };
    let col = pos % SIZE;
    let row = pos / SIZE;
    format!("{}{}", COLUMNS[col] as char, SIZE - row)
}

/// Parse the output of [`format_move`]. `Pass` (any case) and anything
/// that does not name a cell map to `None`.
pub fn parse_move(text: &str) -> Option<Point> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("pass") {
        return None;
    }
    let (&letter, digits) = text.as_bytes().split_first()?;
    let col = COLUMNS.iter().position(|&c| c == letter.to_ascii_lowercase())?;
    let n: usize = std::str::from_utf8(digits).ok()?.parse().ok()?;
    if n == 0 || n > SIZE {
        return None;
    }
    Some((SIZE - n) * SIZE + col)
}
