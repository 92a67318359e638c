//! Board geometry and engine tuning parameters.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length.
pub const SIZE: usize = 19;

/// Total number of cells in the row-major board array.
pub const CELLS: usize = SIZE * SIZE;

/// Linear offsets of the four orthogonal neighbours.
/// Order: East, West, South, North.
pub const DIRS: [isize; 4] = [1, -1, SIZE as isize, -(SIZE as isize)];

/// Magnitudes at or below this count as an empty cell.
pub const EMPTY_THRESHOLD: f32 = 0.1;

// =============================================================================
// Oracle Batch Layout
// =============================================================================

/// Slots per oracle request: 8 symmetries, then the same 8 colour-negated.
pub const BATCH: usize = 16;

/// Length of a flattened oracle input or output.
pub const BATCH_CELLS: usize = BATCH * CELLS;

// =============================================================================
// Candidate Filter
// =============================================================================

/// Candidates kept unconditionally.
pub const FILTER_MIN: usize = 5;

/// Hard cap on kept candidates.
pub const FILTER_MAX: usize = 10;

/// A candidate survives past the floor while its weight times this
/// coefficient still reaches the previous one.
pub const FILTER_COEFF: f32 = 2.0;

// =============================================================================
// Search Parameters
// =============================================================================

/// Simulation cap per search.
pub const MCTS_COUNT: usize = 1000;

/// Exploration coefficient of the UCT formula.
pub const UCT_COEFF: f32 = 1.41;

/// Rollout length in plies after the candidate under investigation.
pub const ROLLOUT_DEPTH: usize = 12;

/// Wall-clock search budget when the caller gives none, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// Tactical Hints
// =============================================================================

/// Base weight of a capture hint, before the group-size bonus.
pub const CAPTURE_HINT_BASE: f32 = 0.4;

/// Base weight of an escape hint, before the group-size bonus.
pub const ESCAPE_HINT_BASE: f32 = 0.3;

/// Weight added per stone of the group a hint is about.
pub const HINT_SIZE_STEP: f32 = 0.1;

/// An escape needs at least this many liberties to be worth suggesting.
pub const ESCAPE_MIN_DAME: usize = 3;
