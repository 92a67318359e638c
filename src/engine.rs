//! The engine facade: full move search and the lighter advisor query.
//!
//! Both entry points take a position in wire notation, run the oracle
//! over its 16 symmetry variants, and fold the answers into candidate
//! moves. [`Engine::find_move`] then spends a wall-clock budget on UCT
//! rollouts and commits the winner to the board; [`Engine::advisor`]
//! stops after filtering and just reports the ranking.

use std::fmt;
use std::time::{Duration, Instant};

use crate::analysis::analyze;
use crate::board::{Board, apply_move, forbidden_cells, undo_moves};
use crate::candidates::{Candidate, extract_moves, filter_moves};
use crate::constants::{
    DEFAULT_TIMEOUT_MS, FILTER_COEFF, FILTER_MAX, FILTER_MIN, MCTS_COUNT, ROLLOUT_DEPTH, UCT_COEFF,
};
use crate::fen::{ParseError, decode, encode, format_move};
use crate::hints::tactical_hints;
use crate::mcts::{create_nodes, dump_nodes, search};
use crate::oracle::{Oracle, OracleError, predict_position};
use crate::transform::Point;

/// Failure of an engine query.
#[derive(Debug)]
pub enum EngineError {
    /// The position string failed to parse.
    MalformedPosition(ParseError),
    /// The oracle rejected or botched a prediction.
    Oracle(OracleError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MalformedPosition(e) => write!(f, "malformed position: {e}"),
            EngineError::Oracle(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::MalformedPosition(e) => Some(e),
            EngineError::Oracle(e) => Some(e),
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(e: ParseError) -> Self {
        EngineError::MalformedPosition(e)
    }
}

impl From<OracleError> for EngineError {
    fn from(e: OracleError) -> Self {
        EngineError::Oracle(e)
    }
}

/// Tunable search parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rollout cap per search.
    pub mcts_count: usize,
    /// Rollout length in plies.
    pub rollout_depth: usize,
    /// Exploration coefficient of the UCT formula.
    pub uct_coeff: f32,
    /// Wall-clock budget when the caller passes none.
    pub timeout: Duration,
    /// Candidates kept unconditionally.
    pub filter_min: usize,
    /// Hard cap on kept candidates.
    pub filter_max: usize,
    /// Dropoff ratio that stops candidate growth past the floor.
    pub filter_coeff: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mcts_count: MCTS_COUNT,
            rollout_depth: ROLLOUT_DEPTH,
            uct_coeff: UCT_COEFF,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            filter_min: FILTER_MIN,
            filter_max: FILTER_MAX,
            filter_coeff: FILTER_COEFF,
        }
    }
}

/// Result of a full move search.
#[derive(Debug, Clone)]
pub struct FindMove {
    /// The chosen cell, or `None` for a pass.
    pub mv: Option<Point>,
    /// The position after the move, in wire notation.
    pub fen: String,
    /// Scaled prior of the chosen candidate.
    pub confidence: f32,
    /// Wall-clock time the search took.
    pub elapsed: Duration,
}

/// One advisor suggestion.
#[derive(Debug, Clone)]
pub struct Advice {
    /// Session id echoed back to the caller.
    pub sid: u64,
    /// The move in coordinate notation.
    pub mv: String,
    /// Scaled candidate weight.
    pub weight: f32,
}

/// A move-search engine: an oracle plus its search parameters.
pub struct Engine<O> {
    oracle: O,
    config: EngineConfig,
}

impl<O: Oracle> Engine<O> {
    pub fn new(oracle: O) -> Self {
        Engine::with_config(oracle, EngineConfig::default())
    }

    pub fn with_config(oracle: O, config: EngineConfig) -> Self {
        Engine { oracle, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search `fen` for the best move within `timeout` and play it.
    ///
    /// The clock starts before the oracle round trip, so the rollout
    /// loop only gets what is left of the budget. With no playable
    /// candidate the result is a pass and the position comes back
    /// unchanged, with any ko annotation dropped.
    pub fn find_move(
        &self,
        fen: &str,
        timeout: Option<Duration>,
        sink: &mut dyn FnMut(&str),
    ) -> Result<FindMove, EngineError> {
        let start = Instant::now();
        let deadline = start + timeout.unwrap_or(self.config.timeout);
        let position = decode(fen)?;
        let mut board = position.board;

        let data = predict_position(&self.oracle, &board, 1.0)?;
        let forbidden = forbidden_cells(&board, position.ko);
        let mut moves = extract_moves(&data, &forbidden);
        let stat = analyze(&board, 1.0);
        // A snapback's recapture shows up as a capture hint, but the ko
        // cell is not playable this turn.
        let hints = tactical_hints(&board, &stat, 1.0);
        moves.extend(hints.into_iter().filter(|h| !forbidden[h.pos]));
        let moves = filter_moves(
            moves,
            self.config.filter_min,
            self.config.filter_max,
            self.config.filter_coeff,
            sink,
        );
        let moves = vet_legal(&mut board, moves);

        let mut nodes = create_nodes(&moves);
        let mut rng = fastrand::Rng::new();
        let picked = search(
            &mut board,
            &mut nodes,
            &self.oracle,
            self.config.mcts_count,
            self.config.rollout_depth,
            self.config.uct_coeff,
            deadline,
            &mut rng,
        )?;
        dump_nodes(&nodes);

        let Some(ix) = picked else {
            log::info!("no playable candidate, passing");
            return Ok(pass_result(&board, start));
        };
        let mv = nodes[ix].pos;
        let mut undo = Vec::new();
        let outcome = match apply_move(&mut board, mv, 1.0, &mut undo) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("dropping unplayable pick {}: {err}", format_move(Some(mv)));
                return Ok(pass_result(&board, start));
            }
        };
        let result = FindMove {
            mv: Some(mv),
            fen: encode(&board, outcome.ko, Some(mv)),
            confidence: nodes[ix].weight * 1000.0,
            elapsed: start.elapsed(),
        };
        log::info!(
            "picked {} after {} ms, captured {}",
            format_move(result.mv),
            result.elapsed.as_millis(),
            outcome.captured
        );
        Ok(result)
    }

    /// Rank candidate moves for `fen` without spending any rollouts.
    ///
    /// `coeff` replaces the configured dropoff ratio, letting a caller
    /// ask for a broader or sharper spread. `sid` is echoed back in
    /// every suggestion.
    pub fn advisor(
        &self,
        sid: u64,
        fen: &str,
        coeff: f32,
        sink: &mut dyn FnMut(&str),
    ) -> Result<Vec<Advice>, EngineError> {
        let start = Instant::now();
        let position = decode(fen)?;
        let board = position.board;
        let data = predict_position(&self.oracle, &board, 1.0)?;
        let forbidden = forbidden_cells(&board, position.ko);
        let moves = extract_moves(&data, &forbidden);
        let moves = filter_moves(
            moves,
            self.config.filter_min,
            self.config.filter_max,
            coeff,
            sink,
        );
        let advice = moves
            .iter()
            .map(|m| Advice {
                sid,
                mv: format_move(Some(m.pos)),
                weight: m.weight * 1000.0,
            })
            .collect();
        log::debug!("advisor answered sid {sid} in {} ms", start.elapsed().as_millis());
        Ok(advice)
    }
}

/// Drop candidates that cannot actually be played, probing each with an
/// apply-and-unwind.
fn vet_legal(board: &mut Board, moves: Vec<Candidate>) -> Vec<Candidate> {
    let mut undo = Vec::new();
    moves
        .into_iter()
        .filter(|m| {
            let playable = apply_move(board, m.pos, 1.0, &mut undo).is_ok();
            undo_moves(board, &mut undo, 0);
            playable
        })
        .collect()
}

fn pass_result(board: &Board, start: Instant) -> FindMove {
    FindMove {
        mv: None,
        fen: encode(board, None, None),
        confidence: 0.0,
        elapsed: start.elapsed(),
    }
}
