//! The oracle seam: a pluggable source of per-cell move weights.
//!
//! The engine never sees a model directly. It hands an implementation of
//! [`Oracle`] a flattened 16-slot batch and gets one weight per cell per
//! slot back. Production wires this to an actual network; tests and the
//! demo binary use [`UniformOracle`].

use std::fmt;

use crate::board::Board;
use crate::constants::BATCH_CELLS;
use crate::fen::build_batch;

/// Failure reported by an oracle implementation.
#[derive(Debug, Clone)]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        OracleError { message: message.into() }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oracle failure: {}", self.message)
    }
}

impl std::error::Error for OracleError {}

/// A move-probability oracle.
pub trait Oracle {
    /// Evaluate one 16-slot batch built by [`build_batch`]. The result
    /// must hold one weight per cell per slot.
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, OracleError>;
}

/// Run the oracle over a position and check the output shape before
/// anyone indexes into it.
pub fn predict_position<O: Oracle + ?Sized>(
    oracle: &O,
    board: &Board,
    player: f32,
) -> Result<Vec<f32>, OracleError> {
    let input = build_batch(board, player);
    let output = oracle.predict(&input)?;
    if output.len() != BATCH_CELLS {
        return Err(OracleError::new(format!(
            "oracle returned {} weights, expected {BATCH_CELLS}",
            output.len()
        )));
    }
    Ok(output)
}

/// Oracle that assigns the same weight to every cell of every slot.
///
/// With no opinion from the model the colour-negated half cancels the
/// plain half exactly, so candidate weights collapse to zero and the
/// search runs on hints and uniform priors alone. That makes this a
/// useful stand-in when no model is loaded.
pub struct UniformOracle {
    pub weight: f32,
}

impl UniformOracle {
    pub fn new(weight: f32) -> Self {
        UniformOracle { weight }
    }
}

impl Default for UniformOracle {
    fn default() -> Self {
        UniformOracle::new(0.05)
    }
}

impl Oracle for UniformOracle {
    fn predict(&self, _input: &[f32]) -> Result<Vec<f32>, OracleError> {
        Ok(vec![self.weight; BATCH_CELLS])
    }
}
