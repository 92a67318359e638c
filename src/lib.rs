//! Gobot: an oracle-guided Go move-search engine.
//!
//! The crate analyzes 19x19 positions and picks moves by combining a
//! learned move-probability oracle with tactical heuristics and a
//! Monte Carlo candidate search. Positions enter and leave as run-length
//! text, so the engine slots behind any transport.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`transform`] - Linear coordinates and the eight board symmetries
//! - [`board`] - Board state, captures, ko, and rollback
//! - [`analysis`] - Connected-region and liberty analysis
//! - [`hints`] - Capture and escape hints around groups in atari
//! - [`candidates`] - Oracle output decoding and adaptive filtering
//! - [`mcts`] - UCT search over the candidate set
//! - [`playout`] - Rollout simulation and area scoring
//! - [`fen`] - Position and move text codecs
//! - [`oracle`] - The pluggable move-probability oracle
//! - [`engine`] - The `find_move` / `advisor` entry points
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use gobot::engine::Engine;
//! use gobot::fen::format_move;
//! use gobot::oracle::UniformOracle;
//!
//! // An engine with no model loaded still plays, driven by hints and
//! // uniform priors.
//! let engine = Engine::new(UniformOracle::default());
//!
//! let empty = vec!["991"; 19].join("/");
//! let result = engine
//!     .find_move(&empty, Some(Duration::from_millis(50)), &mut |_| {})
//!     .unwrap();
//! println!("best move: {}", format_move(result.mv));
//! # assert!(result.mv.is_some());
//! ```

pub mod analysis;
pub mod board;
pub mod candidates;
pub mod constants;
pub mod engine;
pub mod fen;
pub mod hints;
pub mod mcts;
pub mod oracle;
pub mod playout;
pub mod transform;
