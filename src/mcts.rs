//! Monte Carlo candidate search with UCT selection.
//!
//! The tree is one level deep: every filtered candidate becomes a node
//! holding its normalized prior and its rollout statistics. Each
//! iteration picks the most urgent node by UCT score, plays one rollout
//! through it, scores the end position, and unwinds. The final answer is
//! the most-visited node, with ties going to the earlier one.

use std::time::Instant;

use crate::board::{Board, Undo, undo_moves};
use crate::candidates::Candidate;
use crate::fen::format_move;
use crate::oracle::{Oracle, OracleError};
use crate::playout::{estimate, simulate};
use crate::transform::Point;

/// One root candidate and its accumulated statistics.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// The move this node stands for.
    pub pos: Point,
    /// Prior from the candidate pipeline, normalized over all nodes.
    pub weight: f32,
    /// Rollouts played through this node.
    pub cnt: u32,
    /// Rollouts that ended ahead for the side to move.
    pub win: u32,
}

/// Wrap filtered candidates in search nodes, normalizing their weight
/// magnitudes into priors that sum to one. The candidate order is kept.
pub fn create_nodes(moves: &[Candidate]) -> Vec<SearchNode> {
    let total: f32 = moves.iter().map(|m| m.weight.abs()).sum();
    let fallback = if moves.is_empty() { 0.0 } else { 1.0 / moves.len() as f32 };
    moves
        .iter()
        .map(|m| SearchNode {
            pos: m.pos,
            weight: if total > 0.0 { m.weight.abs() / total } else { fallback },
            cnt: 0,
            win: 0,
        })
        .collect()
}

#[inline]
fn uct_score(node: &SearchNode, total: u32, coeff: f32) -> f32 {
    coeff * node.win as f32 / (1.0 + node.cnt as f32) * (total as f32).sqrt() + node.weight
}

/// Index of the most urgent node under UCT; the earliest one on ties.
fn most_urgent(nodes: &[SearchNode], total: u32, coeff: f32) -> usize {
    let mut best = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, node) in nodes.iter().enumerate() {
        let score = uct_score(node, total, coeff);
        if score > best_score {
            best_score = score;
            best = i;
        }
    }
    best
}

/// Index of the most-visited node; the earliest one on ties.
fn most_visited(nodes: &[SearchNode]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, node) in nodes.iter().enumerate() {
        let better = match best {
            Some(b) => node.cnt > nodes[b].cnt,
            None => true,
        };
        if better {
            best = Some(i);
        }
    }
    best
}

/// Run rollouts over the candidate nodes until `sims` are spent or the
/// deadline passes, then return the index of the most-visited node.
///
/// The deadline is checked before each iteration, so an already-expired
/// budget runs no rollouts and the pick falls back to the ordering of
/// `nodes`. The board always comes back in its starting state, even
/// when the oracle fails mid-rollout.
pub fn search<O: Oracle + ?Sized>(
    board: &mut Board,
    nodes: &mut [SearchNode],
    oracle: &O,
    sims: usize,
    rollout_depth: usize,
    uct_coeff: f32,
    deadline: Instant,
    rng: &mut fastrand::Rng,
) -> Result<Option<usize>, OracleError> {
    if nodes.is_empty() {
        return Ok(None);
    }
    let mut undo: Vec<Undo> = Vec::new();
    let mut total = 0u32;
    for _ in 0..sims {
        if Instant::now() >= deadline {
            break;
        }
        let ix = most_urgent(nodes, total, uct_coeff);
        let result = simulate(board, nodes[ix].pos, oracle, rollout_depth, &mut undo, rng);
        let won = result.is_ok() && estimate(board, 1.0) > 0.0;
        undo_moves(board, &mut undo, 0);
        result?;
        if won {
            nodes[ix].win += 1;
        }
        nodes[ix].cnt += 1;
        total += 1;
    }
    log::debug!("search spent {total} rollouts over {} candidates", nodes.len());
    Ok(most_visited(nodes))
}

/// Log the per-node statistics of a finished search.
pub fn dump_nodes(nodes: &[SearchNode]) {
    for node in nodes {
        log::debug!(
            "move {} weight={:.4} cnt={} win={}",
            format_move(Some(node.pos)),
            node.weight,
            node.cnt,
            node.win
        );
    }
}
