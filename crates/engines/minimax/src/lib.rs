//! Minimax chess engine
//!
//! Alpha-beta pruned minimax over a randomized material evaluation. The
//! random nudge keeps play varied between equal moves; seed it through
//! `with_seed` for reproducible games and tests.

mod eval;
mod search;

use caissa_core::{Board, Engine, SearchResult};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use eval::{evaluate, material_balance, piece_value, EVAL_JITTER};
pub use search::best_move;

#[cfg(test)]
mod lib_tests;

/// Chess engine running minimax with alpha-beta pruning over a material
/// evaluation with a seedable random tie-breaking perturbation.
#[derive(Clone, Debug)]
pub struct MinimaxEngine {
    rng: StdRng,
    nodes: u64,
}

impl MinimaxEngine {
    /// Engine with an entropy-seeded RNG; play varies from game to game.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Engine with a fixed seed, for reproducible move choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Board, depth: u8) -> SearchResult {
        self.nodes = 0;
        let (score, best) = search::best_move(pos, depth, &mut self.rng, &mut self.nodes);
        debug!(
            "depth {} searched {} nodes: best {} score {:.2}",
            depth,
            self.nodes,
            best.map_or_else(|| "-".to_string(), |m| m.to_string()),
            score
        );

        SearchResult {
            best_move: best,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
