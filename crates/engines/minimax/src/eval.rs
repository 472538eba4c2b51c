//! Material evaluation with a small random perturbation.

use caissa_core::{Board, Color, PieceKind};
use rand::Rng;

/// Bound on the random perturbation added to the material score. Small
/// enough that it can never outweigh a pawn.
pub const EVAL_JITTER: f64 = 0.1;

/// Material weight of a piece in pawn units. The king carries no weight;
/// both sides always have exactly one.
pub fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Material balance in pawn units, positive when White is ahead.
pub fn material_balance(pos: &Board) -> f64 {
    let mut score = 0.0;
    for sq in 0..64u8 {
        if let Some(pc) = pos.piece_at(sq) {
            let v = piece_value(pc.kind);
            score += if pc.color == Color::White { v } else { -v };
        }
    }
    score
}

/// Static score of the position: material plus a bounded random nudge so
/// equal-scoring moves are not always resolved in generation order.
pub fn evaluate(pos: &Board, rng: &mut impl Rng) -> f64 {
    material_balance(pos) + rng.gen_range(-EVAL_JITTER..EVAL_JITTER)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
