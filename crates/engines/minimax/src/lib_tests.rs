use super::*;
use caissa_core::{legal_moves, Board, Engine};

#[test]
fn engine_returns_a_legal_move() {
    let mut engine = MinimaxEngine::with_seed(42);
    let pos = Board::new();

    let result = engine.search(&pos, 2);

    let best = result.best_move.expect("start position has moves");
    assert!(legal_moves(&pos).contains(&best));
    assert!(result.nodes > 0);
    assert_eq!(result.depth, 2);
}

#[test]
fn engine_handles_checkmate() {
    let mut engine = MinimaxEngine::with_seed(42);
    let pos =
        Board::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");

    let result = engine.search(&pos, 2);

    assert!(result.best_move.is_none());
}

#[test]
fn engine_handles_stalemate() {
    let mut engine = MinimaxEngine::with_seed(42);
    let pos = Board::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");

    let result = engine.search(&pos, 2);

    assert!(result.best_move.is_none());
}

#[test]
fn seeded_engines_agree_move_for_move() {
    let pos = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");

    let mut a = MinimaxEngine::with_seed(9);
    let mut b = MinimaxEngine::with_seed(9);
    let ra = a.search(&pos, 3);
    let rb = b.search(&pos, 3);

    assert_eq!(ra.best_move, rb.best_move);
    assert_eq!(ra.score, rb.score);
    assert_eq!(ra.nodes, rb.nodes);
}

#[test]
fn engine_reports_a_name() {
    let engine = MinimaxEngine::with_seed(1);
    assert!(engine.name().contains("Minimax"));
}
