//! Perft: exhaustive legal-tree node counts, the move generator's ground
//! truth. Test-and-debug surface only; the search never calls this.

use crate::board::Board;
use crate::moves::movegen::generate_legal;
use crate::moves::tables::AttackTables;
use crate::moves::types::Move;
use tracing::{debug, instrument};

pub fn perft(board: &mut Board, tables: &AttackTables, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal(board, tables);
    // Leaf shortcut: the children are exactly the legal moves.
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        board.make_move(mv);
        nodes += perft(board, tables, depth - 1);
        board.unmake_move();
    }
    nodes
}

/// Per-root-move breakdown, handy for diffing against another engine when a
/// total disagrees.
#[instrument(skip(board, tables))]
pub fn perft_divide(board: &mut Board, tables: &AttackTables, depth: u32) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }
    for mv in generate_legal(board, tables) {
        board.make_move(mv);
        let nodes = perft(board, tables, depth - 1);
        board.unmake_move();
        debug!(mv = %mv, nodes, "divide");
        results.push((mv, nodes));
    }
    results
}
