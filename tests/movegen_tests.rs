//! Generator-level guarantees beyond the perft totals: no generated move
//! may leave the mover's own king attacked, and mate/stalemate are
//! distinguished by the check query.

use sable::board::{Board, Color};
use sable::moves::movegen::{generate_legal, in_check, is_square_attacked};
use sable::moves::tables::attack_tables;

const FENS: &[&str] = &[
    sable::board::START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3",
];

#[test]
fn no_move_leaves_own_king_attacked() {
    let tables = attack_tables();
    for fen in FENS {
        let mut board: Board = fen.parse().unwrap();
        let mover = board.side_to_move;
        for mv in generate_legal(&board, tables) {
            board.make_move(mv);
            let king = board.king_square(mover);
            assert!(
                !is_square_attacked(&board, tables, king, mover.opposite()),
                "{} leaves the king en prise in {}",
                mv,
                fen
            );
            board.unmake_move();
        }
    }
}

#[test]
fn stalemate_has_no_moves_and_no_check() {
    let board: Board = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
    let tables = attack_tables();
    assert!(generate_legal(&board, tables).is_empty());
    assert!(!in_check(&board, tables, Color::Black));
}

#[test]
fn back_rank_mate_has_no_moves_and_check() {
    let board: Board = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1".parse().unwrap();
    let tables = attack_tables();
    assert!(generate_legal(&board, tables).is_empty());
    assert!(in_check(&board, tables, Color::Black));
}

#[test]
fn move_list_never_exceeds_capacity_bound() {
    // The classic dense-queen position with 218 legal moves.
    let board: Board = "R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1"
        .parse()
        .unwrap();
    let moves = generate_legal(&board, attack_tables());
    assert_eq!(moves.len(), 218);
}

#[test]
fn generation_order_is_deterministic() {
    let tables = attack_tables();
    let board: Board = FENS[1].parse().unwrap();
    let a: Vec<String> = generate_legal(&board, tables).iter().map(|m| m.to_uci()).collect();
    let b: Vec<String> = generate_legal(&board, tables).iter().map(|m| m.to_uci()).collect();
    assert_eq!(a, b);
}
