use sable::board::{Board, START_FEN};
use sable::moves::perft::{perft, perft_divide};
use sable::moves::tables::attack_tables;

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const EP_PIN_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn run(fen: &str, depth: u32, expected: u64) {
    let mut board: Board = fen.parse().expect("valid FEN");
    let nodes = perft(&mut board, attack_tables(), depth);
    assert_eq!(
        nodes, expected,
        "perft({}) mismatch for {}: got {}, expected {}",
        depth, fen, nodes, expected
    );
}

#[test]
fn perft_startpos_d1() {
    run(START_FEN, 1, 20);
}

#[test]
fn perft_startpos_d2() {
    run(START_FEN, 2, 400);
}

#[test]
fn perft_startpos_d3() {
    run(START_FEN, 3, 8_902);
}

#[test]
fn perft_startpos_d4() {
    run(START_FEN, 4, 197_281);
}

#[test]
fn perft_startpos_d5() {
    run(START_FEN, 5, 4_865_609);
}

// Deep node counts are opt-in; run with `--ignored`.
#[test]
#[ignore]
fn perft_startpos_d6() {
    run(START_FEN, 6, 119_060_324);
}

#[test]
fn perft_kiwipete_d1() {
    run(KIWIPETE_FEN, 1, 48);
}

#[test]
fn perft_kiwipete_d2() {
    run(KIWIPETE_FEN, 2, 2_039);
}

#[test]
fn perft_kiwipete_d3() {
    run(KIWIPETE_FEN, 3, 97_862);
}

#[test]
fn perft_kiwipete_d4() {
    run(KIWIPETE_FEN, 4, 4_085_603);
}

#[test]
fn perft_en_passant_pin_d1() {
    run(EP_PIN_FEN, 1, 14);
}

#[test]
fn perft_en_passant_pin_d4() {
    run(EP_PIN_FEN, 4, 43_238);
}

#[test]
fn divide_totals_match_perft() {
    let mut board: Board = KIWIPETE_FEN.parse().unwrap();
    let tables = attack_tables();
    let divided: u64 = perft_divide(&mut board, tables, 3).iter().map(|(_, n)| n).sum();
    let mut board: Board = KIWIPETE_FEN.parse().unwrap();
    assert_eq!(divided, perft(&mut board, tables, 3));
}

#[test]
fn perft_leaves_board_unchanged() {
    let mut board: Board = KIWIPETE_FEN.parse().unwrap();
    let before = board.clone();
    perft(&mut board, attack_tables(), 3);
    assert_eq!(board, before);
}
