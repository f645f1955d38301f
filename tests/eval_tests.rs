//! Evaluation symmetry and sanity. The core property: mirroring the board
//! vertically and swapping colors must exactly negate nothing — it must
//! preserve the score, because the score is side-relative.

use sable::board::Board;
use sable::search::eval::evaluate;

/// Mirror a FEN vertically and swap the colors, producing the same game
/// seen from the other side.
fn flip_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();

    let placement: Vec<String> = fields[0]
        .split('/')
        .rev()
        .map(|rank| {
            rank.chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        c.to_ascii_lowercase()
                    } else if c.is_ascii_lowercase() {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect();

    let side = if fields[1] == "w" { "b" } else { "w" };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let mut out = String::new();
        for (ours, theirs) in [('K', 'k'), ('Q', 'q'), ('k', 'K'), ('q', 'Q')] {
            if fields[2].contains(theirs) {
                out.push(ours);
            }
        }
        out
    };

    let en_passant = if fields[3] == "-" {
        "-".to_string()
    } else {
        let file = &fields[3][..1];
        let rank: u32 = fields[3][1..].parse().unwrap();
        format!("{}{}", file, 9 - rank)
    };

    format!(
        "{} {} {} {} {} {}",
        placement.join("/"),
        side,
        castling,
        en_passant,
        fields[4],
        fields[5]
    )
}

const FENS: &[&str] = &[
    sable::board::START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbq1rk1/pppppppp/8/8/4K3/8/PPPPPPPP/RNBQ1R2 b - - 4 9",
];

#[test]
fn color_flip_preserves_side_relative_score() {
    for fen in FENS {
        let board: Board = fen.parse().unwrap();
        let flipped: Board = flip_fen(fen).parse().unwrap();
        assert_eq!(
            evaluate(&board),
            evaluate(&flipped),
            "asymmetry between {} and {}",
            fen,
            flip_fen(fen)
        );
    }
}

#[test]
fn evaluation_is_pure() {
    let board: Board = FENS[1].parse().unwrap();
    let first = evaluate(&board);
    for _ in 0..3 {
        assert_eq!(evaluate(&board), first);
    }
}

#[test]
fn material_advantage_dominates() {
    // White up a queen scores hugely positive for white.
    let board: Board = "4k3/8/8/8/8/8/8/Q3K3 w - - 0 1".parse().unwrap();
    assert!(evaluate(&board) > 800);
    let board: Board = "4k3/8/8/8/8/8/8/Q3K3 b - - 0 1".parse().unwrap();
    assert!(evaluate(&board) < -800);
}
