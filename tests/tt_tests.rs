use sable::board::{Color, Piece};
use sable::moves::types::Move;
use sable::search::tt::{EXACT, LOWERBOUND, TranspositionTable, TtData, UPPERBOUND};
use sable::square::Square;

fn entry(score: i16, depth: u8, flag: u8) -> TtData {
    TtData {
        score,
        depth,
        flag,
        mv: Move {
            from: Square::from_index(52),
            to: Square::from_index(44),
            piece: Piece::Pawn,
            color: Color::White,
            promotion: None,
            flags: 0,
        },
    }
}

#[test]
fn round_trip_every_flag() {
    let mut tt = TranspositionTable::new(4);
    for (i, flag) in [EXACT, LOWERBOUND, UPPERBOUND].into_iter().enumerate() {
        let key = 0x9E3779B97F4A7C15u64.wrapping_mul(i as u64 + 1);
        let data = entry(-150 * i as i16, 3 + i as u8, flag);
        tt.store(key, data);
        assert_eq!(tt.retrieve(key), Some(data));
    }
}

#[test]
fn never_stored_key_returns_none() {
    let tt = TranspositionTable::new(4);
    for key in [0u64, 1, 0xFFFF_FFFF_FFFF_FFFF, 0x1234_5678] {
        assert_eq!(tt.retrieve(key), None);
    }
}

#[test]
fn depth_preferred_replacement_scenario() {
    // Store depth 4, then a shallower depth 2: the deeper entry survives.
    // A later depth 6 store replaces it.
    let mut tt = TranspositionTable::new(4);
    let key = 0xABCD_EF01_2345_6789;

    tt.store(key, entry(40, 4, EXACT));
    tt.store(key, entry(99, 2, LOWERBOUND));
    let kept = tt.retrieve(key).unwrap();
    assert_eq!(kept.depth, 4);
    assert_eq!(kept.score, 40);

    tt.store(key, entry(-7, 6, UPPERBOUND));
    let replaced = tt.retrieve(key).unwrap();
    assert_eq!(replaced.depth, 6);
    assert_eq!(replaced.score, -7);
}

#[test]
fn equal_depth_overwrites() {
    let mut tt = TranspositionTable::new(4);
    let key = 0x1111_2222_3333_4444;
    tt.store(key, entry(10, 5, EXACT));
    tt.store(key, entry(20, 5, EXACT));
    assert_eq!(tt.retrieve(key).unwrap().score, 20);
}

#[test]
fn clear_empties_the_table() {
    let mut tt = TranspositionTable::new(4);
    let key = 0x5555_6666_7777_8888;
    tt.store(key, entry(1, 1, EXACT));
    tt.clear();
    assert_eq!(tt.retrieve(key), None);
}

#[test]
fn mate_scores_survive_the_i16_payload() {
    let mut tt = TranspositionTable::new(4);
    let key = 0x0F0F_F0F0_0F0F_F0F0;
    tt.store(key, entry(-19_040, 40, EXACT));
    assert_eq!(tt.retrieve(key).unwrap().score, -19_040);
}
