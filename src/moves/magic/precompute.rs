use super::search::find_magic;
use super::structs::{MagicEntry, MagicTables};
use crate::bitboard::BitIter;
use crate::moves::attacks::{bishop_attacks_slow, rook_attacks_slow};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Fixed seed: identical tables on every run.
const MAGIC_SEED: u64 = 0x45;

/// Relevant-occupancy mask: ray squares whose occupancy changes the attack
/// set. Edge squares never do, so each ray drops its last square.
fn rook_mask(square: usize) -> u64 {
    let row = square / 8;
    let file = square % 8;
    let mut mask = 0u64;
    for r in row + 1..7 {
        mask |= 1 << (r * 8 + file);
    }
    for r in 1..row {
        mask |= 1 << (r * 8 + file);
    }
    for f in file + 1..7 {
        mask |= 1 << (row * 8 + f);
    }
    for f in 1..file {
        mask |= 1 << (row * 8 + f);
    }
    mask
}

fn bishop_mask(square: usize) -> u64 {
    let row = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;
    for (dr, df) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
        let (mut r, mut f) = (row + dr, file + df);
        while (1..7).contains(&r) && (1..7).contains(&f) {
            mask |= 1 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Enumerate every subset of `mask` by spreading the bits of `index` onto
/// the mask's set positions.
fn blocker_subsets(mask: u64) -> Vec<u64> {
    let positions: Vec<u8> = BitIter(mask).collect();
    let count = 1usize << positions.len();
    let mut subsets = Vec::with_capacity(count);
    for index in 0..count {
        let mut blockers = 0u64;
        for (bit, &sq) in positions.iter().enumerate() {
            if index >> bit & 1 != 0 {
                blockers |= 1 << sq;
            }
        }
        subsets.push(blockers);
    }
    subsets
}

fn build_entry(
    square: usize,
    mask: u64,
    slow: impl Fn(usize, u64) -> u64,
    rng: &mut StdRng,
) -> MagicEntry {
    let blockers = blocker_subsets(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| slow(square, b)).collect();
    let shift = 64 - mask.count_ones();
    let magic = find_magic(&blockers, &attacks, shift, rng);

    let mut table = vec![0u64; 1 << mask.count_ones()];
    for (&blocker, &attack) in blockers.iter().zip(&attacks) {
        let index = (blocker.wrapping_mul(magic) >> shift) as usize;
        table[index] = attack;
    }

    MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    }
}

/// Build both sliding-attack tables. Runs once at startup.
pub fn generate_magic_tables() -> MagicTables {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);

    let rook = (0..64)
        .map(|sq| build_entry(sq, rook_mask(sq), rook_attacks_slow, &mut rng))
        .collect();
    let bishop = (0..64)
        .map(|sq| build_entry(sq, bishop_mask(sq), bishop_attacks_slow, &mut rng))
        .collect();

    MagicTables { rook, bishop }
}
