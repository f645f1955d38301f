use rand::RngCore;

/// Sparse random candidates (few set bits) collide less often when used as
/// magic multipliers.
#[inline(always)]
pub(super) fn random_sparse_u64<R: RngCore>(rng: &mut R) -> u64 {
    rng.next_u64() & rng.next_u64() & rng.next_u64()
}

/// A candidate is valid when no two blocker sets with different attack sets
/// hash to the same index.
pub(super) fn is_magic_valid(blockers: &[u64], attacks: &[u64], magic: u64, shift: u32) -> bool {
    let mut seen = vec![0u64; 1 << (64 - shift)];
    let mut used = vec![false; seen.len()];

    for (&blocker, &attack) in blockers.iter().zip(attacks) {
        let index = (blocker.wrapping_mul(magic) >> shift) as usize;
        if !used[index] {
            used[index] = true;
            seen[index] = attack;
        } else if seen[index] != attack {
            return false;
        }
    }
    true
}

pub(super) fn find_magic<R: RngCore>(
    blockers: &[u64],
    attacks: &[u64],
    shift: u32,
    rng: &mut R,
) -> u64 {
    for _ in 0..100_000_000u64 {
        let magic = random_sparse_u64(rng);
        // Reject multipliers that do not spread the mask's high bits.
        if magic == 0 {
            continue;
        }
        if is_magic_valid(blockers, attacks, magic, shift) {
            return magic;
        }
    }
    // With a sane shift this terminates in well under a thousand tries.
    unreachable!("no magic number found");
}
