//! Process-wide precomputed lookup tables: magic sliding attacks plus the
//! between/pin rays. Built once on first use; everything downstream takes
//! `&AttackTables` by reference.

use super::magic::{MagicTables, generate_magic_tables};
use super::rays::{RayTables, generate_ray_tables};
use once_cell::sync::OnceCell;

pub struct AttackTables {
    pub magics: MagicTables,
    pub rays: RayTables,
}

impl AttackTables {
    #[inline(always)]
    pub fn rook_attacks(&self, square: usize, blockers: u64) -> u64 {
        self.magics.rook_attacks(square, blockers)
    }

    #[inline(always)]
    pub fn bishop_attacks(&self, square: usize, blockers: u64) -> u64 {
        self.magics.bishop_attacks(square, blockers)
    }

    #[inline(always)]
    pub fn queen_attacks(&self, square: usize, blockers: u64) -> u64 {
        self.magics.queen_attacks(square, blockers)
    }

    #[inline(always)]
    pub fn between(&self, a: usize, b: usize) -> u64 {
        self.rays.between[a][b]
    }
}

/// The shared table instance.
pub fn attack_tables() -> &'static AttackTables {
    static TABLES: OnceCell<AttackTables> = OnceCell::new();
    TABLES.get_or_init(|| AttackTables {
        magics: generate_magic_tables(),
        rays: generate_ray_tables(),
    })
}
