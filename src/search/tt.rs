//! Transposition table with the lockless XOR-key layout.
//!
//! Each slot is two 64-bit words: the packed payload and `zobrist ^
//! payload`. A probe recomputes the XOR and rejects any slot whose words do
//! not verify against the probing key, so a torn write from a concurrent
//! search (or an all-zero empty slot) reads as a miss. The single-threaded
//! engine keeps the layout anyway: it costs nothing and the table can be
//! shared by parallel searchers later without changing its format.

use crate::board::{Color, Piece};
use crate::moves::types::Move;
use crate::square::Square;

pub const EXACT: u8 = 0;
pub const LOWERBOUND: u8 = 1;
pub const UPPERBOUND: u8 = 2;

/// Unpacked payload: `{score: i16, depth: u6, flag: u2, move}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtData {
    pub score: i16,
    pub depth: u8,
    pub flag: u8,
    pub mv: Move,
}

impl TtData {
    // Bit layout of the packed word:
    //   0..16   score (i16)
    //  16..22   depth (6 bits)
    //  22..24   flag
    //  24..30   move from
    //  30..36   move to
    //  36..39   move piece
    //  39       move color
    //  40..43   move promotion (0 = none, else piece + 1)
    //  43..47   move flags
    pub fn pack(self) -> u64 {
        debug_assert!(self.depth < 64);
        let mv = self.mv;
        let promo = match mv.promotion {
            None => 0u64,
            Some(p) => p as u64 + 1,
        };
        (self.score as u16 as u64)
            | (self.depth as u64) << 16
            | (self.flag as u64) << 22
            | (mv.from.index() as u64) << 24
            | (mv.to.index() as u64) << 30
            | (mv.piece as u64) << 36
            | (mv.color as u64) << 39
            | promo << 40
            | (mv.flags as u64) << 43
    }

    pub fn unpack(word: u64) -> Self {
        let promo = word >> 40 & 0x7;
        TtData {
            score: word as u16 as i16,
            depth: (word >> 16 & 0x3F) as u8,
            flag: (word >> 22 & 0x3) as u8,
            mv: Move {
                from: Square::from_index((word >> 24 & 0x3F) as u8),
                to: Square::from_index((word >> 30 & 0x3F) as u8),
                piece: Piece::from_u8((word >> 36 & 0x7) as u8),
                color: Color::from_u8((word >> 39 & 0x1) as u8),
                promotion: if promo == 0 {
                    None
                } else {
                    Some(Piece::from_u8(promo as u8 - 1))
                },
                flags: (word >> 43 & 0xF) as u8,
            },
        }
    }
}

struct TtEntry {
    /// `zobrist ^ data`; an entry is valid for key k iff `key ^ data == k`.
    key: u64,
    data: u64,
}

pub struct TranspositionTable {
    entries: Vec<TtEntry>,
    mask: usize,
}

impl TranspositionTable {
    /// Sized to the largest power of two of 16-byte entries fitting in
    /// `size_mb` megabytes.
    pub fn new(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let max_entries = bytes / std::mem::size_of::<TtEntry>();
        let capacity = 1usize << (usize::BITS - 1 - max_entries.leading_zeros());

        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || TtEntry { key: 0, data: 0 });

        Self {
            entries,
            mask: capacity - 1,
        }
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.key = 0;
            entry.data = 0;
        }
    }

    /// Depth-preferred replacement: a shallower result never evicts a
    /// deeper one. Empty slots unpack to depth 0 and always lose.
    pub fn store(&mut self, zobrist: u64, data: TtData) {
        let entry = &mut self.entries[zobrist as usize & self.mask];
        if data.depth < TtData::unpack(entry.data).depth {
            return;
        }
        let packed = data.pack();
        entry.key = zobrist ^ packed;
        entry.data = packed;
    }

    pub fn retrieve(&self, zobrist: u64) -> Option<TtData> {
        let entry = &self.entries[zobrist as usize & self.mask];
        if entry.key ^ entry.data == zobrist {
            Some(TtData::unpack(entry.data))
        } else {
            None
        }
    }
}
