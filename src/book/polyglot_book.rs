use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use rand::Rng;
use tracing::debug;

use super::polyglot_entry::BookEntry;
use crate::board::Board;
use crate::moves::movegen::generate_legal;
use crate::moves::tables::AttackTables;
use crate::moves::types::Move;

/// In-memory Polyglot opening book: 16-byte big-endian records, byte-swapped
/// and sorted ascending by key on load so probes binary-search.
pub struct PolyglotBook {
    entries: Vec<BookEntry>,
}

impl PolyglotBook {
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        let mut entries: Vec<BookEntry> = buffer
            .chunks_exact(16)
            .map(|chunk| BookEntry::from_bytes(chunk.try_into().unwrap()))
            .collect();
        entries.sort_by_key(|e| e.key);

        Ok(Self { entries })
    }

    /// Probe by the position's book key. Candidate moves are accepted only
    /// when they match a generated legal move (from, to and promotion
    /// piece); the pick among matches is weighted by the entries' weights.
    /// A faulty or stale entry is thus silently skipped.
    pub fn probe(&self, board: &Board, tables: &AttackTables) -> Option<Move> {
        let key = board.book_key;
        let start = self.entries.partition_point(|e| e.key < key);
        if start >= self.entries.len() || self.entries[start].key != key {
            return None;
        }

        let legal = generate_legal(board, tables);

        let mut matched: Vec<(Move, u32)> = Vec::new();
        for entry in self.entries[start..].iter().take_while(|e| e.key == key) {
            let Some((from, to, promotion)) = entry.decode(board) else {
                continue;
            };
            if let Some(mv) = legal
                .iter()
                .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            {
                matched.push((*mv, entry.weight as u32));
            }
        }
        if matched.is_empty() {
            return None;
        }

        let total: u32 = matched.iter().map(|(_, w)| w).sum();
        if total == 0 {
            // All-zero weights still identify playable moves.
            return Some(matched[0].0);
        }

        let mut pick = rand::rng().random_range(0..total);
        for (mv, weight) in &matched {
            if pick < *weight {
                debug!(mv = %mv, weight, total, "book hit");
                return Some(*mv);
            }
            pick -= weight;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
