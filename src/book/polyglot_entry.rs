use crate::board::{Board, Piece};
use crate::square::Square;

/// One 16-byte Polyglot record, byte-swapped to host order on load.
#[derive(Debug, Clone, Copy)]
pub struct BookEntry {
    pub key: u64,
    pub mv: u16,
    pub weight: u16,
    pub learn: u32,
}

impl BookEntry {
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        BookEntry {
            key: u64::from_be_bytes(bytes[0..8].try_into().unwrap()),
            mv: u16::from_be_bytes(bytes[8..10].try_into().unwrap()),
            weight: u16::from_be_bytes(bytes[10..12].try_into().unwrap()),
            learn: u32::from_be_bytes(bytes[12..16].try_into().unwrap()),
        }
    }

    /// Decode the packed move: three bits each for to-file, to-rank,
    /// from-file, from-rank, then the promotion piece in bits 12-14.
    /// Polyglot writes castling as king-takes-rook; translate that to the
    /// king's true destination so it can match a generated move.
    pub fn decode(&self, board: &Board) -> Option<(Square, Square, Option<Piece>)> {
        let to_file = (self.mv & 0x7) as u8;
        let to_rank = (self.mv >> 3 & 0x7) as u8 + 1;
        let from_file = (self.mv >> 6 & 0x7) as u8;
        let from_rank = (self.mv >> 9 & 0x7) as u8 + 1;
        let promo_bits = self.mv >> 12 & 0x7;

        let from = Square::from_file_rank(from_file, from_rank);
        let mut to = Square::from_file_rank(to_file, to_rank);

        let promotion = match promo_bits {
            0 => None,
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            _ => return None,
        };

        if board.piece_type_at(from) == Some(Piece::King) {
            to = match (from.index(), to.index()) {
                (60, 63) => Square::from_index(62), // e1h1 -> e1g1
                (60, 56) => Square::from_index(58), // e1a1 -> e1c1
                (4, 7) => Square::from_index(6),    // e8h8 -> e8g8
                (4, 0) => Square::from_index(2),    // e8a8 -> e8c8
                _ => to,
            };
        }

        Some((from, to, promotion))
    }
}
