//! `make_move` / `unmake_move`.
//!
//! `make_move` mutates in place and pushes a `HistoryRecord`; `unmake_move`
//! pops it and inverts every step. Both hashes are kept incrementally: the
//! piece toggles ride on `place_piece`/`remove_piece`, the scalar terms
//! (castling rights, en passant, side to move) are XORed here, and unmake
//! restores the saved keys outright.

use crate::board::castle_bits::*;
use crate::board::{Board, Color, Piece};
use crate::book::polyglot_hash;
use crate::hash::zobrist;
use crate::moves::types::{HistoryRecord, Move};
use crate::square::Square;

/// Rook relocation for a castling king destination.
#[inline(always)]
fn rook_castle_squares(king_to: u8) -> Option<(Square, Square)> {
    match king_to {
        62 => Some((Square::from_index(63), Square::from_index(61))), // White O-O: h1 -> f1
        58 => Some((Square::from_index(56), Square::from_index(59))), // White O-O-O: a1 -> d1
        6 => Some((Square::from_index(7), Square::from_index(5))),    // Black O-O: h8 -> f8
        2 => Some((Square::from_index(0), Square::from_index(3))),    // Black O-O-O: a8 -> d8
        _ => None,
    }
}

/// Right lost when a rook moves from, or is captured on, a corner square.
#[inline(always)]
fn rook_corner_right(color: Color, sq: u8) -> u8 {
    match (color, sq) {
        (Color::White, 63) => CASTLE_WK, // h1
        (Color::White, 56) => CASTLE_WQ, // a1
        (Color::Black, 7) => CASTLE_BK,  // h8
        (Color::Black, 0) => CASTLE_BQ,  // a8
        _ => 0,
    }
}

impl Board {
    pub fn make_move(&mut self, mv: Move) {
        let color = self.side_to_move;
        let them = color.opposite();
        let from = mv.from.index();
        let to = mv.to.index();

        let mut record = HistoryRecord {
            mv,
            captured: None,
            prev_castling_rights: self.castling_rights,
            prev_en_passant: self.en_passant,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_zobrist: self.zobrist,
            prev_book_key: self.book_key,
            castling_rook: None,
        };

        // XOR out the old en-passant terms before any state changes: the
        // book key's contribution depends on the pre-move pawn placement.
        self.book_key ^= polyglot_hash::ep_contribution(self);
        self.zobrist ^= zobrist::ep_key(zobrist::ep_file(self.en_passant));

        // 1-2. Resolve and remove the captured piece. En passant takes the
        // pawn one square behind the landing square.
        if mv.is_en_passant() {
            let cap_sq = if color == Color::White { to + 8 } else { to - 8 };
            self.remove_piece(them, Piece::Pawn, cap_sq);
            record.captured = Some((Piece::Pawn, Square::from_index(cap_sq)));
        } else if mv.is_capture() {
            let victim = self
                .piece_type_at(mv.to)
                .expect("capture flag set on empty square");
            self.remove_piece(them, victim, to);
            record.captured = Some((victim, mv.to));
        }

        // 3. Castling moves the rook as well.
        if mv.is_castling() {
            let (rook_from, rook_to) =
                rook_castle_squares(to).expect("castle flag with bad destination");
            self.remove_piece(color, Piece::Rook, rook_from.index());
            self.place_piece(color, Piece::Rook, rook_to.index());
            record.castling_rook = Some((rook_from, rook_to));
        }

        // 4-5. Move the piece; promotions swap the pawn for the new piece.
        self.remove_piece(color, mv.piece, from);
        match mv.promotion {
            Some(promoted) => self.place_piece(color, promoted, to),
            None => self.place_piece(color, mv.piece, to),
        }

        // 6. Castling rights: king moves drop both, rook moves or rook
        // captures from a corner drop one.
        let mut lost = 0u8;
        if mv.piece == Piece::King {
            lost |= match color {
                Color::White => CASTLE_WK | CASTLE_WQ,
                Color::Black => CASTLE_BK | CASTLE_BQ,
            };
        }
        if mv.piece == Piece::Rook {
            lost |= rook_corner_right(color, from);
        }
        if let Some((Piece::Rook, cap_sq)) = record.captured {
            lost |= rook_corner_right(them, cap_sq.index());
        }
        let new_rights = self.castling_rights & !lost;
        if new_rights != self.castling_rights {
            zobrist::xor_castling_delta(&mut self.zobrist, self.castling_rights, new_rights);
            zobrist::xor_castling_delta(&mut self.book_key, self.castling_rights, new_rights);
            self.castling_rights = new_rights;
        }

        // 7. Double pushes leave the jumped square as en-passant target.
        self.en_passant = if mv.is_double_pawn_push() {
            let jumped = if color == Color::White { to + 8 } else { to - 8 };
            1u64 << jumped
        } else {
            0
        };

        // 8-9. Clocks.
        if mv.is_capture() || mv.piece == Piece::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        // 10. Flip the side to move. Both keys carry a side term, so both
        // toggle on every move.
        self.side_to_move = them;
        self.zobrist ^= zobrist::side_key();
        self.book_key ^= polyglot_hash::turn_key();

        // XOR in the new en-passant terms against the post-move state.
        self.zobrist ^= zobrist::ep_key(zobrist::ep_file(self.en_passant));
        self.book_key ^= polyglot_hash::ep_contribution(self);

        // 11. Record goes on the stack last.
        self.history.push(record);

        #[cfg(debug_assertions)]
        self.assert_hash();
    }

    /// Pop the last history record and invert every step of `make_move`.
    /// Silently does nothing on an empty stack.
    pub fn unmake_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };
        let mv = record.mv;
        let color = mv.color;
        let from = mv.from.index();
        let to = mv.to.index();

        // Piece movement back, promotion folded into the same step.
        match mv.promotion {
            Some(promoted) => self.remove_piece(color, promoted, to),
            None => self.remove_piece(color, mv.piece, to),
        }
        self.place_piece(color, mv.piece, from);

        if let Some((victim, cap_sq)) = record.captured {
            self.place_piece(color.opposite(), victim, cap_sq.index());
        }

        if let Some((rook_from, rook_to)) = record.castling_rook {
            self.remove_piece(color, Piece::Rook, rook_to.index());
            self.place_piece(color, Piece::Rook, rook_from.index());
        }

        self.side_to_move = color;
        self.castling_rights = record.prev_castling_rights;
        self.en_passant = record.prev_en_passant;
        self.halfmove_clock = record.prev_halfmove_clock;
        self.fullmove_number = record.prev_fullmove_number;

        // The saved keys are the exact inverse of every incremental XOR
        // applied on the way in (including the piece toggles just replayed).
        self.zobrist = record.prev_zobrist;
        self.book_key = record.prev_book_key;

        #[cfg(debug_assertions)]
        self.assert_hash();
    }
}
