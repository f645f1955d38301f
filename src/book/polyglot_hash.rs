//! The Polyglot-convention position key, used only to probe the opening
//! book. Same random table as the internal key, but squares are re-indexed
//! to `rank * 8 + file` with rank 0 at White's back rank, the en-passant
//! term only applies when a pawn can actually capture, and the side term is
//! XORed when *White* is to move.

use crate::bitboard::BitIter;
use crate::board::{Board, Color, PIECES, Piece};
use crate::hash::keys::{EP_OFFSET, RANDOM_64, TURN_OFFSET};
use crate::hash::zobrist::{piece_kind, xor_castling_delta};
use crate::moves::attacks::pawn_attacks;

/// Polyglot square index for an internal square (`0 = a8` becomes a1-first).
#[inline(always)]
const fn polyglot_square(sq: u8) -> usize {
    ((7 - sq / 8) * 8 + sq % 8) as usize
}

#[inline(always)]
pub fn piece_key(color: Color, piece: Piece, sq: u8) -> u64 {
    RANDOM_64[piece_kind(color, piece) * 64 + polyglot_square(sq)]
}

#[inline(always)]
pub fn turn_key() -> u64 {
    RANDOM_64[TURN_OFFSET]
}

/// The en-passant term, or 0. Polyglot only hashes the target file when a
/// pawn of the side to move could pseudo-legally capture onto it (pins and
/// king safety deliberately ignored).
pub fn ep_contribution(board: &Board) -> u64 {
    let ep = board.en_passant;
    if ep == 0 {
        return 0;
    }
    let us = board.side_to_move;
    // Our capturing pawns stand where an enemy pawn on the target would
    // attack.
    let sources = pawn_attacks(ep, us.opposite());
    if sources & board.bb(us, Piece::Pawn) != 0 {
        RANDOM_64[EP_OFFSET + (ep.trailing_zeros() % 8) as usize]
    } else {
        0
    }
}

/// Full recompute; the incremental copy on the board is checked against
/// this in debug builds.
pub fn compute_key(board: &Board) -> u64 {
    let mut key: u64 = 0;

    for color in [Color::White, Color::Black] {
        for piece in PIECES {
            for sq in BitIter(board.bb(color, piece)) {
                key ^= piece_key(color, piece, sq);
            }
        }
    }

    xor_castling_delta(&mut key, 0, board.castling_rights);
    key ^= ep_contribution(board);

    if board.side_to_move == Color::White {
        key ^= turn_key();
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyglot_square_flips_vertically() {
        assert_eq!(polyglot_square(0), 56); // a8
        assert_eq!(polyglot_square(56), 0); // a1
        assert_eq!(polyglot_square(63), 7); // h1
        assert_eq!(polyglot_square(60), 4); // e1
    }

    #[test]
    fn book_key_differs_from_internal_key() {
        let board = Board::new();
        assert_ne!(board.book_key, board.zobrist);
        assert_eq!(board.book_key, compute_key(&board));
    }

    #[test]
    fn ep_term_requires_a_capturing_pawn() {
        // Black pawn c5 sits beside the b5 pawn: the b6 target is hashable.
        let capturable: Board = "4k3/8/8/8/1pP5/8/8/4K3 b - c3 0 1".parse().unwrap();
        // No adjacent capturer: the target does not contribute.
        let lonely: Board = "4k3/8/8/8/2P5/8/8/4K3 b - c3 0 1".parse().unwrap();
        assert_eq!(ep_contribution(&lonely), 0);
        assert_ne!(ep_contribution(&capturable), 0);
    }

    #[test]
    fn transpositions_share_a_book_key() {
        use crate::moves::movegen::generate_legal;
        use crate::moves::tables::attack_tables;

        let mut a = Board::new();
        let mut b = Board::new();
        for (left, right) in [("g1f3", "e7e6"), ("e2e3", "g8f6")].iter().zip(
            [("e2e3", "g8f6"), ("g1f3", "e7e6")].iter(),
        ) {
            for uci in [left.0, left.1] {
                let mv = generate_legal(&a, attack_tables())
                    .into_iter()
                    .find(|m| m.to_uci() == uci)
                    .unwrap();
                a.make_move(mv);
            }
            for uci in [right.0, right.1] {
                let mv = generate_legal(&b, attack_tables())
                    .into_iter()
                    .find(|m| m.to_uci() == uci)
                    .unwrap();
                b.make_move(mv);
            }
        }
        assert_eq!(a.book_key, b.book_key);
        assert_eq!(a.zobrist, b.zobrist);
    }
}
