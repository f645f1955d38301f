//! Static evaluation: material plus piece-square bonuses, with the king's
//! placement tapered between middle-game and endgame tables. Pure function
//! of the position; the score is always from the side to move's view.

use crate::bitboard::{BitIter, mirror_vertical};
use crate::board::{Board, Color, Piece};
use crate::search::pst;

const TOTAL_PHASE: i32 = 24;

/// Game phase in 0..=24: 24 is the full middle game (queens and rooks on),
/// 0 a bare endgame. Weighted count `4q + 2r + (b + n)`, clamped.
fn phase(board: &Board) -> i32 {
    let count = |piece: Piece| -> i32 {
        (board.bb(Color::White, piece).count_ones() + board.bb(Color::Black, piece).count_ones())
            as i32
    };
    (4 * count(Piece::Queen) + 2 * count(Piece::Rook) + count(Piece::Bishop) + count(Piece::Knight))
        .clamp(0, TOTAL_PHASE)
}

#[inline]
fn sum_bonuses(bb: u64, table: &[i32; 64]) -> i32 {
    BitIter(bb).map(|sq| table[sq as usize]).sum()
}

/// Material for one side; kings excluded from the balance.
fn material(board: &Board, color: Color) -> i32 {
    [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .map(|p| board.bb(color, p).count_ones() as i32 * p.value())
        .sum()
}

/// Positional terms for one side. `mirror` flips Black's bitboards onto the
/// white-oriented tables.
fn positional(board: &Board, color: Color, phase: i32) -> i32 {
    let orient = |bb: u64| -> u64 {
        match color {
            Color::White => bb,
            Color::Black => mirror_vertical(bb),
        }
    };

    let mut score = sum_bonuses(orient(board.bb(color, Piece::Pawn)), &pst::PAWN_BONUS);
    score += sum_bonuses(orient(board.bb(color, Piece::Knight)), &pst::KNIGHT_BONUS);
    score += sum_bonuses(orient(board.bb(color, Piece::Bishop)), &pst::BISHOP_BONUS);
    score += sum_bonuses(orient(board.bb(color, Piece::Rook)), &pst::ROOK_BONUS);
    score += sum_bonuses(orient(board.bb(color, Piece::Queen)), &pst::QUEEN_BONUS);

    // Tapered king safety: shelter scores in the middle game give way to
    // centralization in the endgame.
    let king = orient(board.bb(color, Piece::King));
    let middle = sum_bonuses(king, &pst::KING_BONUS_MIDDLE);
    let end = sum_bonuses(king, &pst::KING_BONUS_END);
    score += (middle * phase + end * (TOTAL_PHASE - phase)) / TOTAL_PHASE;

    score
}

/// Centipawn score from the side to move's perspective.
pub fn evaluate(board: &Board) -> i32 {
    let phase = phase(board);

    let white = material(board, Color::White) + positional(board, Color::White, phase);
    let black = material(board, Color::Black) + positional(board, Color::Black, phase);

    let score = white - black;
    match board.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}
