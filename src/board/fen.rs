use super::{Board, Color, Piece};
use crate::board::castle_bits::*;
use crate::error::EngineError;
use crate::square::Square;

impl Board {
    /// Restore full state from a six-field FEN string.
    ///
    /// The board is reset before parsing and the history stack cleared, so a
    /// `BadFen` error leaves a defined empty position, never a partial one.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        match Board::parse_fen(fen) {
            Ok(board) => {
                *self = board;
                Ok(())
            }
            Err(err) => {
                *self = Board::new_empty();
                Err(err)
            }
        }
    }

    fn parse_fen(fen: &str) -> Result<Board, EngineError> {
        let mut board = Board::new_empty();

        let bad = |msg: &str| EngineError::BadFen(format!("{} in `{}`", msg, fen));

        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| bad("missing placement"))?;
        let side = fields.next().ok_or_else(|| bad("missing side to move"))?;
        let castling = fields.next().ok_or_else(|| bad("missing castling field"))?;
        let en_passant = fields.next().ok_or_else(|| bad("missing en-passant field"))?;
        // Clock fields are optional in informal FENs; default 0 / 1.
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        let mut row = 0usize;
        let mut file = 0usize;
        for c in placement.chars() {
            match c {
                '/' => {
                    if file != 8 {
                        return Err(bad("short rank"));
                    }
                    row += 1;
                    file = 0;
                    if row >= 8 {
                        return Err(bad("too many ranks"));
                    }
                }
                '1'..='8' => {
                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(bad("rank overflow"));
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(bad("rank overflow"));
                    }
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = match c.to_ascii_lowercase() {
                        'p' => Piece::Pawn,
                        'n' => Piece::Knight,
                        'b' => Piece::Bishop,
                        'r' => Piece::Rook,
                        'q' => Piece::Queen,
                        'k' => Piece::King,
                        _ => return Err(bad("unknown piece letter")),
                    };
                    board.place_piece(color, piece, (row * 8 + file) as u8);
                    file += 1;
                }
            }
        }
        if row != 7 || file != 8 {
            return Err(bad("placement does not cover 8 ranks"));
        }

        board.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("side to move must be `w` or `b`")),
        };

        if castling != "-" {
            for c in castling.chars() {
                board.castling_rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(bad("unknown castling letter")),
                };
            }
        }

        if en_passant != "-" {
            let sq: Square = en_passant
                .parse()
                .map_err(|_| bad("malformed en-passant square"))?;
            let expected_rank = match board.side_to_move {
                Color::White => 6,
                Color::Black => 3,
            };
            if sq.rank() != expected_rank {
                return Err(bad("en-passant square on impossible rank"));
            }
            board.en_passant = sq.bb();
        }

        board.halfmove_clock = halfmove
            .parse()
            .map_err(|_| bad("malformed halfmove clock"))?;
        board.fullmove_number = fullmove
            .parse()
            .map_err(|_| bad("malformed fullmove number"))?;
        if board.fullmove_number == 0 {
            return Err(bad("fullmove number starts at 1"));
        }

        if let Err(msg) = board.validate() {
            return Err(EngineError::BadFen(msg));
        }

        board.refresh_hashes();
        board.history.clear();
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for row in 0..8u8 {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::from_index(row * 8 + file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        let c = match piece {
                            Piece::Pawn => 'p',
                            Piece::Knight => 'n',
                            Piece::Bishop => 'b',
                            Piece::Rook => 'r',
                            Piece::Queen => 'q',
                            Piece::King => 'k',
                        };
                        fen.push(if color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        });
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White {
            'w'
        } else {
            'b'
        });

        fen.push(' ');
        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            if self.has_castling(CASTLE_WK) {
                fen.push('K');
            }
            if self.has_castling(CASTLE_WQ) {
                fen.push('Q');
            }
            if self.has_castling(CASTLE_BK) {
                fen.push('k');
            }
            if self.has_castling(CASTLE_BQ) {
                fen.push('q');
            }
        }

        fen.push(' ');
        if self.en_passant == 0 {
            fen.push('-');
        } else {
            let sq = Square::from_index(self.en_passant.trailing_zeros() as u8);
            fen.push_str(&sq.to_string());
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        fen
    }
}
