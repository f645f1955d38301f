//! The engine context: precomputed tables, transposition table, opening
//! book and search state in one value, plus the handful of hooks a UCI
//! driver needs (`new`, `set_position`, `go`, `stop`).

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::EngineError;
use crate::moves::movegen::{generate_legal, in_check};
use crate::moves::tables::{AttackTables, attack_tables};
use crate::moves::types::Move;
use crate::book::PolyglotBook;
use crate::search::eval::evaluate;
use crate::search::ordering::order_moves;
use crate::search::timeout::spawn_watcher;
use crate::search::tt::{EXACT, LOWERBOUND, TranspositionTable, TtData, UPPERBOUND};

/// Hard cap on requested depth; deeper requests are clamped down to this.
pub const MAX_DEPTH: u8 = 40;

/// Finite window sentinels. Real scores stay strictly inside.
const INF: i32 = 20_000;
/// Mate at `depth` left scores `-(MATE_FLOOR + depth)`, so shorter mates
/// (found at higher remaining depth) score worse for the mated side.
const MATE_FLOOR: i32 = 19_000;
/// Below any reachable score; the first searched move always raises it.
const SCORE_FLOOR: i32 = -25_000;
/// Immediate repetition of the position two plies back: slightly below a
/// true draw, so the engine avoids forcing one without fearing it.
const REPETITION_NUDGE: i32 = -5;

const DEFAULT_MOVETIME_MS: u64 = 1_000;

pub struct Engine {
    tables: &'static AttackTables,
    tt: TranspositionTable,
    book: Option<PolyglotBook>,
    board: Board,
    timeout: Arc<AtomicBool>,
    nodes: u64,
    best_move: Move,
    best_eval: i32,
    iteration_move: Move,
    iteration_eval: i32,
}

impl Engine {
    /// Build an engine with a `tt_mb`-megabyte transposition table and an
    /// optional Polyglot book. A missing or unreadable book is logged and
    /// the engine runs without one.
    pub fn new(tt_mb: usize, book_path: Option<&Path>) -> Self {
        let book = book_path.and_then(|path| match PolyglotBook::load(path) {
            Ok(book) => {
                info!(path = %path.display(), entries = book.len(), "opening book loaded");
                Some(book)
            }
            Err(err) => {
                let err = EngineError::BookLoad(err);
                warn!(path = %path.display(), %err, "running without a book");
                None
            }
        });

        Engine {
            tables: attack_tables(),
            tt: TranspositionTable::new(tt_mb),
            book,
            board: Board::new(),
            timeout: Arc::new(AtomicBool::new(false)),
            nodes: 0,
            best_move: Move::NULL,
            best_eval: 0,
            iteration_move: Move::NULL,
            iteration_eval: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Score of the last committed iteration, from the mover's view.
    pub fn best_eval(&self) -> i32 {
        self.best_eval
    }

    /// `position [fen <fen> | startpos] moves ...` — the FEN (or the start
    /// position) is loaded, then each UCI move is applied in turn. A move
    /// that matches no legal move is silently skipped; GUIs that send junk
    /// get the longest legal prefix applied.
    pub fn set_position(&mut self, position: &str, moves: &[&str]) -> Result<(), EngineError> {
        if position == "startpos" {
            self.board = Board::new();
        } else {
            self.board.set_fen(position)?;
        }
        for uci in moves {
            if let Some(mv) = generate_legal(&self.board, self.tables)
                .into_iter()
                .find(|m| m.to_uci() == *uci)
            {
                self.board.make_move(mv);
            }
        }
        Ok(())
    }

    /// Cooperative stop: the search observes the flag at its next node.
    pub fn stop(&self) {
        self.timeout.store(true, Ordering::Release);
    }

    /// Search the engine's own position. `go` in UCI terms.
    pub fn go(&mut self, depth: Option<u8>, movetime_ms: Option<u64>) -> Option<Move> {
        let mut board = std::mem::take(&mut self.board);
        let best = self.find_best_move(
            &mut board,
            depth.unwrap_or(MAX_DEPTH),
            movetime_ms.unwrap_or(DEFAULT_MOVETIME_MS),
        );
        self.board = board;
        best
    }

    /// Iterative-deepening driver. Probes the book first; on a miss it
    /// starts the timeout watcher and deepens until the depth or time
    /// budget runs out, returning the best move of the last completed
    /// iteration. If the clock beats even the first iteration, the partial
    /// iteration's best-so-far is used rather than nothing.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        max_depth: u8,
        time_ms: u64,
    ) -> Option<Move> {
        if let Some(book) = &self.book
            && let Some(mv) = book.probe(board, self.tables)
        {
            info!(mv = %mv, "book move");
            return Some(mv);
        }

        self.timeout.store(false, Ordering::Release);
        let watcher = spawn_watcher(self.timeout.clone(), time_ms);

        let max_depth = max_depth.clamp(1, MAX_DEPTH);
        self.nodes = 0;
        self.best_move = Move::NULL;
        self.best_eval = SCORE_FLOOR;

        for depth in 1..=max_depth {
            self.iteration_move = Move::NULL;
            self.iteration_eval = SCORE_FLOOR;

            let completed = self.root_search(board, depth as i32);

            if completed && !self.iteration_move.is_null() {
                self.best_move = self.iteration_move;
                self.best_eval = self.iteration_eval;
                debug!(
                    depth,
                    best = %self.best_move,
                    eval = self.best_eval,
                    nodes = self.nodes,
                    "iteration complete"
                );
            } else if self.best_move.is_null() && !self.iteration_move.is_null() {
                // The clock beat every iteration; a partial best is still
                // better than forfeiting.
                self.best_move = self.iteration_move;
                self.best_eval = self.iteration_eval;
            }

            if self.timeout.load(Ordering::Relaxed) {
                break;
            }
        }

        // Wake the watcher if the search ran out of depth before time.
        self.timeout.store(true, Ordering::Release);
        let _ = watcher.join();

        if self.best_move.is_null() {
            None
        } else {
            Some(self.best_move)
        }
    }

    /// One full-window iteration over the root moves. Returns false when
    /// the timeout cut it short, in which case the iteration must not be
    /// trusted as complete.
    fn root_search(&mut self, board: &mut Board, depth: i32) -> bool {
        let mut moves = generate_legal(board, self.tables);
        let hash_move = self
            .tt
            .retrieve(board.zobrist)
            .map(|data| data.mv)
            .unwrap_or(Move::NULL);
        order_moves(&mut moves, board, self.best_move, hash_move);

        let mut alpha = -INF;
        let beta = INF;

        for mv in moves {
            board.make_move(mv);
            let score = -self.negamax(board, -beta, -alpha, depth - 1);
            board.unmake_move();

            if self.timed_out() {
                return false;
            }

            if score > self.iteration_eval {
                self.iteration_eval = score;
                self.iteration_move = mv;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        true
    }

    fn negamax(&mut self, board: &mut Board, mut alpha: i32, mut beta: i32, depth: i32) -> i32 {
        if self.timed_out() {
            return 0; // caller discards
        }
        self.nodes += 1;

        // Immediate repetition of the position two plies back. Slightly
        // negative rather than zero so the engine prefers any move that
        // keeps winning chances alive.
        let plies = board.history.len();
        if plies >= 2 && board.history[plies - 2].prev_zobrist == board.zobrist {
            return REPETITION_NUDGE;
        }

        let original_alpha = alpha;

        let mut hash_move = Move::NULL;
        if let Some(data) = self.tt.retrieve(board.zobrist) {
            hash_move = data.mv;
            if data.depth as i32 >= depth {
                let score = data.score as i32;
                match data.flag {
                    EXACT => return score,
                    LOWERBOUND if score >= beta => alpha = alpha.max(score),
                    UPPERBOUND if score <= alpha => beta = beta.min(score),
                    _ => {}
                }
                if alpha >= beta {
                    return score;
                }
            }
        }

        let mut moves = generate_legal(board, self.tables);
        if moves.is_empty() {
            // The -depth term prefers the shorter of two mates.
            return if in_check(board, self.tables, board.side_to_move) {
                -MATE_FLOOR - depth
            } else {
                0
            };
        }

        if depth <= 0 {
            return self.quiescence(board, alpha, beta);
        }

        order_moves(&mut moves, board, self.best_move, hash_move);

        let mut best_score = SCORE_FLOOR;
        let mut best_move = Move::NULL;

        for mv in moves {
            board.make_move(mv);
            let score = -self.negamax(board, -beta, -alpha, depth - 1);
            board.unmake_move();

            if self.timed_out() {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
                if score > alpha {
                    alpha = score;
                }
                if score >= beta {
                    // Fail-soft cutoff.
                    self.tt.store(
                        board.zobrist,
                        TtData {
                            score: score as i16,
                            depth: depth as u8,
                            flag: LOWERBOUND,
                            mv,
                        },
                    );
                    return score;
                }
            }
        }

        let flag = if best_score <= original_alpha {
            UPPERBOUND
        } else if best_score >= beta {
            LOWERBOUND
        } else {
            EXACT
        };
        if !self.timed_out() {
            self.tt.store(
                board.zobrist,
                TtData {
                    score: best_score as i16,
                    depth: depth as u8,
                    flag,
                    mv: best_move,
                },
            );
        }

        best_score
    }

    /// Capture-and-promotion search at the horizon. Fail-hard, no table
    /// probes, no ordering seed.
    fn quiescence(&mut self, board: &mut Board, mut alpha: i32, beta: i32) -> i32 {
        if self.timed_out() {
            return 0;
        }
        self.nodes += 1;

        let stand_pat = evaluate(board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = generate_legal(board, self.tables);
        moves.retain(|m| m.is_capture() || m.is_promotion());
        order_moves(&mut moves, board, Move::NULL, Move::NULL);

        for mv in moves {
            board.make_move(mv);
            let score = -self.quiescence(board, -beta, -alpha);
            board.unmake_move();

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    #[inline(always)]
    fn timed_out(&self) -> bool {
        self.timeout.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_excessive_depth() {
        // Depth far past the cap still terminates promptly on a trivial
        // position because the tree is tiny.
        let mut engine = Engine::new(16, None);
        engine
            .set_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", &[])
            .unwrap();
        assert_eq!(engine.go(Some(200), Some(1_000)), None, "stalemate: no moves");
    }

    #[test]
    fn set_position_ignores_illegal_moves() {
        let mut engine = Engine::new(16, None);
        engine
            .set_position("startpos", &["e2e4", "e7e5", "e4e5", "g8f6"])
            .unwrap();
        // e4e5 is illegal (blocked); it is skipped, later moves still apply.
        let fen = engine.board().to_fen();
        assert!(fen.contains("4P3"), "e4 pawn still on e4 in {}", fen);
        assert_eq!(engine.board().fullmove_number, 2);
    }

    #[test]
    fn set_position_surfaces_bad_fen() {
        let mut engine = Engine::new(16, None);
        assert!(engine.set_position("not a fen", &[]).is_err());
    }
}
