use std::io;
use thiserror::Error;

/// Errors the engine core surfaces to callers.
///
/// Timeout and transposition-table misses are ordinary control flow and never
/// appear here; an unsupported search depth is recovered by clamping.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed FEN input. The board is reset before parsing, so the
    /// position is a defined empty state when this is returned.
    #[error("bad FEN: {0}")]
    BadFen(String),

    /// Opening-book file missing or unreadable. Non-fatal: the engine
    /// logs it and keeps running without a book.
    #[error("failed to load opening book: {0}")]
    BookLoad(#[from] io::Error),
}
