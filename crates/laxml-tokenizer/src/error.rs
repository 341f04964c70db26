//! Errors surfaced by the tokenizer pipeline.
//!
//! Malformed markup is never an error. The only failures are the ones the
//! input source itself reports, plus misuse of kind-specific token setters.

use std::io;

use thiserror::Error;

use crate::token::TokenKind;

/// Failure while scanning, decoding, or tokenizing markup.
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The underlying reader failed.
    #[error("failed to read markup input: {0}")]
    Io(#[from] io::Error),

    /// The input was not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first byte of the offending sequence.
        offset: usize,
    },

    /// A kind-specific setter was called on a token of another kind.
    #[error("cannot {operation} on a {kind} token")]
    WrongKind {
        /// What the caller tried to do, e.g. "set a name".
        operation: &'static str,
        /// Kind of the token it was tried on.
        kind: TokenKind,
    },
}
