//! Recoverable error types for the decoding and evaluation surfaces.
//!
//! Mutation APIs on [`crate::Aig`] enforce their invariants with `assert!`:
//! a duplicate name or a malformed mutation request is a programmer error,
//! not a condition a caller can sensibly recover from. Decoding external
//! bytes and evaluating an AIG as a truth table, by contrast, can fail on
//! data the caller does not control, so those surfaces return `Result`.

use std::io;

/// An error decoding an AIGER file, a marshalled AIG, or a counter-example
/// witness, or evaluating an AIG that does not meet an operation's
/// preconditions.
#[derive(Debug, thiserror::Error)]
pub enum AigError {
    /// The input bytes do not form a well-formed AIGER file, marshal blob,
    /// or counter-example witness.
    #[error("malformed input: {message} (offset: {offset:?})")]
    MalformedInput {
        /// A human-readable description of what was expected.
        message: String,
        /// The byte offset at which the problem was detected, if known.
        offset: Option<usize>,
    },
    /// The requested operation does not support this AIG, e.g. evaluating
    /// a truth table for an AIG that still has latches or buffers.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// An I/O error occurred while reading or writing.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AigError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            offset: None,
        }
    }

    pub(crate) fn malformed_at(message: impl Into<String>, offset: usize) -> Self {
        Self::MalformedInput {
            message: message.into(),
            offset: Some(offset),
        }
    }

    pub(crate) fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported(message.into())
    }
}

/// A `Result` alias for fallible AIG operations.
pub type Result<T> = std::result::Result<T, AigError>;
