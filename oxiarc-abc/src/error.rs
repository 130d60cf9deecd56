//! Error types for the adaptive binary arithmetic coder.
//!
//! The coder has no runtime errors on well-formed input: the only
//! precondition it checks is the sliding-window context length, which must
//! fit within the window the ring buffer was sized for.

use thiserror::Error;

/// Errors produced by [`crate::encode`] and [`crate::decode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbcError {
    /// `context_length` exceeds the configured maximum window size.
    #[error("context length {requested} exceeds maximum supported {max}")]
    ContextTooLarge {
        /// The requested context length, in bits.
        requested: usize,
        /// The configured maximum, in bits ([`crate::MAX_CONTEXT_BITS`]).
        max: usize,
    },
}

/// Result type alias for arithmetic-coder operations.
pub type Result<T> = std::result::Result<T, AbcError>;
