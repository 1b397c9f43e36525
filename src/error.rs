//! Engine-level error kinds.
//!
//! Every public operation validates its input before doing any lookup work
//! and fails fast with one of these kinds. Absence of data (unknown drug
//! pair, unknown category letter, empty prefix scan) resolves to an empty
//! result, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Search or diagnostic input was empty after trimming.
    #[error("query is empty")]
    InvalidQuery,

    /// Fewer items than the operation needs.
    #[error("at least {required} items required, got {got}")]
    InsufficientInput { required: usize, got: usize },

    /// Direct lookup of a code with no catalogue entry.
    #[error("unknown code: {0}")]
    NotFound(String),
}
