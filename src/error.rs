//! Construction-time errors.
//!
//! Matching itself never fails: "no match" is an empty result, not an error.

use thiserror::Error;

/// A combinator was built from arguments it cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid arity: a concatenation needs at least 2 sub-patterns, got {found}")]
    InvalidArity { found: usize },

    #[error("invalid multiplicity: minimum {min} exceeds maximum {max}")]
    InvalidMultiplicity { min: usize, max: usize },

    #[error("unknown character class: {0:?}")]
    UnknownCharClass(String),
}
