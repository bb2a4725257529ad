//! A backtracking pattern-combinator engine over arbitrary sequences.
//!
//! Patterns are trees of leaves ([`Literal`], [`CharClass`], ...) and
//! combinators ([`Concatenation`], [`Alternation`], [`Repetition`],
//! [`Assertion`], [`Token`]). Matching a pattern from a [`Match`] yields a lazy
//! stream of results in regex backtracking priority, forward or backward, over
//! any [`Subject`]: slices, strings or ropes.
//!
//! # Example
//!
//! ```rust
//! use seqmatch::{Concatenation, Literal, Match, Multiplicity, Pattern, Repetition, Token};
//!
//! let a_plus = || Repetition::eager(Literal::from_str("a"), Multiplicity::one_or_more());
//! let prefix = Token::new(a_plus());
//! let suffix = Token::new(a_plus());
//! let (p, s) = (prefix.id(), suffix.id());
//! let pattern = Concatenation::new(prefix, suffix);
//!
//! let splits: Vec<_> = pattern
//!     .forward_matches(Match::at_start("aaa"))
//!     .filter(|m| m.position() == 3)
//!     .map(|m| (m.first_captured_slice(p).unwrap(), m.first_captured_slice(s).unwrap()))
//!     .collect();
//!
//! assert_eq!(splits, vec![("aa", "a"), ("a", "aa")]);
//! ```

mod captures;
pub mod combinator;
mod error;
pub mod leaf;
mod match_state;
mod pattern;
pub mod search;
mod subject;

pub use captures::TokenId;
pub use combinator::{
    Alternation, Assertion, Concatenation, Greediness, HomogeneousConcatenation, Multiplicity,
    Polarity, Repetition, Token,
};
pub use error::PatternError;
pub use leaf::{
    Anchor, AnyElement, BackReference, CharClass, CharClassKind, ElementRange, ElementSet, Literal,
    Predicate,
};
pub use match_state::{Direction, Match};
pub use pattern::{BoxedPattern, MatchCollection, Matches, Pattern};
pub use search::{
    FindIter, Found, find_backward, find_forward, find_iter, find_iter_backward, full_matches,
    is_full_match, is_match, match_at,
};
pub use subject::Subject;
