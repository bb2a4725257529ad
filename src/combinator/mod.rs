//! Combinators that compose patterns into trees.
//!
//! | Combinator                  | Matches                                      |
//! |-----------------------------|----------------------------------------------|
//! | [`Concatenation`]           | `a` then `b`                                 |
//! | [`HomogeneousConcatenation`]| two or more same-typed patterns in order     |
//! | [`Alternation`]             | every match of `a`, then every match of `b`  |
//! | [`Repetition`]              | a pattern `min..=max` times, eager or lazy   |
//! | [`Assertion`]               | zero-width lookahead / lookbehind            |
//! | [`Token`]                   | a pattern, recording the span it covers      |

pub mod alternation;
pub mod assertion;
pub mod concatenation;
pub mod repetition;
pub mod token;

pub use alternation::Alternation;
pub use assertion::{Assertion, Polarity};
pub use concatenation::{Concatenation, HomogeneousConcatenation};
pub use repetition::{Greediness, Multiplicity, Repetition};
pub use token::Token;
