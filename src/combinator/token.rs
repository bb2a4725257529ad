//! Capturing groups.

use crate::captures::TokenId;
use crate::match_state::Match;
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

/// Matches exactly like its captured pattern and records the traversed span
/// under its own [`TokenId`].
///
/// Inside a repetition a token records once per iteration, in iteration
/// order. Cloning a token keeps its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<P> {
    id: TokenId,
    pattern: P,
}

impl<P> Token<P> {
    /// Wrap `pattern` under a fresh identity.
    pub fn new(pattern: P) -> Self {
        Self {
            id: TokenId::fresh(),
            pattern,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The sole structural child.
    pub fn captured_pattern(&self) -> &P {
        &self.pattern
    }
}

impl<S, P> Pattern<S> for Token<P>
where
    S: Subject + ?Sized,
    P: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        let start = base.position();
        let id = self.id;
        Box::new(
            self.pattern
                .forward_matches(base)
                .map(move |m| m.capturing(start..m.position(), id)),
        )
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        let end = base.position();
        let id = self.id;
        Box::new(
            self.pattern
                .backward_matches(base)
                .map(move |m| m.capturing(m.position()..end, id)),
        )
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.pattern.smallest_forward_start(subject, from)
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.pattern.largest_backward_start(subject, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{Multiplicity, Repetition};
    use crate::leaf::{AnyElement, Literal};

    #[test]
    fn records_the_forward_span() {
        let token = Token::new(Literal::from_str("bc"));
        let matched: Vec<_> = token.forward_matches(Match::new("abcd", 1)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].position(), 3);
        assert_eq!(matched[0].captures(token.id()), vec![1..3]);
        assert_eq!(matched[0].first_captured_slice(token.id()), Some("bc"));
    }

    #[test]
    fn records_the_backward_span() {
        let token = Token::new(Literal::from_str("bc"));
        let matched: Vec<_> = token.backward_matches(Match::new("abcd", 3)).collect();
        assert_eq!(matched[0].position(), 1);
        assert_eq!(matched[0].captures(token.id()), vec![1..3]);
    }

    #[test]
    fn accumulates_once_per_iteration() {
        let token = Token::new(AnyElement);
        let id = token.id();
        let repeated = Repetition::eager(token, Multiplicity::one_or_more());
        let first = repeated.forward_matches(Match::at_start("xyz")).next().unwrap();
        assert_eq!(first.captures(id), vec![0..1, 1..2, 2..3]);
        assert_eq!(first.first_capture(id), Some(0..1));
        assert_eq!(first.captured_slices(id), vec!["x", "y", "z"]);
    }

    #[test]
    fn identities_are_distinct_but_survive_cloning() {
        let a = Token::new(AnyElement);
        let b = Token::new(AnyElement);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
        assert_eq!(a.captured_pattern(), &AnyElement);
    }
}
