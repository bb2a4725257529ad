//! Zero-width lookaround.

use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

/// Whether an assertion succeeds when its probe matches or when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Affirmative,
    Negated,
}

/// Succeeds, without moving, iff `pattern` can (or, negated, cannot) match
/// from the current position in the assertion's own direction.
///
/// The probe runs with the outer captures visible, but whatever it records is
/// discarded: a successful assertion yields its base unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion<P> {
    pattern: P,
    direction: Direction,
    polarity: Polarity,
}

impl<P> Assertion<P> {
    pub fn new(pattern: P, direction: Direction, polarity: Polarity) -> Self {
        Self {
            pattern,
            direction,
            polarity,
        }
    }

    pub fn lookahead(pattern: P) -> Self {
        Self::new(pattern, Direction::Forward, Polarity::Affirmative)
    }

    pub fn negative_lookahead(pattern: P) -> Self {
        Self::new(pattern, Direction::Forward, Polarity::Negated)
    }

    pub fn lookbehind(pattern: P) -> Self {
        Self::new(pattern, Direction::Backward, Polarity::Affirmative)
    }

    pub fn negative_lookbehind(pattern: P) -> Self {
        Self::new(pattern, Direction::Backward, Polarity::Negated)
    }

    pub fn asserted_pattern(&self) -> &P {
        &self.pattern
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    fn gate<'a, S>(&'a self, base: Match<'a, S>) -> Matches<'a, S>
    where
        S: Subject + ?Sized,
        P: Pattern<S>,
    {
        Box::new(std::iter::once(base).filter(move |b| {
            let found = self.pattern.matches(b.clone(), self.direction).next().is_some();
            found == (self.polarity == Polarity::Affirmative)
        }))
    }

    fn is_affirmative_in(&self, direction: Direction) -> bool {
        self.polarity == Polarity::Affirmative && self.direction == direction
    }
}

impl<S, P> Pattern<S> for Assertion<P>
where
    S: Subject + ?Sized,
    P: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.gate(base)
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.gate(base)
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        if self.is_affirmative_in(Direction::Forward) {
            self.pattern.smallest_forward_start(subject, from)
        } else {
            from
        }
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        if self.is_affirmative_in(Direction::Backward) {
            self.pattern.largest_backward_start(subject, from)
        } else {
            from
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{Concatenation, Token};
    use crate::leaf::Literal;

    fn results<'a, P: Pattern<str>>(pattern: &'a P, base: Match<'a, str>) -> Vec<Match<'a, str>> {
        pattern.forward_matches(base).collect()
    }

    #[test]
    fn lookahead_does_not_advance() {
        let ahead = Assertion::lookahead(Literal::from_str("bc"));
        let base = Match::new("abc", 1);
        assert_eq!(results(&ahead, base.clone()), vec![base]);
        assert!(results(&ahead, Match::new("abc", 0)).is_empty());
    }

    #[test]
    fn negative_lookahead_is_the_dual() {
        let not_ahead = Assertion::negative_lookahead(Literal::from_str("bc"));
        assert!(results(&not_ahead, Match::new("abc", 1)).is_empty());
        let base = Match::new("abc", 0);
        assert_eq!(results(&not_ahead, base.clone()), vec![base]);
    }

    #[test]
    fn lookbehind_probes_preceding_elements() {
        let behind = Assertion::lookbehind(Literal::from_str("ab"));
        let base = Match::new("abc", 2);
        assert_eq!(results(&behind, base.clone()), vec![base.clone()]);
        assert!(results(&behind, Match::new("abc", 1)).is_empty());
        // The assertion's direction is its own, whatever the outer scan does.
        assert_eq!(behind.backward_matches(base.clone()).collect::<Vec<_>>(), vec![base]);
        let not_behind = Assertion::negative_lookbehind(Literal::from_str("ab"));
        assert_eq!(results(&not_behind, Match::new("abc", 1)).len(), 1);
    }

    #[test]
    fn probe_captures_are_discarded() {
        let token = Token::new(Literal::from_str("b"));
        let id = token.id();
        let ahead = Assertion::lookahead(token);
        let matched = results(&ahead, Match::new("ab", 1));
        assert_eq!(matched.len(), 1);
        assert!(matched[0].captures(id).is_empty());
    }

    #[test]
    fn gates_a_concatenation() {
        // a(?=b) over "ab" and "ac"
        let gated = Concatenation::new(
            Literal::from_str("a"),
            Assertion::lookahead(Literal::from_str("b")),
        );
        assert_eq!(results(&gated, Match::at_start("ab")).len(), 1);
        assert_eq!(results(&gated, Match::at_start("ab"))[0].position(), 1);
        assert!(results(&gated, Match::at_start("ac")).is_empty());
    }

    #[test]
    fn only_affirmative_probes_tighten_hints() {
        let ahead = Assertion::lookahead(Literal::from_str("x"));
        assert_eq!(ahead.smallest_forward_start("abx", 0), 2);
        let not_ahead = Assertion::negative_lookahead(Literal::from_str("x"));
        assert_eq!(not_ahead.smallest_forward_start("abx", 0), 0);
        let behind = Assertion::lookbehind(Literal::from_str("x"));
        assert_eq!(behind.smallest_forward_start("abx", 0), 0);
        assert_eq!(behind.largest_backward_start("xab", 3), 1);
    }
}
