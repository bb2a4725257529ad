//! Ordered choice.

use crate::match_state::Match;
use crate::pattern::{Matches, Pattern, deferred};
use crate::subject::Subject;

/// Every match of `main`, then every match of `alternative`, both from the
/// same base. Duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternation<A, B> {
    main: A,
    alternative: B,
}

impl<A, B> Alternation<A, B> {
    pub fn new(main: A, alternative: B) -> Self {
        Self { main, alternative }
    }

    pub fn main(&self) -> &A {
        &self.main
    }

    pub fn alternative(&self) -> &B {
        &self.alternative
    }
}

impl<S, A, B> Pattern<S> for Alternation<A, B>
where
    S: Subject + ?Sized,
    A: Pattern<S>,
    B: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        let retry = base.clone();
        Box::new(
            self.main
                .forward_matches(base)
                .chain(deferred(move || self.alternative.forward_matches(retry))),
        )
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        let retry = base.clone();
        Box::new(
            self.main
                .backward_matches(base)
                .chain(deferred(move || self.alternative.backward_matches(retry))),
        )
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.main
            .smallest_forward_start(subject, from)
            .min(self.alternative.smallest_forward_start(subject, from))
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.main
            .largest_backward_start(subject, from)
            .max(self.alternative.largest_backward_start(subject, from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{AnyElement, Literal};
    use crate::match_state::Direction;

    fn ends<P: Pattern<str>>(pattern: &P, text: &str, at: usize, direction: Direction) -> Vec<usize> {
        pattern
            .matches(Match::new(text, at), direction)
            .map(|m| m.position())
            .collect()
    }

    #[test]
    fn main_results_come_first() {
        let choice = Alternation::new(Literal::from_str("a"), Literal::from_str("ab"));
        assert_eq!(ends(&choice, "abc", 0, Direction::Forward), vec![1, 2]);
        let swapped = Alternation::new(Literal::from_str("ab"), Literal::from_str("a"));
        assert_eq!(ends(&swapped, "abc", 0, Direction::Forward), vec![2, 1]);
    }

    #[test]
    fn identical_results_are_not_deduplicated() {
        let choice = Alternation::new(Literal::from_str("a"), AnyElement);
        assert_eq!(ends(&choice, "a", 0, Direction::Forward), vec![1, 1]);
        assert_eq!(ends(&choice, "a", 1, Direction::Backward), vec![0, 0]);
    }

    #[test]
    fn either_branch_may_fail() {
        let choice = Alternation::new(Literal::from_str("x"), Literal::from_str("b"));
        assert_eq!(ends(&choice, "b", 0, Direction::Forward), vec![1]);
        assert_eq!(ends(&choice, "c", 0, Direction::Forward), Vec::<usize>::new());
    }

    #[test]
    fn hints_take_the_loosest_branch() {
        let choice = Alternation::new(Literal::from_str("x"), Literal::from_str("b"));
        assert_eq!(choice.smallest_forward_start("aabx", 0), 2);
        assert_eq!(choice.largest_backward_start("xbaa", 4), 2);
    }
}
