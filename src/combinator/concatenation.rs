//! Sequential composition with backtracking.
//!
//! The last sub-pattern is the innermost loop: every continuation of the
//! current prefix is tried before an earlier sub-pattern moves on to its next
//! alternative. Backward matching mirrors this with the first sub-pattern
//! innermost.

use log::debug;

use crate::error::PatternError;
use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

/// `first` followed by `second`.
#[derive(Debug, Clone, PartialEq)]
pub struct Concatenation<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concatenation<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<S, A, B> Pattern<S> for Concatenation<A, B>
where
    S: Subject + ?Sized,
    A: Pattern<S>,
    B: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(
            self.first
                .forward_matches(base)
                .flat_map(move |m| self.second.forward_matches(m)),
        )
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(
            self.second
                .backward_matches(base)
                .flat_map(move |m| self.first.backward_matches(m)),
        )
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.first.smallest_forward_start(subject, from)
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        self.second.largest_backward_start(subject, from)
    }
}

/// Two or more sub-patterns of one type, matched in order.
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousConcatenation<P> {
    patterns: Vec<P>,
}

impl<P> HomogeneousConcatenation<P> {
    /// Fails with [`PatternError::InvalidArity`] for fewer than two patterns.
    pub fn new(patterns: Vec<P>) -> Result<Self, PatternError> {
        if patterns.len() < 2 {
            debug!("rejecting concatenation of {} sub-patterns", patterns.len());
            return Err(PatternError::InvalidArity {
                found: patterns.len(),
            });
        }
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[P] {
        &self.patterns
    }
}

impl<S, P> Pattern<S> for HomogeneousConcatenation<P>
where
    S: Subject + ?Sized,
    P: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(SequenceMatches::new(&self.patterns, base, Direction::Forward))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(SequenceMatches::new(&self.patterns, base, Direction::Backward))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self.patterns.first() {
            Some(first) => first.smallest_forward_start(subject, from),
            None => from,
        }
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self.patterns.last() {
            Some(last) => last.largest_backward_start(subject, from),
            None => from,
        }
    }
}

/// Depth-first walk over the sub-pattern results.
///
/// `stack[i]` enumerates the matches of the `i`-th pattern in scan order,
/// entered from the match currently produced one level up. Memory is bounded
/// by the number of sub-patterns.
struct SequenceMatches<'a, S: Subject + ?Sized, P> {
    patterns: &'a [P],
    direction: Direction,
    base: Option<Match<'a, S>>,
    stack: Vec<Matches<'a, S>>,
}

impl<'a, S: Subject + ?Sized, P: Pattern<S>> SequenceMatches<'a, S, P> {
    fn new(patterns: &'a [P], base: Match<'a, S>, direction: Direction) -> Self {
        Self {
            patterns,
            direction,
            base: Some(base),
            stack: Vec::with_capacity(patterns.len()),
        }
    }

    fn pattern_at(&self, depth: usize) -> &'a P {
        let patterns = self.patterns;
        match self.direction {
            Direction::Forward => &patterns[depth],
            Direction::Backward => &patterns[patterns.len() - 1 - depth],
        }
    }
}

impl<'a, S: Subject + ?Sized, P: Pattern<S>> Iterator for SequenceMatches<'a, S, P> {
    type Item = Match<'a, S>;

    fn next(&mut self) -> Option<Match<'a, S>> {
        if let Some(base) = self.base.take() {
            if self.patterns.is_empty() {
                return Some(base);
            }
            let entry = self.pattern_at(0).matches(base, self.direction);
            self.stack.push(entry);
        }
        loop {
            let depth = self.stack.len();
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(m) if depth == self.patterns.len() => return Some(m),
                Some(m) => {
                    let inner = self.pattern_at(depth).matches(m, self.direction);
                    self.stack.push(inner);
                }
            }
        }
    }
}
