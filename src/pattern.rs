//! The [`Pattern`] capability and the lazy collections it produces.

use std::rc::Rc;
use std::sync::Arc;

use crate::match_state::{Direction, Match};
use crate::subject::Subject;

/// Lazy, priority-ordered stream of matches.
///
/// The first item is what a non-backtracking consumer takes; later items are
/// the alternatives tried when something after this pattern fails.
pub type Matches<'a, S> = Box<dyn Iterator<Item = Match<'a, S>> + 'a>;

/// A heterogeneous pattern node.
pub type BoxedPattern<'p, S> = Box<dyn Pattern<S> + 'p>;

/// Something that can extend (forward) or retract (backward) a [`Match`].
///
/// Implementations must be deterministic: calling either method twice with
/// equal bases yields equal sequences. Combinators rely on this to re-derive
/// sub-results while backtracking. No work may happen until the returned
/// iterator is pulled.
pub trait Pattern<S: Subject + ?Sized> {
    /// Every way this pattern can match starting at `base` and moving forward.
    /// Each result is at or after `base` and carries at least `base`'s captures.
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S>;

    /// Mirror of [`forward_matches`](Self::forward_matches): the match ends at
    /// `base` and each result is at or before it.
    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S>;

    fn matches<'a>(&'a self, base: Match<'a, S>, direction: Direction) -> Matches<'a, S> {
        match direction {
            Direction::Forward => self.forward_matches(base),
            Direction::Backward => self.backward_matches(base),
        }
    }

    /// A position `p >= from` such that no forward match can begin in
    /// `from..p`. Returning `from` is always sound.
    fn smallest_forward_start(&self, _subject: &S, from: S::Position) -> S::Position {
        from
    }

    /// A position `p <= from` such that no backward match can begin in
    /// `p+1..=from`. Returning `from` is always sound.
    fn largest_backward_start(&self, _subject: &S, from: S::Position) -> S::Position {
        from
    }
}

macro_rules! forward_pattern_impl {
    ($($ptr:ty),*) => {$(
        impl<S: Subject + ?Sized, P: Pattern<S> + ?Sized> Pattern<S> for $ptr {
            fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
                (**self).forward_matches(base)
            }

            fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
                (**self).backward_matches(base)
            }

            fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
                (**self).smallest_forward_start(subject, from)
            }

            fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
                (**self).largest_backward_start(subject, from)
            }
        }
    )*};
}

forward_pattern_impl!(&P, Box<P>, Rc<P>, Arc<P>);

/// Re-traversable view of the matches of one pattern from one base.
///
/// Holding a collection costs nothing; every [`iter`](Self::iter) call
/// derives the sequence afresh and always produces the same items.
pub struct MatchCollection<'a, S: Subject + ?Sized, P: Pattern<S> + ?Sized> {
    pattern: &'a P,
    base: Match<'a, S>,
    direction: Direction,
}

impl<'a, S: Subject + ?Sized, P: Pattern<S> + ?Sized> MatchCollection<'a, S, P> {
    pub fn new(pattern: &'a P, base: Match<'a, S>, direction: Direction) -> Self {
        Self {
            pattern,
            base,
            direction,
        }
    }

    pub fn forward(pattern: &'a P, base: Match<'a, S>) -> Self {
        Self::new(pattern, base, Direction::Forward)
    }

    pub fn backward(pattern: &'a P, base: Match<'a, S>) -> Self {
        Self::new(pattern, base, Direction::Backward)
    }

    pub fn iter(&self) -> Matches<'a, S> {
        self.pattern.matches(self.base.clone(), self.direction)
    }

    pub fn first(&self) -> Option<Match<'a, S>> {
        self.iter().next()
    }

    pub fn has_matches(&self) -> bool {
        self.first().is_some()
    }

    /// The `index`-th alternative, deriving everything before it.
    pub fn get(&self, index: usize) -> Option<Match<'a, S>> {
        self.iter().nth(index)
    }

    /// Exhausts the sequence; never returns for infinite collections.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn base(&self) -> &Match<'a, S> {
        &self.base
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<'a, S: Subject + ?Sized, P: Pattern<S> + ?Sized> IntoIterator for &MatchCollection<'a, S, P> {
    type Item = Match<'a, S>;
    type IntoIter = Matches<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Defers building an iterator until the first pull.
pub(crate) struct Deferred<F, I> {
    build: Option<F>,
    inner: Option<I>,
}

pub(crate) fn deferred<F, I>(build: F) -> Deferred<F, I>
where
    F: FnOnce() -> I,
    I: Iterator,
{
    Deferred {
        build: Some(build),
        inner: None,
    }
}

impl<F, I> Iterator for Deferred<F, I>
where
    F: FnOnce() -> I,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(build) = self.build.take() {
            self.inner = Some(build());
        }
        self.inner.as_mut()?.next()
    }
}
