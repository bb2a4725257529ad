//! Leaf patterns: the element tests every combinator tree bottoms out in.
//!
//! Each single-element leaf consumes exactly one element in the scan
//! direction and yields at most one match. The pruning hints scan for the
//! nearest element the leaf could accept.

pub mod back_reference;
pub mod char_class;

use std::ops::RangeInclusive;

use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

pub use back_reference::BackReference;
pub use char_class::{CharClass, CharClassKind};

// ─── Shared helpers ──────────────────────────────────────────────────────────

/// At most one result: `base` advanced over one accepted element.
pub(crate) fn single_step<'a, S, F>(base: Match<'a, S>, direction: Direction, accept: F) -> Matches<'a, S>
where
    S: Subject + ?Sized,
    F: Fn(&S::Element) -> bool + 'a,
{
    Box::new(std::iter::once(base).filter_map(move |b| b.step_if(direction, &accept)))
}

/// Consume `elements` in order (forward) or last-to-first (backward).
pub(crate) fn consume_sequence<'a, S>(
    base: &Match<'a, S>,
    elements: &[S::Element],
    direction: Direction,
) -> Option<Match<'a, S>>
where
    S: Subject + ?Sized,
{
    let mut current = base.clone();
    let mut step = |expected: &S::Element| -> Option<()> {
        current = current.step_if(direction, |e| e == expected)?;
        Some(())
    };
    match direction {
        Direction::Forward => elements.iter().try_for_each(&mut step)?,
        Direction::Backward => elements.iter().rev().try_for_each(&mut step)?,
    }
    Some(current)
}

/// First position at or after `from` whose following element is accepted,
/// or the subject end if there is none.
pub(crate) fn scan_forward<S, F>(subject: &S, from: S::Position, accept: F) -> S::Position
where
    S: Subject + ?Sized,
    F: Fn(&S::Element) -> bool,
{
    let mut position = from;
    while let Some(element) = subject.element_after(position) {
        if accept(&element) {
            return position;
        }
        match subject.position_after(position) {
            Some(next) => position = next,
            None => break,
        }
    }
    position
}

/// Last position at or before `from` whose preceding element is accepted,
/// or the subject start if there is none.
pub(crate) fn scan_backward<S, F>(subject: &S, from: S::Position, accept: F) -> S::Position
where
    S: Subject + ?Sized,
    F: Fn(&S::Element) -> bool,
{
    let mut position = from;
    while let Some(element) = subject.element_before(position) {
        if accept(&element) {
            return position;
        }
        match subject.position_before(position) {
            Some(previous) => position = previous,
            None => break,
        }
    }
    position
}

// ─── Literal ─────────────────────────────────────────────────────────────────

/// An exact run of elements. The empty literal matches zero elements anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal<T> {
    elements: Vec<T>,
}

impl<T> Literal<T> {
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}

impl Literal<char> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::new(text.chars())
    }
}

impl<S, T> Pattern<S> for Literal<T>
where
    S: Subject<Element = T> + ?Sized,
    T: Clone + PartialEq + std::fmt::Debug,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(
            std::iter::once(base)
                .filter_map(move |b| consume_sequence(&b, &self.elements, Direction::Forward)),
        )
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(
            std::iter::once(base)
                .filter_map(move |b| consume_sequence(&b, &self.elements, Direction::Backward)),
        )
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self.elements.first() {
            Some(first) => scan_forward(subject, from, |e| e == first),
            None => from,
        }
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self.elements.last() {
            Some(last) => scan_backward(subject, from, |e| e == last),
            None => from,
        }
    }
}

// ─── Single-element leaves ───────────────────────────────────────────────────

/// Any one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyElement;

impl<S: Subject + ?Sized> Pattern<S> for AnyElement {
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Forward, |_| true)
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Backward, |_| true)
    }
}

/// One element from an explicit list, or (negated) one element not in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSet<T> {
    members: Vec<T>,
    negated: bool,
}

impl<T: PartialEq> ElementSet<T> {
    pub fn new(members: impl IntoIterator<Item = T>) -> Self {
        Self {
            members: members.into_iter().collect(),
            negated: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn contains(&self, element: &T) -> bool {
        self.members.contains(element) != self.negated
    }
}

impl<S, T> Pattern<S> for ElementSet<T>
where
    S: Subject<Element = T> + ?Sized,
    T: Clone + PartialEq + std::fmt::Debug,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Forward, move |e| self.contains(e))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Backward, move |e| self.contains(e))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_forward(subject, from, |e| self.contains(e))
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_backward(subject, from, |e| self.contains(e))
    }
}

/// One element within an inclusive range, or (negated) outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRange<T> {
    range: RangeInclusive<T>,
    negated: bool,
}

impl<T: PartialOrd> ElementRange<T> {
    pub fn new(range: RangeInclusive<T>) -> Self {
        Self {
            range,
            negated: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn contains(&self, element: &T) -> bool {
        self.range.contains(element) != self.negated
    }
}

impl<S, T> Pattern<S> for ElementRange<T>
where
    S: Subject<Element = T> + ?Sized,
    T: Clone + PartialOrd + std::fmt::Debug,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Forward, move |e| self.contains(e))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Backward, move |e| self.contains(e))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_forward(subject, from, |e| self.contains(e))
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_backward(subject, from, |e| self.contains(e))
    }
}

/// One element accepted by an arbitrary test. This is the extension point
/// for element kinds the built-in leaves do not cover.
#[derive(Clone)]
pub struct Predicate<F> {
    accept: F,
}

impl<F> Predicate<F> {
    pub fn new(accept: F) -> Self {
        Self { accept }
    }
}

impl<F> std::fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate")
    }
}

impl<S, F> Pattern<S> for Predicate<F>
where
    S: Subject + ?Sized,
    F: Fn(&S::Element) -> bool,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Forward, move |e| (self.accept)(e))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Backward, move |e| (self.accept)(e))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_forward(subject, from, &self.accept)
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_backward(subject, from, &self.accept)
    }
}

// ─── Anchors ─────────────────────────────────────────────────────────────────

/// Zero-width test on the cursor's place in the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    SubjectStart,
    SubjectEnd,
}

impl Anchor {
    fn holds<S: Subject + ?Sized>(self, subject: &S, position: S::Position) -> bool {
        match self {
            Anchor::SubjectStart => position == subject.start_position(),
            Anchor::SubjectEnd => position == subject.end_position(),
        }
    }

    fn gate<'a, S: Subject + ?Sized>(self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(std::iter::once(base).filter(move |b| self.holds(b.subject(), b.position())))
    }
}

impl<S: Subject + ?Sized> Pattern<S> for Anchor {
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.gate(base)
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.gate(base)
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self {
            Anchor::SubjectStart if from > subject.start_position() => subject.end_position(),
            Anchor::SubjectStart => from,
            Anchor::SubjectEnd => subject.end_position().max(from),
        }
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        match self {
            Anchor::SubjectEnd if from < subject.end_position() => subject.start_position(),
            Anchor::SubjectEnd => from,
            Anchor::SubjectStart => subject.start_position().min(from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward<P: Pattern<str>>(pattern: &P, text: &str, at: usize) -> Vec<usize> {
        pattern
            .forward_matches(Match::new(text, at))
            .map(|m| m.position())
            .collect()
    }

    fn backward<P: Pattern<str>>(pattern: &P, text: &str, at: usize) -> Vec<usize> {
        pattern
            .backward_matches(Match::new(text, at))
            .map(|m| m.position())
            .collect()
    }

    #[test]
    fn literal_forward_and_backward() {
        let hello = Literal::from_str("llo");
        assert_eq!(forward(&hello, "hello", 2), vec![5]);
        assert_eq!(forward(&hello, "hello", 1), Vec::<usize>::new());
        assert_eq!(backward(&hello, "hello", 5), vec![2]);
        assert_eq!(backward(&hello, "hello", 4), Vec::<usize>::new());
    }

    #[test]
    fn empty_literal_is_zero_width() {
        let empty = Literal::from_str("");
        assert_eq!(forward(&empty, "abc", 1), vec![1]);
        assert_eq!(backward(&empty, "abc", 3), vec![3]);
    }

    #[test]
    fn literal_over_non_text_elements() {
        let items = [3, 1, 4, 1, 5];
        let subject: &[i32] = &items;
        let pattern = Literal::new([1, 5]);
        let ends: Vec<_> = pattern
            .forward_matches(Match::new(subject, 3))
            .map(|m| m.position())
            .collect();
        assert_eq!(ends, vec![5]);
        assert_eq!(pattern.smallest_forward_start(subject, 0), 1);
        assert_eq!(pattern.largest_backward_start(subject, 4), 0);
        assert_eq!(pattern.largest_backward_start(subject, 5), 5);
    }

    #[test]
    fn any_element_stops_at_edges() {
        assert_eq!(forward(&AnyElement, "ab", 1), vec![2]);
        assert_eq!(forward(&AnyElement, "ab", 2), Vec::<usize>::new());
        assert_eq!(backward(&AnyElement, "ab", 0), Vec::<usize>::new());
    }

    #[test]
    fn set_and_negated_set() {
        let vowels = ElementSet::new(['a', 'e', 'i', 'o', 'u']);
        assert_eq!(forward(&vowels, "ax", 0), vec![1]);
        assert_eq!(forward(&vowels, "ax", 1), Vec::<usize>::new());
        let consonants = vowels.clone().negated();
        assert_eq!(forward(&consonants, "ax", 1), vec![2]);
        assert_eq!(vowels.smallest_forward_start("xyzo", 0), 3);
    }

    #[test]
    fn range_and_negated_range() {
        let digits = ElementRange::new('0'..='9');
        assert_eq!(forward(&digits, "a7", 1), vec![2]);
        assert_eq!(backward(&digits.clone().negated(), "a7", 1), vec![0]);
        assert_eq!(digits.smallest_forward_start("abc", 0), 3);
        assert_eq!(digits.largest_backward_start("1bc", 3), 1);
    }

    #[test]
    fn predicate_is_an_extension_point() {
        let even = Predicate::new(|n: &u8| n % 2 == 0);
        let items = [1u8, 3, 4];
        let subject: &[u8] = &items;
        assert_eq!(even.smallest_forward_start(subject, 0), 2);
        assert_eq!(
            even.forward_matches(Match::new(subject, 2)).count(),
            1
        );
    }

    #[test]
    fn anchors_are_zero_width() {
        assert_eq!(forward(&Anchor::SubjectStart, "ab", 0), vec![0]);
        assert_eq!(forward(&Anchor::SubjectStart, "ab", 1), Vec::<usize>::new());
        assert_eq!(backward(&Anchor::SubjectEnd, "ab", 2), vec![2]);
        assert_eq!(Anchor::SubjectStart.smallest_forward_start("ab", 1), 2);
        assert_eq!(Anchor::SubjectEnd.smallest_forward_start("ab", 0), 2);
    }
}
