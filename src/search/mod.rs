//! Search driver: anchored matching and unanchored scans over a subject.
//!
//! Anchoring policy:
//! - [`match_at`] is anchored at one position and lets the match end anywhere.
//! - [`full_matches`] / [`is_full_match`] must consume the whole subject.
//! - [`find_forward`], [`find_backward`], [`find_iter`] and
//!   [`find_iter_backward`] try successive start positions and take the
//!   first-priority match at the first start that has one.
//!
//! Unanchored scans use the pattern's pruning hints to skip start positions
//! at which no match can begin.

use log::{debug, trace};

use crate::match_state::{Direction, Match};
use crate::pattern::{MatchCollection, Pattern};
use crate::subject::Subject;


/// The result of a successful search.
pub struct Found<'a, S: Subject + ?Sized> {
    /// Position of the first matched element.
    pub start: S::Position,
    /// Position after the last matched element.
    pub end: S::Position,
    /// The final match state, with captures.
    pub matched: Match<'a, S>,
}

impl<'a, S: Subject + ?Sized> Found<'a, S> {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn span(&self) -> std::ops::Range<S::Position> {
        self.start..self.end
    }

    pub fn as_slice(&self) -> S::Slice<'a> {
        self.matched.subject().slice(self.span())
    }
}

impl<S: Subject + ?Sized> Clone for Found<'_, S> {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            matched: self.matched.clone(),
        }
    }
}

impl<S: Subject + ?Sized> std::fmt::Debug for Found<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Found")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("matched", &self.matched)
            .finish()
    }
}

// ─── Anchored matching ──────────────────────────────────────────────────────

/// Every forward match beginning exactly at `position`.
pub fn match_at<'a, S, P>(
    pattern: &'a P,
    subject: &'a S,
    position: S::Position,
) -> MatchCollection<'a, S, P>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    MatchCollection::forward(pattern, Match::new(subject, position))
}

/// Forward matches from the subject start that end exactly at its end.
pub fn full_matches<'a, S, P>(
    pattern: &'a P,
    subject: &'a S,
) -> impl Iterator<Item = Match<'a, S>> + 'a
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    let end = subject.end_position();
    pattern
        .forward_matches(Match::at_start(subject))
        .filter(move |m| m.position() == end)
}

pub fn is_full_match<S, P>(pattern: &P, subject: &S) -> bool
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    full_matches(pattern, subject).next().is_some()
}

// ─── Unanchored search ──────────────────────────────────────────────────────

/// Find the leftmost match starting at or after `from`.
pub fn find_forward<'a, S, P>(pattern: &'a P, subject: &'a S, from: S::Position) -> Option<Found<'a, S>>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    let mut start = from;
    loop {
        let hinted = pattern.smallest_forward_start(subject, start).max(start);
        if hinted != start {
            trace!("pruned forward starts {start:?}..{hinted:?}");
            start = hinted;
        }
        if let Some(matched) = pattern.forward_matches(Match::new(subject, start)).next() {
            debug!("forward match {start:?}..{:?}", matched.position());
            return Some(Found {
                start,
                end: matched.position(),
                matched,
            });
        }
        start = subject.position_after(start)?;
    }
}

/// Find the rightmost match ending at or before `from`, scanning backward.
pub fn find_backward<'a, S, P>(pattern: &'a P, subject: &'a S, from: S::Position) -> Option<Found<'a, S>>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    let mut end = from;
    loop {
        let hinted = pattern.largest_backward_start(subject, end).min(end);
        if hinted != end {
            trace!("pruned backward starts {hinted:?}..{end:?}");
            end = hinted;
        }
        if let Some(matched) = pattern.backward_matches(Match::new(subject, end)).next() {
            debug!("backward match {:?}..{end:?}", matched.position());
            return Some(Found {
                start: matched.position(),
                end,
                matched,
            });
        }
        end = subject.position_before(end)?;
    }
}

/// Whether the pattern matches anywhere in the subject.
pub fn is_match<S, P>(pattern: &P, subject: &S) -> bool
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    find_forward(pattern, subject, subject.start_position()).is_some()
}

/// Successive non-overlapping matches from the subject start.
pub fn find_iter<'a, S, P>(pattern: &'a P, subject: &'a S) -> FindIter<'a, S, P>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    FindIter {
        pattern,
        subject,
        direction: Direction::Forward,
        next_from: Some(subject.start_position()),
    }
}

/// Successive non-overlapping matches from the subject end, scanning backward.
pub fn find_iter_backward<'a, S, P>(pattern: &'a P, subject: &'a S) -> FindIter<'a, S, P>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    FindIter {
        pattern,
        subject,
        direction: Direction::Backward,
        next_from: Some(subject.end_position()),
    }
}

/// Iterator returned by [`find_iter`] and [`find_iter_backward`].
///
/// After an empty match the scan resumes one element further on, so every
/// position yields at most one empty match.
pub struct FindIter<'a, S: Subject + ?Sized, P: ?Sized> {
    pattern: &'a P,
    subject: &'a S,
    direction: Direction,
    next_from: Option<S::Position>,
}

impl<'a, S, P> Iterator for FindIter<'a, S, P>
where
    S: Subject + ?Sized,
    P: Pattern<S> + ?Sized,
{
    type Item = Found<'a, S>;

    fn next(&mut self) -> Option<Found<'a, S>> {
        let from = self.next_from.take()?;
        let found = match self.direction {
            Direction::Forward => find_forward(self.pattern, self.subject, from)?,
            Direction::Backward => find_backward(self.pattern, self.subject, from)?,
        };
        self.next_from = match (self.direction, found.is_empty()) {
            (Direction::Forward, false) => Some(found.end),
            (Direction::Forward, true) => self.subject.position_after(found.end),
            (Direction::Backward, false) => Some(found.start),
            (Direction::Backward, true) => self.subject.position_before(found.start),
        };
        Some(found)
    }
}
