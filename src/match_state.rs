//! The [`Match`] value threaded through every combinator.

use std::fmt;
use std::ops::Range;

use crate::captures::{CaptureList, TokenId};
use crate::subject::Subject;

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Snapshot of a matching attempt: the subject, a cursor and the captures
/// recorded on the way to this cursor.
///
/// A `Match` is immutable. [`moving_position`](Self::moving_position) and
/// [`capturing`](Self::capturing) return new values; cloning is cheap because
/// the capture list is shared.
pub struct Match<'a, S: Subject + ?Sized> {
    subject: &'a S,
    position: S::Position,
    captures: CaptureList<S::Position>,
}

impl<'a, S: Subject + ?Sized> Match<'a, S> {
    /// A match with no captures at `position`.
    pub fn new(subject: &'a S, position: S::Position) -> Self {
        Self {
            subject,
            position,
            captures: CaptureList::default(),
        }
    }

    pub fn at_start(subject: &'a S) -> Self {
        Self::new(subject, subject.start_position())
    }

    pub fn at_end(subject: &'a S) -> Self {
        Self::new(subject, subject.end_position())
    }

    pub fn subject(&self) -> &'a S {
        self.subject
    }

    pub fn position(&self) -> S::Position {
        self.position
    }

    /// Same captures, cursor moved `by` elements in `direction`.
    ///
    /// Returns `None` if that would step past either end of the subject.
    pub fn moving_position(&self, by: usize, direction: Direction) -> Option<Self> {
        let mut position = self.position;
        for _ in 0..by {
            position = match direction {
                Direction::Forward => self.subject.position_after(position)?,
                Direction::Backward => self.subject.position_before(position)?,
            };
        }
        Some(Self {
            subject: self.subject,
            position,
            captures: self.captures.clone(),
        })
    }

    /// Same cursor, with `span` appended to the captures of `token`.
    pub fn capturing(&self, span: Range<S::Position>, token: TokenId) -> Self {
        Self {
            subject: self.subject,
            position: self.position,
            captures: self.captures.with(token, span),
        }
    }

    /// The element the next step in `direction` would consume.
    pub fn adjacent_element(&self, direction: Direction) -> Option<S::Element> {
        match direction {
            Direction::Forward => self.subject.element_after(self.position),
            Direction::Backward => self.subject.element_before(self.position),
        }
    }

    /// Consume one element in `direction` if `accept` allows it.
    pub(crate) fn step_if(
        &self,
        direction: Direction,
        accept: impl FnOnce(&S::Element) -> bool,
    ) -> Option<Self> {
        let element = self.adjacent_element(direction)?;
        if accept(&element) {
            self.moving_position(1, direction)
        } else {
            None
        }
    }

    /// Every span recorded for `token`, oldest first.
    pub fn captures(&self, token: TokenId) -> Vec<Range<S::Position>> {
        self.captures.spans(token)
    }

    /// The first span recorded for `token`.
    ///
    /// A token inside a repetition records once per iteration; use
    /// [`captures`](Self::captures) to see all of them.
    pub fn first_capture(&self, token: TokenId) -> Option<Range<S::Position>> {
        self.captures.first(token)
    }

    /// The most recently recorded span for `token`.
    pub fn last_capture(&self, token: TokenId) -> Option<Range<S::Position>> {
        self.captures.last(token)
    }

    pub fn captured_slices(&self, token: TokenId) -> Vec<S::Slice<'a>> {
        let subject = self.subject;
        self.captures(token)
            .into_iter()
            .map(|span| subject.slice(span))
            .collect()
    }

    pub fn first_captured_slice(&self, token: TokenId) -> Option<S::Slice<'a>> {
        let subject = self.subject;
        self.first_capture(token).map(|span| subject.slice(span))
    }

    /// All `(token, span)` records in recording order.
    pub fn all_captures(&self) -> Vec<(TokenId, Range<S::Position>)> {
        self.captures.all()
    }

    pub fn has_captures(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl<S: Subject + ?Sized> Clone for Match<'_, S> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject,
            position: self.position,
            captures: self.captures.clone(),
        }
    }
}

impl<S: Subject + ?Sized> PartialEq for Match<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.subject, other.subject)
            && self.position == other.position
            && self.captures == other.captures
    }
}

impl<S: Subject + ?Sized> fmt::Debug for Match<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("position", &self.position)
            .field("captures", &self.captures)
            .finish()
    }
}
