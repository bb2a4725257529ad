//! Subjects: read-only sequences with a cursor that moves one element at a time.
//!
//! The engine never indexes a subject directly. Everything it needs is
//! expressed through [`Subject`], so slices, strings and ropes can all be
//! matched by the same pattern trees.

use std::fmt::Debug;
use std::ops::Range;

use ropey::{Rope, RopeSlice};

/// An ordered sequence that can be traversed in both directions.
///
/// Positions sit *between* elements: `element_after(p)` is the element that
/// a forward step from `p` consumes, `element_before(p)` the one a backward
/// step consumes.
pub trait Subject {
    type Element: Clone + PartialEq + Debug;
    type Position: Copy + Ord + Debug;
    type Slice<'a>
    where
        Self: 'a;

    /// Position before the first element.
    fn start_position(&self) -> Self::Position;

    /// Position after the last element.
    fn end_position(&self) -> Self::Position;

    /// One element forward, or `None` at the end.
    fn position_after(&self, position: Self::Position) -> Option<Self::Position>;

    /// One element backward, or `None` at the start.
    fn position_before(&self, position: Self::Position) -> Option<Self::Position>;

    fn element_after(&self, position: Self::Position) -> Option<Self::Element>;

    fn element_before(&self, position: Self::Position) -> Option<Self::Element>;

    /// Borrow the half-open range `range` as a sub-sequence.
    fn slice(&self, range: Range<Self::Position>) -> Self::Slice<'_>;

    /// Collect the elements of `range` by walking it.
    fn elements(&self, range: Range<Self::Position>) -> Vec<Self::Element> {
        let mut elements = Vec::new();
        let mut position = range.start;
        while position < range.end {
            let Some(element) = self.element_after(position) else {
                break;
            };
            elements.push(element);
            match self.position_after(position) {
                Some(next) => position = next,
                None => break,
            }
        }
        elements
    }
}

impl<T: Clone + PartialEq + Debug> Subject for [T] {
    type Element = T;
    type Position = usize;
    type Slice<'a>
        = &'a [T]
    where
        Self: 'a;

    fn start_position(&self) -> usize {
        0
    }

    fn end_position(&self) -> usize {
        self.len()
    }

    fn position_after(&self, position: usize) -> Option<usize> {
        (position < self.len()).then_some(position + 1)
    }

    fn position_before(&self, position: usize) -> Option<usize> {
        position.checked_sub(1)
    }

    fn element_after(&self, position: usize) -> Option<T> {
        self.get(position).cloned()
    }

    fn element_before(&self, position: usize) -> Option<T> {
        self.get(position.checked_sub(1)?).cloned()
    }

    fn slice(&self, range: Range<usize>) -> &[T] {
        &self[range]
    }
}

/// Positions are byte offsets that always fall on `char` boundaries.
impl Subject for str {
    type Element = char;
    type Position = usize;
    type Slice<'a>
        = &'a str
    where
        Self: 'a;

    fn start_position(&self) -> usize {
        0
    }

    fn end_position(&self) -> usize {
        self.len()
    }

    fn position_after(&self, position: usize) -> Option<usize> {
        let ch = self.element_after(position)?;
        Some(position + ch.len_utf8())
    }

    fn position_before(&self, position: usize) -> Option<usize> {
        let ch = self.element_before(position)?;
        Some(position - ch.len_utf8())
    }

    fn element_after(&self, position: usize) -> Option<char> {
        self.get(position..)?.chars().next()
    }

    fn element_before(&self, position: usize) -> Option<char> {
        self.get(..position)?.chars().next_back()
    }

    fn slice(&self, range: Range<usize>) -> &str {
        &self[range]
    }
}

/// Positions are char indices, as everywhere else in ropey.
impl Subject for Rope {
    type Element = char;
    type Position = usize;
    type Slice<'a>
        = RopeSlice<'a>
    where
        Self: 'a;

    fn start_position(&self) -> usize {
        0
    }

    fn end_position(&self) -> usize {
        self.len_chars()
    }

    fn position_after(&self, position: usize) -> Option<usize> {
        (position < self.len_chars()).then_some(position + 1)
    }

    fn position_before(&self, position: usize) -> Option<usize> {
        if position == 0 || position > self.len_chars() {
            None
        } else {
            Some(position - 1)
        }
    }

    fn element_after(&self, position: usize) -> Option<char> {
        self.get_char(position)
    }

    fn element_before(&self, position: usize) -> Option<char> {
        self.get_char(position.checked_sub(1)?)
    }

    fn slice(&self, range: Range<usize>) -> RopeSlice<'_> {
        Rope::slice(self, range)
    }
}
