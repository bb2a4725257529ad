//! Named character classes for `char` subjects.

use log::debug;
use phf::{Map, phf_map};

use crate::error::PatternError;
use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

use super::{scan_backward, scan_forward, single_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClassKind {
    Alpha,     // alphabetic
    Upper,     // uppercase
    Lower,     // lowercase
    Digit,     // ASCII digit
    Alnum,     // alphabetic or numeric
    Word,      // alphanumeric or '_'
    Space,     // whitespace
    Punct,     // ASCII punctuation
    Printable, // 0x20..0x7E
    Control,   // control characters
}

/// Lookup table for [`CharClass::named`]. Keep names sorted.
const NAME_TO_KIND_MAP: Map<&'static str, CharClassKind> = phf_map! {
    "alnum" => CharClassKind::Alnum,
    "alpha" => CharClassKind::Alpha,
    "cntrl" => CharClassKind::Control,
    "digit" => CharClassKind::Digit,
    "lower" => CharClassKind::Lower,
    "print" => CharClassKind::Printable,
    "punct" => CharClassKind::Punct,
    "space" => CharClassKind::Space,
    "upper" => CharClassKind::Upper,
    "word" => CharClassKind::Word,
};

/// One character belonging to (or, negated, outside) a named class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass {
    kind: CharClassKind,
    negated: bool,
}

impl CharClass {
    pub fn new(kind: CharClassKind) -> Self {
        Self {
            kind,
            negated: false,
        }
    }

    /// Look a class up by its lowercase name (`"digit"`, `"space"`, ...).
    pub fn named(name: &str) -> Result<Self, PatternError> {
        match NAME_TO_KIND_MAP.get(name.to_ascii_lowercase().as_str()) {
            Some(kind) => Ok(Self::new(*kind)),
            None => {
                debug!("rejecting unknown character class {name:?}");
                Err(PatternError::UnknownCharClass(name.to_string()))
            }
        }
    }

    /// All names accepted by [`named`](Self::named), sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = NAME_TO_KIND_MAP.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn kind(&self) -> CharClassKind {
        self.kind
    }

    pub fn contains(&self, ch: char) -> bool {
        kind_matches(self.kind, ch) != self.negated
    }
}

fn kind_matches(kind: CharClassKind, ch: char) -> bool {
    match kind {
        CharClassKind::Alpha => ch.is_alphabetic(),
        CharClassKind::Upper => ch.is_uppercase(),
        CharClassKind::Lower => ch.is_lowercase(),
        CharClassKind::Digit => ch.is_ascii_digit(),
        CharClassKind::Alnum => ch.is_alphanumeric(),
        CharClassKind::Word => ch.is_alphanumeric() || ch == '_',
        CharClassKind::Space => ch.is_whitespace(),
        CharClassKind::Punct => ch.is_ascii_punctuation(),
        CharClassKind::Printable => ('\x20'..='\x7e').contains(&ch),
        CharClassKind::Control => ch.is_control(),
    }
}

impl<S: Subject<Element = char> + ?Sized> Pattern<S> for CharClass {
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Forward, move |ch| self.contains(*ch))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        single_step(base, Direction::Backward, move |ch| self.contains(*ch))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_forward(subject, from, |ch| self.contains(*ch))
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        scan_backward(subject, from, |ch| self.contains(*ch))
    }
}
