//! Bounded repetition with eager or lazy ordering.
//!
//! The matches of a repetition form a tree of *rings*. The root ring holds
//! the base match at depth 0; applying the repeated pattern once to a ring's
//! match gives its successor rings at depth + 1. Eager repetition walks the
//! tree depth-first and yields a ring after its successors; lazy repetition
//! yields a ring before descending. Only the active path is kept in memory.

use std::fmt;

use log::debug;

use crate::error::PatternError;
use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

/// Inclusive repetition bounds; `max == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    min: usize,
    max: Option<usize>,
}

impl Multiplicity {
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, PatternError> {
        if let Some(max) = max
            && min > max
        {
            debug!("rejecting multiplicity {min}..={max}");
            return Err(PatternError::InvalidMultiplicity { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn zero_or_more() -> Self {
        Self::at_least(0)
    }

    pub fn one_or_more() -> Self {
        Self::at_least(1)
    }

    pub fn optional() -> Self {
        Self {
            min: 0,
            max: Some(1),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Whether a ring at `depth` may still grow a successor.
    pub fn allows_more_than(&self, depth: usize) -> bool {
        self.max.is_none_or(|max| depth < max)
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{{{}}}", self.min),
            Some(max) => write!(f, "{{{},{}}}", self.min, max),
            None => write!(f, "{{{},}}", self.min),
        }
    }
}

/// Whether more repetitions are tried first (eager) or last (lazy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Greediness {
    #[default]
    Eager,
    Lazy,
}

/// `pattern` repeated within `multiplicity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Repetition<P> {
    pattern: P,
    multiplicity: Multiplicity,
    greediness: Greediness,
}

impl<P> Repetition<P> {
    pub fn new(pattern: P, multiplicity: Multiplicity, greediness: Greediness) -> Self {
        Self {
            pattern,
            multiplicity,
            greediness,
        }
    }

    pub fn eager(pattern: P, multiplicity: Multiplicity) -> Self {
        Self::new(pattern, multiplicity, Greediness::Eager)
    }

    pub fn lazy(pattern: P, multiplicity: Multiplicity) -> Self {
        Self::new(pattern, multiplicity, Greediness::Lazy)
    }

    pub fn repeated_pattern(&self) -> &P {
        &self.pattern
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub fn greediness(&self) -> Greediness {
        self.greediness
    }
}

impl<S, P> Pattern<S> for Repetition<P>
where
    S: Subject + ?Sized,
    P: Pattern<S>,
{
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(RingMatches::new(self, base, Direction::Forward))
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        Box::new(RingMatches::new(self, base, Direction::Backward))
    }

    fn smallest_forward_start(&self, subject: &S, from: S::Position) -> S::Position {
        if self.multiplicity.min > 0 {
            self.pattern.smallest_forward_start(subject, from)
        } else {
            from
        }
    }

    fn largest_backward_start(&self, subject: &S, from: S::Position) -> S::Position {
        if self.multiplicity.min > 0 {
            self.pattern.largest_backward_start(subject, from)
        } else {
            from
        }
    }
}

/// One node on the active path through the ring tree.
struct Ring<'a, S: Subject + ?Sized> {
    depth: usize,
    base: Match<'a, S>,
    /// Matches of one more repetition from `base`; built on first use.
    successors: Option<Matches<'a, S>>,
    /// False once a zero-width step has reached this ring and `min` is met.
    expandable: bool,
    yielded: bool,
}

impl<'a, S: Subject + ?Sized> Ring<'a, S> {
    fn new(depth: usize, base: Match<'a, S>, expandable: bool) -> Self {
        Self {
            depth,
            base,
            successors: None,
            expandable,
            yielded: false,
        }
    }
}

struct RingMatches<'a, S: Subject + ?Sized, P> {
    repetition: &'a Repetition<P>,
    direction: Direction,
    stack: Vec<Ring<'a, S>>,
}

impl<'a, S: Subject + ?Sized, P: Pattern<S>> RingMatches<'a, S, P> {
    fn new(repetition: &'a Repetition<P>, base: Match<'a, S>, direction: Direction) -> Self {
        Self {
            repetition,
            direction,
            stack: vec![Ring::new(0, base, true)],
        }
    }

    /// Push the next successor of the top ring. Returns false when the top
    /// ring has none left (or may not grow at all).
    fn descend(&mut self) -> bool {
        let repetition = self.repetition;
        let direction = self.direction;
        let multiplicity = repetition.multiplicity;
        let Some(top) = self.stack.last_mut() else {
            return false;
        };
        if !top.expandable || !multiplicity.allows_more_than(top.depth) {
            return false;
        }
        if top.successors.is_none() {
            top.successors = Some(repetition.pattern.matches(top.base.clone(), direction));
        }
        let Some(next) = top.successors.as_mut().and_then(|successors| successors.next()) else {
            return false;
        };
        let depth = top.depth + 1;
        // A zero-width step may only be followed by more steps while they are
        // still needed to reach `min`; otherwise the chain would never end.
        let stalled = next.position() == top.base.position();
        let expandable = !stalled || depth < multiplicity.min;
        self.stack.push(Ring::new(depth, next, expandable));
        true
    }

    fn next_eager(&mut self) -> Option<Match<'a, S>> {
        loop {
            if self.descend() {
                continue;
            }
            let ring = self.stack.pop()?;
            if ring.depth >= self.repetition.multiplicity.min {
                return Some(ring.base);
            }
        }
    }

    fn next_lazy(&mut self) -> Option<Match<'a, S>> {
        let min = self.repetition.multiplicity.min;
        loop {
            let top = self.stack.last_mut()?;
            if !top.yielded {
                top.yielded = true;
                if top.depth >= min {
                    return Some(top.base.clone());
                }
            }
            if !self.descend() {
                self.stack.pop();
            }
        }
    }
}

impl<'a, S: Subject + ?Sized, P: Pattern<S>> Iterator for RingMatches<'a, S, P> {
    type Item = Match<'a, S>;

    fn next(&mut self) -> Option<Match<'a, S>> {
        match self.repetition.greediness {
            Greediness::Eager => self.next_eager(),
            Greediness::Lazy => self.next_lazy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{Alternation, Concatenation};
    use crate::leaf::{AnyElement, Literal};

    fn ends<P: Pattern<str>>(pattern: &P, text: &str, at: usize, direction: Direction) -> Vec<usize> {
        pattern
            .matches(Match::new(text, at), direction)
            .map(|m| m.position())
            .collect()
    }

    #[test]
    fn eager_prefers_more() {
        let a_plus = Repetition::eager(Literal::from_str("a"), Multiplicity::one_or_more());
        assert_eq!(ends(&a_plus, "aaa", 0, Direction::Forward), vec![3, 2, 1]);
    }

    #[test]
    fn lazy_prefers_fewer() {
        let a_plus = Repetition::lazy(Literal::from_str("a"), Multiplicity::one_or_more());
        assert_eq!(ends(&a_plus, "aaa", 0, Direction::Forward), vec![1, 2, 3]);
    }

    #[test]
    fn zero_minimum_yields_the_base() {
        let a_star = Repetition::eager(Literal::from_str("a"), Multiplicity::zero_or_more());
        assert_eq!(ends(&a_star, "aab", 0, Direction::Forward), vec![2, 1, 0]);
        let lazy = Repetition::lazy(Literal::from_str("a"), Multiplicity::zero_or_more());
        assert_eq!(ends(&lazy, "aab", 0, Direction::Forward), vec![0, 1, 2]);
    }

    #[test]
    fn bounds_are_respected() {
        let two_to_three = Repetition::eager(
            Literal::from_str("a"),
            Multiplicity::new(2, Some(3)).unwrap(),
        );
        assert_eq!(ends(&two_to_three, "aaaaa", 0, Direction::Forward), vec![3, 2]);
        assert_eq!(ends(&two_to_three, "a", 0, Direction::Forward), Vec::<usize>::new());
        let exactly_zero = Repetition::eager(Literal::from_str("a"), Multiplicity::exactly(0));
        assert_eq!(ends(&exactly_zero, "aaa", 0, Direction::Forward), vec![0]);
    }

    #[test]
    fn backward_repetition_recedes() {
        let a_plus = Repetition::eager(Literal::from_str("a"), Multiplicity::one_or_more());
        assert_eq!(ends(&a_plus, "baaa", 4, Direction::Backward), vec![1, 2, 3]);
        let lazy = Repetition::lazy(Literal::from_str("a"), Multiplicity::one_or_more());
        assert_eq!(ends(&lazy, "baaa", 4, Direction::Backward), vec![3, 2, 1]);
    }

    #[test]
    fn rings_branch_on_every_alternative() {
        // (a|aa){2} over "aaaa": a·a, a·aa, aa·a, aa·aa
        let unit = Alternation::new(Literal::from_str("a"), Literal::from_str("aa"));
        let twice = Repetition::eager(unit, Multiplicity::exactly(2));
        assert_eq!(ends(&twice, "aaaa", 0, Direction::Forward), vec![2, 3, 3, 4]);
    }

    #[test]
    fn zero_width_steps_terminate() {
        // (a?)* must not loop forever on a zero-width iteration.
        let optional_a = Repetition::eager(Literal::from_str("a"), Multiplicity::optional());
        let star = Repetition::eager(optional_a, Multiplicity::zero_or_more());
        let results = ends(&star, "ab", 0, Direction::Forward);
        assert_eq!(results.first(), Some(&1));
        assert!(results.iter().all(|end| *end <= 1));
        let lazy = Repetition::lazy(Literal::from_str(""), Multiplicity::zero_or_more());
        assert_eq!(ends(&lazy, "ab", 0, Direction::Forward), vec![0, 0]);
    }

    #[test]
    fn zero_width_steps_still_reach_the_minimum() {
        // (){3} matches the empty string.
        let empty = Repetition::eager(Literal::from_str(""), Multiplicity::exactly(3));
        assert_eq!(ends(&empty, "x", 0, Direction::Forward), vec![0]);
    }

    #[test]
    fn unbounded_eager_is_lazy_in_work() {
        // Only the first result of .* is pulled; the rest is never derived.
        let any = Repetition::eager(AnyElement, Multiplicity::zero_or_more());
        let text = "x".repeat(10_000);
        let first = any
            .forward_matches(Match::at_start(text.as_str()))
            .next()
            .map(|m| m.position());
        assert_eq!(first, Some(10_000));
    }

    #[test]
    fn multiplicity_validation_and_display() {
        assert_eq!(
            Multiplicity::new(3, Some(2)),
            Err(PatternError::InvalidMultiplicity { min: 3, max: 2 })
        );
        assert_eq!(Multiplicity::exactly(2).to_string(), "{2}");
        assert_eq!(Multiplicity::new(1, Some(4)).unwrap().to_string(), "{1,4}");
        assert_eq!(Multiplicity::at_least(1).to_string(), "{1,}");
        assert!(Multiplicity::optional().contains(0));
        assert!(!Multiplicity::optional().contains(2));
        assert!(Multiplicity::one_or_more().contains(100));
    }

    #[test]
    fn hints_need_a_mandatory_iteration() {
        let plus = Repetition::eager(Literal::from_str("a"), Multiplicity::one_or_more());
        assert_eq!(plus.smallest_forward_start("bba", 0), 2);
        let star = Repetition::eager(Literal::from_str("a"), Multiplicity::zero_or_more());
        assert_eq!(star.smallest_forward_start("bba", 0), 0);
        let seq = Concatenation::new(star, Literal::from_str("b"));
        assert_eq!(seq.smallest_forward_start("bba", 1), 1);
    }
}
