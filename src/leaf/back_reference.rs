//! Back-references: re-match whatever a token last captured.

use crate::captures::TokenId;
use crate::match_state::{Direction, Match};
use crate::pattern::{Matches, Pattern};
use crate::subject::Subject;

use super::consume_sequence;

/// Matches the elements of the most recent capture of `token`.
///
/// Fails when the token has not captured anything on the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackReference {
    token: TokenId,
}

impl BackReference {
    pub fn new(token: TokenId) -> Self {
        Self { token }
    }

    pub fn token(&self) -> TokenId {
        self.token
    }

    fn replay<'a, S: Subject + ?Sized>(
        &self,
        base: Match<'a, S>,
        direction: Direction,
    ) -> Matches<'a, S> {
        let token = self.token;
        Box::new(std::iter::once(base).filter_map(move |b| {
            let span = b.last_capture(token)?;
            let elements = b.subject().elements(span);
            consume_sequence(&b, &elements, direction)
        }))
    }
}

impl<S: Subject + ?Sized> Pattern<S> for BackReference {
    fn forward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.replay(base, Direction::Forward)
    }

    fn backward_matches<'a>(&'a self, base: Match<'a, S>) -> Matches<'a, S> {
        self.replay(base, Direction::Backward)
    }
}
