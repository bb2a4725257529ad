//! Capture bookkeeping shared by every [`Match`](crate::Match).
//!
//! Captures are kept in a persistent singly-linked list, newest first.
//! Recording a capture allocates one node that points at the previous list,
//! so sibling matches produced while backtracking share their common prefix
//! and never observe each other's additions.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one capturing group.
///
/// Ids are never reused, so two tokens compare equal only if one was copied
/// from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u64);

impl TokenId {
    /// Allocate a fresh, globally unique id.
    pub fn fresh() -> Self {
        Self(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct CaptureNode<P> {
    token: TokenId,
    span: Range<P>,
    previous: CaptureList<P>,
}

/// Persistent list of `(token, span)` records.
pub(crate) struct CaptureList<P> {
    head: Option<Arc<CaptureNode<P>>>,
}

impl<P> Clone for CaptureList<P> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<P> Default for CaptureList<P> {
    fn default() -> Self {
        Self { head: None }
    }
}

// Unlink iteratively; long repetitions build chains deep enough to overflow
// the stack with the default recursive drop.
impl<P> Drop for CaptureList<P> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Arc::try_unwrap(node) {
                Ok(mut node) => head = node.previous.head.take(),
                Err(_) => break,
            }
        }
    }
}

impl<P: Copy> CaptureList<P> {
    pub fn with(&self, token: TokenId, span: Range<P>) -> Self {
        Self {
            head: Some(Arc::new(CaptureNode {
                token,
                span,
                previous: self.clone(),
            })),
        }
    }

    /// Newest-first walk over every record.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, Range<P>)> + '_ {
        let mut cursor = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.previous.head.as_deref();
            Some((node.token, node.span.clone()))
        })
    }

    /// Spans recorded for `token`, oldest first.
    pub fn spans(&self, token: TokenId) -> Vec<Range<P>> {
        let mut spans: Vec<Range<P>> = self
            .iter()
            .filter(|(t, _)| *t == token)
            .map(|(_, span)| span)
            .collect();
        spans.reverse();
        spans
    }

    pub fn first(&self, token: TokenId) -> Option<Range<P>> {
        self.iter()
            .filter(|(t, _)| *t == token)
            .last()
            .map(|(_, span)| span)
    }

    pub fn last(&self, token: TokenId) -> Option<Range<P>> {
        self.iter()
            .find(|(t, _)| *t == token)
            .map(|(_, span)| span)
    }

    /// Every record, oldest first.
    pub fn all(&self) -> Vec<(TokenId, Range<P>)> {
        let mut records: Vec<_> = self.iter().collect();
        records.reverse();
        records
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<P: Copy + PartialEq> PartialEq for CaptureList<P> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.iter().eq(other.iter()),
        }
    }
}

impl<P: Copy + fmt::Debug> fmt::Debug for CaptureList<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.all()).finish()
    }
}
