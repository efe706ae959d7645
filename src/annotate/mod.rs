//! # Path Annotation
//!
//! Decorates a finished path with supplementary display data (an
//! illustrative GIF per node). Independent of search correctness: a
//! decoration failure for one node degrades to no image for that node only,
//! never aborts the annotation, and never feeds back into the search.

#[cfg(feature = "giphy")]
pub mod giphy;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::model::Path;

#[cfg(feature = "giphy")]
pub use giphy::GiphyAnnotator;

/// Decorates each node of a path with an optional display image.
///
/// Contract: same node order, same identities, same length. Only display
/// fields (`gif_url`) may change. Annotation never fails — implementations
/// map their own errors to "no image for this node".
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, path: Path) -> Path;
}

/// Identity annotator: hands the path back untouched.
pub struct NoAnnotator;

#[async_trait]
impl Annotator for NoAnnotator {
    async fn annotate(&self, path: Path) -> Path {
        path
    }
}

// ============================================================================
// RequestBudget
// ============================================================================

/// A process-wide count of remaining annotation lookups.
///
/// Rate-limited upstream APIs get a fixed budget; once it runs out the
/// annotator stops issuing lookups instead of failing. The remaining count
/// is surfaced to clients so they can see how much of the quota is left.
pub struct RequestBudget {
    remaining: AtomicU64,
}

impl RequestBudget {
    pub fn new(budget: u64) -> Self {
        Self { remaining: AtomicU64::new(budget) }
    }

    /// Claim one request. Returns false once the budget is spent.
    pub fn try_acquire(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
