//! # Graph Edge Provider Trait
//!
//! This is THE contract between the search and any edge source. The graph is
//! never materialized: edges are discovered one lookup at a time.
//!
//! ## Implementations
//!
//! | Provider | Module | Description |
//! |----------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory bipartite graph for testing/embedding |
//! | `TmdbProvider` | `tmdb` | The Movie Database REST API |

pub mod memory;
#[cfg(feature = "tmdb")]
pub mod tmdb;

use async_trait::async_trait;

use crate::model::{Person, PersonId, Work, WorkId};
use crate::Result;

pub use memory::MemoryGraph;
#[cfg(feature = "tmdb")]
pub use tmdb::TmdbProvider;

/// The universal edge-lookup contract.
///
/// No ordering guarantee on returned sequences: the search must not depend
/// on order for correctness, only for tie-break determinism. All failures are
/// `Error::Lookup`; the search contains them at the node being expanded.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Resolve a display name to a person. First hit wins — disambiguation
    /// of multi-valued identities is the caller's problem.
    async fn find_person(&self, name: &str) -> Result<Option<Person>>;

    /// All works the person appeared in.
    async fn works_for(&self, person: PersonId) -> Result<Vec<Work>>;

    /// The cast of a work.
    async fn cast_of(&self, work: WorkId) -> Result<Vec<Person>>;
}

/// Forwarding impl so `Arc<dyn GraphProvider>` and friends work as providers.
#[async_trait]
impl<P: GraphProvider + ?Sized> GraphProvider for std::sync::Arc<P> {
    async fn find_person(&self, name: &str) -> Result<Option<Person>> {
        (**self).find_person(name).await
    }

    async fn works_for(&self, person: PersonId) -> Result<Vec<Work>> {
        (**self).works_for(person).await
    }

    async fn cast_of(&self, work: WorkId) -> Result<Vec<Person>> {
        (**self).cast_of(work).await
    }
}
