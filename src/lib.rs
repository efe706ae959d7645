//! # costar — Co-star Connection Finder
//!
//! Finds a short connection path between two people in the implicit bipartite
//! actor–film graph, discovered lazily through a [`GraphProvider`].
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphProvider` is the contract between the search and
//!    any edge source (TMDB, in-memory fixtures, ...)
//! 2. **Clean DTOs**: `Person`, `Work`, `Path` cross all boundaries
//! 3. **Failure containment**: a broken node contributes no edges; it never
//!    aborts the search
//! 4. **NotFound is not an error**: exhausting the level budget returns
//!    `Ok(None)`
//!
//! ## Quick Start
//!
//! ```rust
//! use costar::{ConnectionFinder, MemoryGraph, NoProgress, PersonId, WorkId};
//!
//! # async fn example() -> costar::Result<()> {
//! let graph = MemoryGraph::new();
//! let keanu = graph.add_person(PersonId(1), "Keanu Reeves");
//! let carrie = graph.add_person(PersonId(2), "Carrie-Anne Moss");
//! let matrix = graph.add_work(WorkId(10), "The Matrix");
//! graph.add_credit(PersonId(1), WorkId(10));
//! graph.add_credit(PersonId(2), WorkId(10));
//!
//! let finder = ConnectionFinder::new(graph);
//! let path = finder.find(keanu, carrie, &NoProgress).await?;
//! assert_eq!(path.unwrap().hop_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Graph Providers
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `MemoryGraph` | (default) | In-memory bipartite graph for testing/embedding |
//! | `TmdbProvider` | `tmdb` | The Movie Database REST API |

// ============================================================================
// Modules
// ============================================================================

pub mod annotate;
pub mod model;
pub mod progress;
pub mod provider;
pub mod search;
#[cfg(feature = "server")]
pub mod server;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{GraphNode, Path, Person, PersonId, Work, WorkId};

// ============================================================================
// Re-exports: Provider
// ============================================================================

pub use provider::{GraphProvider, MemoryGraph};
#[cfg(feature = "tmdb")]
pub use provider::TmdbProvider;

// ============================================================================
// Re-exports: Search / Progress / Annotation
// ============================================================================

pub use annotate::{Annotator, NoAnnotator, RequestBudget};
#[cfg(feature = "giphy")]
pub use annotate::GiphyAnnotator;
pub use progress::{FnSink, NoProgress, ProgressSink};
pub use search::{find_connection, SearchConfig};

// ============================================================================
// Top-level ConnectionFinder handle
// ============================================================================

/// The primary entry point. A `ConnectionFinder` wraps a graph provider and
/// a search configuration.
pub struct ConnectionFinder<P: GraphProvider> {
    provider: P,
    config: SearchConfig,
}

impl<P: GraphProvider> ConnectionFinder<P> {
    /// Create a finder over the given provider with default search limits.
    pub fn new(provider: P) -> Self {
        Self { provider, config: SearchConfig::default() }
    }

    pub fn with_config(provider: P, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Run the bidirectional search between two already-resolved endpoints.
    ///
    /// `Ok(None)` means no connection within the level budget.
    pub async fn find(
        &self,
        start: Person,
        end: Person,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Path>> {
        find_connection(&self.provider, start, end, &self.config, progress).await
    }

    /// Resolve two names through the provider, then search.
    ///
    /// An unresolvable name is `Error::InvalidInput` carrying that name, so
    /// callers can tell the user which endpoint was unknown.
    pub async fn find_by_name(
        &self,
        start_name: &str,
        end_name: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Path>> {
        let start = self
            .provider
            .find_person(start_name)
            .await?
            .ok_or_else(|| Error::InvalidInput(format!("unknown person: {start_name}")))?;
        let end = self
            .provider
            .find_person(end_name)
            .await?
            .ok_or_else(|| Error::InvalidInput(format!("unknown person: {end_name}")))?;
        self.find(start, end, progress).await
    }

    /// Access the underlying provider (for advanced use).
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Crate error taxonomy.
///
/// Note what is *not* here: a not-found variant. Exhausting the search budget
/// is a normal negative result (`Ok(None)`), distinct from failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider call failed (network, provider-side error, malformed
    /// response). Within the search these are contained at the node being
    /// expanded; this variant only escapes from direct provider calls such
    /// as endpoint resolution.
    #[error("lookup failed for {entity}: {message}")]
    Lookup { entity: String, message: String },

    /// A search endpoint is missing or malformed. Surfaced before the search
    /// loop begins; never silently defaulted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `Lookup` error for the given entity from any error source.
    pub fn lookup(entity: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Error::Lookup { entity: entity.into(), message: source.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
