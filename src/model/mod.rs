//! # Bipartite Graph Model
//!
//! Clean DTOs for the actor–film graph. These types cross every boundary:
//! provider ↔ search ↔ annotator ↔ server.
//!
//! Design rule: NO reqwest types, NO axum types here.
//! This module is pure data — no I/O, no state, no async.

pub mod node;
pub mod path;

pub use node::{GraphNode, Person, PersonId, Work, WorkId};
pub use path::Path;
