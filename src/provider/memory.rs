//! In-memory graph provider.
//!
//! This is the reference implementation of `GraphProvider`. It holds an
//! explicit bipartite graph in HashMaps protected by RwLock.
//!
//! ## Determinism
//!
//! Credit lists preserve insertion order, so lookup results come back in the
//! order edges were added. Tests rely on this for reproducible tie-breaks.
//!
//! Use this provider for:
//! - Testing the search without a network
//! - Embedding costar in applications that carry their own graph data

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;

use super::GraphProvider;
use crate::model::{Person, PersonId, Work, WorkId};
use crate::Result;

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory bipartite actor–film graph.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    people: RwLock<HashMap<PersonId, Person>>,
    works: RwLock<HashMap<WorkId, Work>>,
    /// person → works they appeared in (insertion order)
    filmography: RwLock<HashMap<PersonId, Vec<WorkId>>>,
    /// work → cast (insertion order)
    cast: RwLock<HashMap<WorkId, Vec<PersonId>>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person. Returns the stored DTO for convenience.
    pub fn add_person(&self, id: PersonId, name: impl Into<String>) -> Person {
        let person = Person::new(id, name);
        self.inner.people.write().insert(id, person.clone());
        person
    }

    /// Register a work. Returns the stored DTO for convenience.
    pub fn add_work(&self, id: WorkId, title: impl Into<String>) -> Work {
        let work = Work::new(id, title);
        self.inner.works.write().insert(id, work.clone());
        work
    }

    /// Record that a person appeared in a work (adds both edge directions).
    pub fn add_credit(&self, person: PersonId, work: WorkId) {
        self.inner.filmography.write().entry(person).or_default().push(work);
        self.inner.cast.write().entry(work).or_default().push(person);
    }

    pub fn person(&self, id: PersonId) -> Option<Person> {
        self.inner.people.read().get(&id).cloned()
    }

    pub fn work(&self, id: WorkId) -> Option<Work> {
        self.inner.works.read().get(&id).cloned()
    }
}

#[async_trait]
impl GraphProvider for MemoryGraph {
    async fn find_person(&self, name: &str) -> Result<Option<Person>> {
        let people = self.inner.people.read();
        Ok(people.values().find(|p| p.name.eq_ignore_ascii_case(name)).cloned())
    }

    async fn works_for(&self, person: PersonId) -> Result<Vec<Work>> {
        let filmography = self.inner.filmography.read();
        let works = self.inner.works.read();
        Ok(filmography
            .get(&person)
            .map(|ids| ids.iter().filter_map(|id| works.get(id).cloned()).collect())
            .unwrap_or_default())
    }

    async fn cast_of(&self, work: WorkId) -> Result<Vec<Person>> {
        let cast = self.inner.cast.read();
        let people = self.inner.people.read();
        Ok(cast
            .get(&work)
            .map(|ids| ids.iter().filter_map(|id| people.get(id).cloned()).collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn credits_link_both_directions() {
        let g = MemoryGraph::new();
        g.add_person(PersonId(1), "Alice");
        g.add_person(PersonId(2), "Bob");
        g.add_work(WorkId(10), "Heist");
        g.add_credit(PersonId(1), WorkId(10));
        g.add_credit(PersonId(2), WorkId(10));

        let works = g.works_for(PersonId(1)).await.unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].id, WorkId(10));

        let cast = g.cast_of(WorkId(10)).await.unwrap();
        let ids: Vec<PersonId> = cast.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId(1), PersonId(2)]);
    }

    #[tokio::test]
    async fn unknown_ids_have_no_edges() {
        let g = MemoryGraph::new();
        assert!(g.works_for(PersonId(99)).await.unwrap().is_empty());
        assert!(g.cast_of(WorkId(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_person_is_case_insensitive_first_hit() {
        let g = MemoryGraph::new();
        g.add_person(PersonId(1), "Keanu Reeves");

        let hit = g.find_person("keanu reeves").await.unwrap();
        assert_eq!(hit.unwrap().id, PersonId(1));
        assert!(g.find_person("Nobody").await.unwrap().is_none());
    }
}
