//! # Bidirectional Path Search
//!
//! Level-synchronized bidirectional BFS over the lazily discovered bipartite
//! graph. Each level expands the forward frontier fully, then the backward
//! frontier; the first person discovered by one side that the opposite side
//! already reached is the meeting point, and the search stops there.
//!
//! Ties are broken by traversal order (the order the provider returned
//! edges), never by elapsed time: lookups suspend cooperatively one at a
//! time, so a re-run over the same provider responses finds a path of the
//! same hop count.
//!
//! Lookup failures are contained at the node being expanded: a person whose
//! filmography can't be fetched contributes no edges, a work whose cast
//! can't be fetched is skipped, and the level continues.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::model::{Path, Person, PersonId};
use crate::progress::ProgressSink;
use crate::provider::GraphProvider;
use crate::{Error, Result};

// ============================================================================
// SearchConfig
// ============================================================================

/// Limits for one search invocation.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum expansion levels per side. A path found at the boundary has
    /// at most `2 * max_levels` hops.
    pub max_levels: usize,
    /// Cap on works fetched per person. A prolific actor can carry hundreds
    /// of credits; the cap bounds per-level fan-out. Truncation keeps
    /// provider order.
    pub max_works_per_person: usize,
    /// Cap on cast members considered per work.
    pub max_cast_per_work: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_levels: 2,
            max_works_per_person: 40,
            max_cast_per_work: 50,
        }
    }
}

impl SearchConfig {
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }
}

// ============================================================================
// Frontier
// ============================================================================

/// Persons reached from one origin, each mapped to the unique path that
/// first discovered them.
///
/// Insertion is one-time: first discovery wins, no path is ever overwritten.
/// That makes the map double as the visited set and suppresses self-loops
/// and repeated edges without a separate check.
struct Frontier {
    paths: HashMap<PersonId, Path>,
}

impl Frontier {
    fn seeded(origin: Person) -> Self {
        let mut paths = HashMap::new();
        paths.insert(origin.id, Path::single(origin));
        Self { paths }
    }

    fn get(&self, id: PersonId) -> Option<&Path> {
        self.paths.get(&id)
    }

    /// Insert unless the identity was already claimed. Returns whether the
    /// path was recorded.
    fn try_insert(&mut self, id: PersonId, path: Path) -> bool {
        match self.paths.entry(id) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(path);
                true
            }
        }
    }
}

// ============================================================================
// Expansion
// ============================================================================

/// Which origin a frontier grows from. Decides how the halves are joined at
/// a meeting point.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// Outcome of expanding one side by one level.
enum Expansion {
    /// A person discovered here was already in the opposite frontier.
    Met(Path),
    /// No meeting point; these are the newly discovered paths to expand
    /// next level.
    Next(Vec<Path>),
}

/// Expand every queued path by exactly one person→work→person hop.
async fn expand_level<P>(
    provider: &P,
    side: Side,
    queue: &[Path],
    own: &mut Frontier,
    opposite: &Frontier,
    config: &SearchConfig,
) -> Expansion
where
    P: GraphProvider + ?Sized,
{
    let mut next_queue = Vec::new();

    for path in queue {
        let tip = path.end().clone();

        let mut works = match provider.works_for(tip.id).await {
            Ok(works) => works,
            Err(e) => {
                warn!(person = %tip.name, error = %e, "filmography lookup failed, skipping person");
                continue;
            }
        };
        works.truncate(config.max_works_per_person);

        for work in works {
            let mut cast = match provider.cast_of(work.id).await {
                Ok(cast) => cast,
                Err(e) => {
                    warn!(work = %work.title, error = %e, "cast lookup failed, skipping work");
                    continue;
                }
            };
            cast.truncate(config.max_cast_per_work);

            for member in cast {
                // Meeting point: the opposite side already reached this
                // person. First meeting wins; stop immediately.
                if let Some(other) = opposite.get(member.id) {
                    let joined = match side {
                        Side::Forward => Path::connect(path, work, other),
                        Side::Backward => Path::connect(other, work, path),
                    };
                    return Expansion::Met(joined);
                }

                let id = member.id;
                let extended = path.extended(work.clone(), member);
                if own.try_insert(id, extended.clone()) {
                    next_queue.push(extended);
                }
            }
        }
    }

    Expansion::Next(next_queue)
}

// ============================================================================
// find_connection
// ============================================================================

/// Search for a connection path between `start` and `end`.
///
/// Returns `Ok(Some(path))` on a meeting point, `Ok(None)` when both sides
/// exhaust `config.max_levels` without intersecting. The only errors are
/// input validation; lookup failures are contained inside the level loop.
pub async fn find_connection<P>(
    provider: &P,
    start: Person,
    end: Person,
    config: &SearchConfig,
    progress: &dyn ProgressSink,
) -> Result<Option<Path>>
where
    P: GraphProvider + ?Sized,
{
    if start.name.trim().is_empty() || end.name.trim().is_empty() {
        return Err(Error::InvalidInput("endpoint with an empty name".into()));
    }
    if config.max_levels == 0 {
        return Err(Error::InvalidInput("max_levels must be at least 1".into()));
    }

    // Same endpoint: a zero-hop connection. The loop below can only detect
    // meetings across a work edge, so this must short-circuit explicitly.
    if start.id == end.id {
        return Ok(Some(Path::single(start)));
    }

    let start_name = start.name.clone();
    let end_name = end.name.clone();

    let mut forward = Frontier::seeded(start.clone());
    let mut backward = Frontier::seeded(end.clone());
    let mut forward_queue = vec![Path::single(start)];
    let mut backward_queue = vec![Path::single(end)];

    for level in 1..=config.max_levels {
        progress.update(&format!("Searching level {level} from {start_name}..."));
        debug!(level, paths = forward_queue.len(), "expanding forward frontier");
        match expand_level(provider, Side::Forward, &forward_queue, &mut forward, &backward, config)
            .await
        {
            Expansion::Met(path) => return Ok(Some(path)),
            Expansion::Next(queue) => forward_queue = queue,
        }

        progress.update(&format!("Searching level {level} from {end_name}..."));
        debug!(level, paths = backward_queue.len(), "expanding backward frontier");
        match expand_level(provider, Side::Backward, &backward_queue, &mut backward, &forward, config)
            .await
        {
            Expansion::Met(path) => return Ok(Some(path)),
            Expansion::Next(queue) => backward_queue = queue,
        }

        if forward_queue.is_empty() && backward_queue.is_empty() {
            debug!(level, "both frontiers exhausted early");
            break;
        }
    }

    Ok(None)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonId, Work, WorkId};

    fn person(id: u64) -> Person {
        Person::new(PersonId(id), format!("person-{id}"))
    }

    #[test]
    fn frontier_first_discovery_wins() {
        let origin = person(1);
        let mut frontier = Frontier::seeded(origin.clone());

        let first = Path::single(origin.clone()).extended(Work::new(WorkId(10), "a"), person(2));
        let second = Path::single(origin).extended(Work::new(WorkId(11), "b"), person(2));

        assert!(frontier.try_insert(PersonId(2), first.clone()));
        assert!(!frontier.try_insert(PersonId(2), second));
        assert_eq!(frontier.get(PersonId(2)), Some(&first));
    }

    #[test]
    fn frontier_seed_claims_the_origin() {
        let mut frontier = Frontier::seeded(person(1));
        let rediscovered = Path::single(person(5)).extended(Work::new(WorkId(10), "a"), person(1));
        assert!(!frontier.try_insert(PersonId(1), rediscovered));
        assert_eq!(frontier.get(PersonId(1)).unwrap().hop_count(), 0);
    }

    #[test]
    fn default_config_is_two_levels() {
        let config = SearchConfig::default();
        assert_eq!(config.max_levels, 2);
        assert!(config.max_works_per_person > 0);
        assert!(config.max_cast_per_work > 0);
    }
}
