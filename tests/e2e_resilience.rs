//! End-to-end tests for failure containment and resource limits.
//!
//! A broken node must contribute zero edges and nothing more: the search
//! keeps going, terminates within its budget, and never surfaces a lookup
//! failure to the caller.

use async_trait::async_trait;
use costar::{
    find_connection, Error, FnSink, GraphProvider, MemoryGraph, NoProgress, Person, PersonId,
    SearchConfig, Work, WorkId,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

/// Provider wrapper that fails lookups for chosen people/works.
struct FlakyProvider {
    inner: MemoryGraph,
    broken_people: Vec<PersonId>,
    broken_works: Vec<WorkId>,
}

impl FlakyProvider {
    fn new(inner: MemoryGraph) -> Self {
        Self { inner, broken_people: Vec::new(), broken_works: Vec::new() }
    }

    fn break_person(mut self, id: PersonId) -> Self {
        self.broken_people.push(id);
        self
    }

    fn break_work(mut self, id: WorkId) -> Self {
        self.broken_works.push(id);
        self
    }
}

#[async_trait]
impl GraphProvider for FlakyProvider {
    async fn find_person(&self, name: &str) -> costar::Result<Option<Person>> {
        self.inner.find_person(name).await
    }

    async fn works_for(&self, person: PersonId) -> costar::Result<Vec<Work>> {
        if self.broken_people.contains(&person) {
            return Err(Error::Lookup {
                entity: format!("person {person}"),
                message: "simulated transport failure".into(),
            });
        }
        self.inner.works_for(person).await
    }

    async fn cast_of(&self, work: WorkId) -> costar::Result<Vec<Person>> {
        if self.broken_works.contains(&work) {
            return Err(Error::Lookup {
                entity: format!("work {work}"),
                message: "simulated transport failure".into(),
            });
        }
        self.inner.cast_of(work).await
    }
}

/// a -[w1]- b -[w2]- c plus a -[w3]- d -[w4]- c: two 2-hop routes.
fn two_route_graph() -> (MemoryGraph, Person, Person) {
    let graph = MemoryGraph::new();
    let a = graph.add_person(PersonId(1), "a");
    graph.add_person(PersonId(2), "b");
    let c = graph.add_person(PersonId(3), "c");
    graph.add_person(PersonId(4), "d");
    for (work, x, y) in [
        (WorkId(11), PersonId(1), PersonId(2)),
        (WorkId(12), PersonId(2), PersonId(3)),
        (WorkId(13), PersonId(1), PersonId(4)),
        (WorkId(14), PersonId(4), PersonId(3)),
    ] {
        graph.add_work(work, format!("w{}", work.0));
        graph.add_credit(x, work);
        graph.add_credit(y, work);
    }
    (graph, a, c)
}

// ============================================================================
// 1. All lookups for the start fail: backward side still runs
// ============================================================================

#[tokio::test]
async fn broken_start_yields_not_found_without_error() {
    let (graph, a, c) = two_route_graph();
    let provider = FlakyProvider::new(graph)
        .break_person(PersonId(1))
        // break everything the backward side expands from too, so nothing meets
        .break_person(PersonId(3))
        .break_person(PersonId(2))
        .break_person(PersonId(4));

    let found = find_connection(&provider, a, c, &SearchConfig::default(), &NoProgress)
        .await
        .expect("lookup failures are contained, never surfaced");
    assert!(found.is_none());
}

// ============================================================================
// 2. Broken start, intact graph: the backward side finds it anyway
// ============================================================================

#[tokio::test]
async fn backward_expansion_runs_independently_of_a_broken_start() {
    let (graph, a, c) = two_route_graph();
    // a's own filmography is unreachable, but the backward frontier can
    // still discover a in the cast of b's films
    let provider = FlakyProvider::new(graph).break_person(PersonId(1));

    let path = find_connection(&provider, a, c, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .expect("the backward side alone can reach the start");
    assert_eq!(path.hop_count(), 2);
    assert_eq!(path.start().id, PersonId(1));
    assert_eq!(path.end().id, PersonId(3));
}

// ============================================================================
// 3. One broken person: the other route still connects
// ============================================================================

#[tokio::test]
async fn broken_intermediate_person_is_routed_around() {
    let (graph, a, c) = two_route_graph();
    // b's filmography is unreachable; the a-d-c route must still be found
    let provider = FlakyProvider::new(graph).break_person(PersonId(2));

    let path = find_connection(&provider, a, c, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .expect("second route must survive");
    assert_eq!(path.hop_count(), 2);
    assert!(path.nodes().iter().any(|n| n.label() == "w13"));
}

// ============================================================================
// 4. One broken work: skipped, the level continues
// ============================================================================

#[tokio::test]
async fn broken_work_is_skipped_not_fatal() {
    let (graph, a, c) = two_route_graph();
    let provider = FlakyProvider::new(graph).break_work(WorkId(11));

    let path = find_connection(&provider, a, c, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .expect("route through the intact work must be found");
    assert_eq!(path.hop_count(), 2);
    assert!(path.nodes().iter().all(|n| n.label() != "w11"));
}

// ============================================================================
// 5. Fan-out caps bound lookups per level
// ============================================================================

#[tokio::test]
async fn works_cap_limits_cast_lookups() {
    // One person with many films, none of which connect anywhere.
    let graph = MemoryGraph::new();
    let a = graph.add_person(PersonId(1), "prolific");
    let b = graph.add_person(PersonId(2), "elsewhere");
    for i in 0..20 {
        graph.add_work(WorkId(100 + i), format!("solo-{i}"));
        graph.add_credit(PersonId(1), WorkId(100 + i));
    }

    let counted = CountingCast::new(graph);
    let config = SearchConfig {
        max_levels: 1,
        max_works_per_person: 3,
        max_cast_per_work: 50,
    };
    let found = find_connection(&counted, a, b, &config, &NoProgress).await.unwrap();

    assert!(found.is_none());
    assert!(
        *counted.cast_calls.lock() <= 3,
        "cap of 3 works must bound cast lookups, saw {}",
        *counted.cast_calls.lock(),
    );
}

struct CountingCast {
    inner: MemoryGraph,
    cast_calls: Mutex<usize>,
}

impl CountingCast {
    fn new(inner: MemoryGraph) -> Self {
        Self { inner, cast_calls: Mutex::new(0) }
    }
}

#[async_trait]
impl GraphProvider for CountingCast {
    async fn find_person(&self, name: &str) -> costar::Result<Option<Person>> {
        self.inner.find_person(name).await
    }

    async fn works_for(&self, person: PersonId) -> costar::Result<Vec<Work>> {
        self.inner.works_for(person).await
    }

    async fn cast_of(&self, work: WorkId) -> costar::Result<Vec<Person>> {
        *self.cast_calls.lock() += 1;
        self.inner.cast_of(work).await
    }
}

// ============================================================================
// 6. Progress reporting: one message per level per side
// ============================================================================

#[tokio::test]
async fn progress_reports_each_level_for_each_side() {
    // two disjoint chains: both frontiers keep growing, but never meet
    let graph = MemoryGraph::new();
    let a = graph.add_person(PersonId(1), "alpha");
    graph.add_person(PersonId(2), "alpha-friend");
    graph.add_person(PersonId(3), "alpha-stranger");
    let b = graph.add_person(PersonId(11), "omega");
    graph.add_person(PersonId(12), "omega-friend");
    graph.add_person(PersonId(13), "omega-stranger");
    for (work, x, y) in [
        (WorkId(21), PersonId(1), PersonId(2)),
        (WorkId(22), PersonId(2), PersonId(3)),
        (WorkId(23), PersonId(11), PersonId(12)),
        (WorkId(24), PersonId(12), PersonId(13)),
    ] {
        graph.add_work(work, format!("w{}", work.0));
        graph.add_credit(x, work);
        graph.add_credit(y, work);
    }

    let messages: Mutex<Vec<String>> = Mutex::new(Vec::new());
    let sink = FnSink(|msg: &str| messages.lock().push(msg.to_string()));

    let found = find_connection(
        &graph,
        a,
        b,
        &SearchConfig::default().with_max_levels(2),
        &sink,
    )
    .await
    .unwrap();
    assert!(found.is_none());

    let seen = messages.lock();
    assert_eq!(seen.len(), 4, "two levels, two sides: {seen:?}");
    assert!(seen[0].contains("level 1"));
    assert!(seen[0].contains("alpha"));
    assert!(seen[1].contains("omega"));
    assert!(seen[2].contains("level 2"));
}

// ============================================================================
// 7. Progress failures never reach the search
// ============================================================================

#[tokio::test]
async fn silent_sink_does_not_affect_the_search() {
    // A sink that drops everything is indistinguishable from one that works.
    let (graph, a, c) = two_route_graph();
    let dropped = FnSink(|_msg: &str| {});

    let path = find_connection(&graph, a, c, &SearchConfig::default(), &dropped)
        .await
        .unwrap();
    assert!(path.is_some());
}
