//! End-to-end tests for path annotation.
//!
//! Annotation decorates a finished path without disturbing the search
//! result: same nodes, same order, same identities. A failed decoration for
//! one node leaves just that node bare.

use async_trait::async_trait;
use costar::annotate::Annotator;
use costar::{
    find_connection, GraphNode, MemoryGraph, NoAnnotator, NoProgress, PersonId, SearchConfig,
    WorkId,
};
use pretty_assertions::assert_eq;

/// Annotator that "finds" a GIF for every node except chosen labels, where
/// the decoration fails and degrades to no image.
struct StubAnnotator {
    failing_labels: Vec<String>,
}

#[async_trait]
impl Annotator for StubAnnotator {
    async fn annotate(&self, path: costar::Path) -> costar::Path {
        let nodes = path
            .into_nodes()
            .into_iter()
            .map(|node| {
                let url = if self.failing_labels.iter().any(|l| l == node.label()) {
                    None
                } else {
                    Some(format!("https://gif.example/{}", node.label()))
                };
                match node {
                    GraphNode::Person(mut p) => {
                        p.gif_url = url;
                        GraphNode::Person(p)
                    }
                    GraphNode::Work(mut w) => {
                        w.gif_url = url;
                        GraphNode::Work(w)
                    }
                }
            })
            .collect();
        costar::Path::with_nodes(nodes)
    }
}

fn costar_graph() -> (MemoryGraph, costar::Person, costar::Person) {
    let graph = MemoryGraph::new();
    let a = graph.add_person(PersonId(1), "Keanu Reeves");
    let b = graph.add_person(PersonId(2), "Carrie-Anne Moss");
    graph.add_work(WorkId(10), "The Matrix");
    graph.add_credit(PersonId(1), WorkId(10));
    graph.add_credit(PersonId(2), WorkId(10));
    (graph, a, b)
}

#[tokio::test]
async fn annotation_preserves_order_and_identities() {
    let (graph, a, b) = costar_graph();
    let path = find_connection(&graph, a, b, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .unwrap();

    let before: Vec<String> = path.nodes().iter().map(|n| n.label().to_string()).collect();
    let annotator = StubAnnotator { failing_labels: vec![] };
    let annotated = annotator.annotate(path).await;

    let after: Vec<String> = annotated.nodes().iter().map(|n| n.label().to_string()).collect();
    assert_eq!(before, after);
    assert!(annotated.is_alternating());
    assert!(annotated.nodes().iter().all(|n| match n {
        GraphNode::Person(p) => p.gif_url.is_some(),
        GraphNode::Work(w) => w.gif_url.is_some(),
    }));
}

#[tokio::test]
async fn one_failed_decoration_degrades_to_that_node_only() {
    let (graph, a, b) = costar_graph();
    let path = find_connection(&graph, a, b, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .unwrap();

    let annotator = StubAnnotator { failing_labels: vec!["The Matrix".into()] };
    let annotated = annotator.annotate(path).await;

    for node in annotated.nodes() {
        let url = match node {
            GraphNode::Person(p) => &p.gif_url,
            GraphNode::Work(w) => &w.gif_url,
        };
        if node.label() == "The Matrix" {
            assert!(url.is_none(), "failed node stays bare");
        } else {
            assert!(url.is_some(), "other nodes keep their decoration");
        }
    }
}

#[tokio::test]
async fn no_annotator_returns_the_search_result_untouched() {
    let (graph, a, b) = costar_graph();
    let path = find_connection(&graph, a, b, &SearchConfig::default(), &NoProgress)
        .await
        .unwrap()
        .unwrap();

    let annotated = NoAnnotator.annotate(path.clone()).await;
    assert_eq!(annotated, path);
}
