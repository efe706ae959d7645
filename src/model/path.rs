//! Path — a sequence of strictly alternating person and work nodes.

use serde::{Deserialize, Serialize};

use super::{GraphNode, Person, Work};

/// A connection path: person -[work]- person -[work]- person ...
///
/// Always starts and ends on a person, always has odd length. Paths are
/// extended by copy, never in place: many frontier paths share a prefix
/// and a stored path must never be mutated under them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<GraphNode>,
}

impl Path {
    /// The trivial zero-hop path: one person, no works.
    pub fn single(person: Person) -> Self {
        Self { nodes: vec![GraphNode::Person(person)] }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Person-to-person steps: (len - 1) / 2.
    pub fn hop_count(&self) -> usize {
        (self.nodes.len() - 1) / 2
    }

    pub fn start(&self) -> &Person {
        self.nodes
            .first()
            .and_then(GraphNode::as_person)
            .expect("Path always starts on a person")
    }

    /// The person at the tip of the path — the one the next hop expands from.
    pub fn end(&self) -> &Person {
        self.nodes
            .last()
            .and_then(GraphNode::as_person)
            .expect("Path always ends on a person")
    }

    /// Extend by one hop: `self + [work, person]`, built as a fresh sequence.
    pub fn extended(&self, work: Work, person: Person) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 2);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(GraphNode::Work(work));
        nodes.push(GraphNode::Person(person));
        Self { nodes }
    }

    /// Assemble the full path at a meeting point.
    ///
    /// `forward` runs start → a, where `work` is in a's filmography.
    /// `backward` runs end → c, where c is in `work`'s cast.
    /// Result: `forward + [work] + reverse(backward)`, i.e. start → a, work,
    /// c → end, with no node duplicated at the seam.
    pub fn connect(forward: &Path, work: Work, backward: &Path) -> Self {
        let mut nodes =
            Vec::with_capacity(forward.nodes.len() + 1 + backward.nodes.len());
        nodes.extend_from_slice(&forward.nodes);
        nodes.push(GraphNode::Work(work));
        nodes.extend(backward.nodes.iter().rev().cloned());
        Self { nodes }
    }

    /// True if node kinds strictly alternate person/work, starting and
    /// ending on a person.
    pub fn is_alternating(&self) -> bool {
        self.nodes.len() % 2 == 1
            && self
                .nodes
                .iter()
                .enumerate()
                .all(|(i, n)| if i % 2 == 0 { n.is_person() } else { n.is_work() })
    }

    /// Rebuild this path from a transformed node sequence.
    ///
    /// Used by annotators: same length, same order, same identities — only
    /// display fields may differ. Not checked here; annotators own that
    /// contract.
    pub fn with_nodes(nodes: Vec<GraphNode>) -> Self {
        Self { nodes }
    }

    /// Consume the path, yielding its nodes.
    pub fn into_nodes(self) -> Vec<GraphNode> {
        self.nodes
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            if !first {
                write!(f, " -- ")?;
            }
            first = false;
            match node {
                GraphNode::Person(p) => write!(f, "{}", p.name)?,
                GraphNode::Work(w) => write!(f, "[{}]", w.title)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
