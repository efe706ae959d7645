//! Nodes of the bipartite actor–film graph.

use serde::{Deserialize, Serialize};

/// Opaque person identifier, assigned by the graph provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque work (film) identifier, assigned by the graph provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkId(pub u64);

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person in the graph.
///
/// `department` is display-only metadata (e.g. `"Acting"`); graph logic
/// compares identities, never attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Filled by an `Annotator` after the search; never set by the search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            department: None,
            gif_url: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// A work (film) in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    /// Filled by an `Annotator` after the search; never set by the search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
}

impl Work {
    pub fn new(id: WorkId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            gif_url: None,
        }
    }
}

/// A node of the bipartite graph: either a person or a work.
///
/// Serializes with an explicit `kind` tag so a path is wire-framed as an
/// ordered list of `{kind, id, name/title}` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GraphNode {
    Person(Person),
    Work(Work),
}

impl GraphNode {
    pub fn is_person(&self) -> bool {
        matches!(self, GraphNode::Person(_))
    }

    pub fn is_work(&self) -> bool {
        matches!(self, GraphNode::Work(_))
    }

    /// Display label: a person's name or a work's title.
    pub fn label(&self) -> &str {
        match self {
            GraphNode::Person(p) => &p.name,
            GraphNode::Work(w) => &w.title,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            GraphNode::Person(p) => Some(p),
            GraphNode::Work(_) => None,
        }
    }
}

impl From<Person> for GraphNode {
    fn from(p: Person) -> Self {
        GraphNode::Person(p)
    }
}

impl From<Work> for GraphNode {
    fn from(w: Work) -> Self {
        GraphNode::Work(w)
    }
}
