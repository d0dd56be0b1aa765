//! The canonical, immutable roadmap graph representation.
//!
//! A [`Roadmap`] is validated on construction and read-only afterwards:
//! additive user edges go through [`Roadmap::with_edge`], which returns a new
//! value instead of mutating in place. Invalid graphs fail fast with a
//! [`LayoutError`] so they can never reach a renderer.

use miette::Diagnostic;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EdgeId, EdgeKind, NodeId, NodeKind, RoadmapId, TopicId};
use crate::utils::ids::derive_id;

/// A 2D position on the rendering grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One node of a roadmap graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub description: String,
    pub position: Position,
}

impl Node {
    #[must_use]
    pub fn new(
        id: NodeId,
        kind: NodeKind,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            description: description.into(),
            position,
        }
    }
}

/// One directed edge of a roadmap graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub animated: bool,
}

impl Edge {
    /// Build the edge `source -> target` with a derived id.
    #[must_use]
    pub fn link(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        let id = EdgeId::between(&source, &target, kind);
        Self {
            id,
            source,
            target,
            kind,
            animated: false,
        }
    }

    /// Mark this edge as animated (the final step into the exit node).
    #[must_use]
    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }
}

/// Structural errors raised while constructing or extending a roadmap.
///
/// These indicate malformed input, not runtime conditions: they are raised
/// synchronously and are not retried.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two nodes carry the same id.
    #[error("duplicate node id: {id}")]
    #[diagnostic(
        code(roadweave::graph::duplicate_node),
        help("Node ids are derived from topic ids; check the topic list for duplicates.")
    )]
    DuplicateNode { id: NodeId },

    /// Two topics in the input list carry the same id.
    #[error("duplicate topic id: {id}")]
    #[diagnostic(
        code(roadweave::graph::duplicate_topic),
        help("Every topic in one list must have a unique id.")
    )]
    DuplicateTopic { id: TopicId },

    /// A topic was supplied with an empty title.
    #[error("topic {id} has an empty title")]
    #[diagnostic(
        code(roadweave::graph::empty_title),
        help("Titles label content nodes and seed generation prompts; they cannot be empty.")
    )]
    EmptyTitle { id: TopicId },

    /// An edge references a node id that does not exist in the roadmap.
    #[error("edge {edge} references unknown node {node}")]
    #[diagnostic(code(roadweave::graph::dangling_edge))]
    DanglingEdge { edge: EdgeId, node: NodeId },

    /// A non-empty roadmap must contain exactly one entry node.
    #[error("expected exactly one entry node, found {found}")]
    #[diagnostic(code(roadweave::graph::entry_count))]
    EntryCount { found: usize },

    /// A non-empty roadmap must contain exactly one exit node.
    #[error("expected exactly one exit node, found {found}")]
    #[diagnostic(code(roadweave::graph::exit_count))]
    ExitCount { found: usize },

    /// An edge may not connect a node to itself.
    #[error("self-loop on node {node}")]
    #[diagnostic(code(roadweave::graph::self_loop))]
    SelfLoop { node: NodeId },
}

/// Serde-facing shape of a roadmap, decoupled from the validated type.
///
/// Deserialization funnels through [`Roadmap::try_from`] so that persisted
/// graphs re-run the same structural validation as freshly built ones.
#[derive(Debug, Deserialize)]
pub(crate) struct RoadmapParts {
    id: RoadmapId,
    title: String,
    description: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// The full directed graph of topics for one subject, immutable once built.
///
/// # Invariants
///
/// - Node ids are unique; every edge endpoint references an existing node.
/// - A non-empty roadmap has exactly one entry and one exit node.
/// - No self-loops.
///
/// # Examples
///
/// ```rust
/// use roadweave::graph::{Edge, Node, Position, Roadmap};
/// use roadweave::types::{EdgeKind, NodeId, NodeKind};
///
/// let entry = Node::new(
///     NodeId::for_entry("Demo"),
///     NodeKind::Entry,
///     "Demo",
///     "Start here",
///     Position::default(),
/// );
/// let exit = Node::new(
///     NodeId::for_exit("Demo"),
///     NodeKind::Exit,
///     "Goal",
///     "Done",
///     Position::new(0.0, 100.0),
/// );
/// let edge = Edge::link(entry.id.clone(), exit.id.clone(), EdgeKind::Sequential);
///
/// let roadmap = Roadmap::new("Demo", "A tiny roadmap", vec![entry, exit], vec![edge]).unwrap();
/// assert_eq!(roadmap.nodes().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoadmapParts")]
pub struct Roadmap {
    id: RoadmapId,
    title: String,
    description: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Roadmap {
    /// Validate and assemble a roadmap from parts.
    ///
    /// The roadmap id is a stable hash of the title and node ids, so the
    /// same construction always produces the same id.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for duplicate node ids, dangling edge
    /// references, self-loops, or a wrong entry/exit count on non-empty
    /// input.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Result<Self, LayoutError> {
        let title = title.into();
        validate(&nodes, &edges)?;
        let mut discriminator = title.clone();
        for node in &nodes {
            discriminator.push('\n');
            discriminator.push_str(node.id.as_str());
        }
        let id = RoadmapId::new(derive_id("roadmap", &discriminator));
        Ok(Self {
            id,
            title,
            description: description.into(),
            nodes,
            edges,
        })
    }

    /// Return a new roadmap with `source -> target` appended.
    ///
    /// Idempotent: if an edge with the same source, target, and kind already
    /// exists, the result is an unchanged clone of `self`. Self-loops and
    /// unknown endpoints are rejected.
    pub fn with_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
        kind: EdgeKind,
    ) -> Result<Self, LayoutError> {
        if source == target {
            return Err(LayoutError::SelfLoop {
                node: source.clone(),
            });
        }
        for endpoint in [source, target] {
            if self.node(endpoint).is_none() {
                return Err(LayoutError::DanglingEdge {
                    edge: EdgeId::between(source, target, kind),
                    node: endpoint.clone(),
                });
            }
        }
        if self
            .edges
            .iter()
            .any(|e| &e.source == source && &e.target == target && e.kind == kind)
        {
            tracing::debug!(%source, %target, %kind, "edge already present, returning unchanged");
            return Ok(self.clone());
        }
        let mut next = self.clone();
        next.edges
            .push(Edge::link(source.clone(), target.clone(), kind));
        Ok(next)
    }

    #[must_use]
    pub fn id(&self) -> &RoadmapId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// All edges leaving `id`.
    pub fn edges_from<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| &e.source == id)
    }

    /// The content node synthesized for `topic`, if present.
    ///
    /// Content node ids are derived from topic ids, so this is a direct
    /// lookup rather than a scan over labels.
    #[must_use]
    pub fn content_node_for(&self, topic: &TopicId) -> Option<&Node> {
        self.node(&NodeId::for_content(topic))
    }

    /// Count nodes of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

impl TryFrom<RoadmapParts> for Roadmap {
    type Error = LayoutError;

    fn try_from(parts: RoadmapParts) -> Result<Self, Self::Error> {
        validate(&parts.nodes, &parts.edges)?;
        Ok(Self {
            id: parts.id,
            title: parts.title,
            description: parts.description,
            nodes: parts.nodes,
            edges: parts.edges,
        })
    }
}

fn validate(nodes: &[Node], edges: &[Edge]) -> Result<(), LayoutError> {
    let mut ids: FxHashSet<&NodeId> = FxHashSet::default();
    for node in nodes {
        if !ids.insert(&node.id) {
            return Err(LayoutError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    if !nodes.is_empty() {
        let entries = nodes.iter().filter(|n| n.kind.is_entry()).count();
        if entries != 1 {
            return Err(LayoutError::EntryCount { found: entries });
        }
        let exits = nodes.iter().filter(|n| n.kind.is_exit()).count();
        if exits != 1 {
            return Err(LayoutError::ExitCount { found: exits });
        }
    }

    for edge in edges {
        if edge.source == edge.target {
            return Err(LayoutError::SelfLoop {
                node: edge.source.clone(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint) {
                return Err(LayoutError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
    }
    Ok(())
}
