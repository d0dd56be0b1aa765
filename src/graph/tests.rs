//! Unit tests for the roadmap model and layout internals.

use super::bucket_capacity;
use super::model::{Edge, LayoutError, Node, Position, Roadmap};
use crate::graph::LayoutEngine;
use crate::topic::Topic;
use crate::types::{EdgeKind, NodeId, NodeKind};

fn node(id: &str, kind: NodeKind) -> Node {
    Node::new(
        NodeId::from(id),
        kind,
        id.to_uppercase(),
        format!("node {id}"),
        Position::default(),
    )
}

fn topics(n: usize) -> Vec<Topic> {
    (0..n)
        .map(|i| Topic::new(format!("t{i}"), format!("Topic {i}"), format!("About {i}")))
        .collect()
}

#[test]
/// An empty roadmap is valid: the entry/exit rule only binds non-empty ones.
fn empty_roadmap_is_valid() {
    let roadmap = Roadmap::new("Empty", "nothing here", vec![], vec![]).unwrap();
    assert!(roadmap.nodes().is_empty());
    assert!(roadmap.edges().is_empty());
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let err = Roadmap::new(
        "Dup",
        "",
        vec![node("a", NodeKind::Entry), node("a", NodeKind::Exit)],
        vec![],
    )
    .unwrap_err();
    assert_eq!(
        err,
        LayoutError::DuplicateNode {
            id: NodeId::from("a")
        }
    );
}

#[test]
fn dangling_edges_are_rejected() {
    let err = Roadmap::new(
        "Dangling",
        "",
        vec![node("a", NodeKind::Entry), node("b", NodeKind::Exit)],
        vec![Edge::link(
            NodeId::from("a"),
            NodeId::from("missing"),
            EdgeKind::Sequential,
        )],
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::DanglingEdge { .. }));
}

#[test]
fn nonempty_roadmap_requires_one_entry_and_one_exit() {
    let err = Roadmap::new("NoExit", "", vec![node("a", NodeKind::Entry)], vec![]).unwrap_err();
    assert_eq!(err, LayoutError::ExitCount { found: 0 });

    let err = Roadmap::new(
        "TwoEntries",
        "",
        vec![
            node("a", NodeKind::Entry),
            node("b", NodeKind::Entry),
            node("c", NodeKind::Exit),
        ],
        vec![],
    )
    .unwrap_err();
    assert_eq!(err, LayoutError::EntryCount { found: 2 });
}

#[test]
fn with_edge_appends_into_a_new_value() {
    let roadmap = Roadmap::new(
        "Two",
        "",
        vec![node("a", NodeKind::Entry), node("b", NodeKind::Exit)],
        vec![],
    )
    .unwrap();
    let extended = roadmap
        .with_edge(&NodeId::from("a"), &NodeId::from("b"), EdgeKind::Sequential)
        .unwrap();
    assert_eq!(roadmap.edges().len(), 0);
    assert_eq!(extended.edges().len(), 1);
    assert_eq!(extended.id(), roadmap.id());
}

#[test]
fn with_edge_is_idempotent() {
    let roadmap = Roadmap::new(
        "Idem",
        "",
        vec![node("a", NodeKind::Entry), node("b", NodeKind::Exit)],
        vec![Edge::link(
            NodeId::from("a"),
            NodeId::from("b"),
            EdgeKind::Sequential,
        )],
    )
    .unwrap();
    let same = roadmap
        .with_edge(&NodeId::from("a"), &NodeId::from("b"), EdgeKind::Sequential)
        .unwrap();
    assert_eq!(same, roadmap);

    // A different kind between the same pair is a distinct edge.
    let cross = roadmap
        .with_edge(&NodeId::from("a"), &NodeId::from("b"), EdgeKind::CrossLink)
        .unwrap();
    assert_eq!(cross.edges().len(), 2);
}

#[test]
fn with_edge_rejects_self_loops() {
    let roadmap = Roadmap::new(
        "Loop",
        "",
        vec![node("a", NodeKind::Entry), node("b", NodeKind::Exit)],
        vec![],
    )
    .unwrap();
    let err = roadmap
        .with_edge(&NodeId::from("a"), &NodeId::from("a"), EdgeKind::Sequential)
        .unwrap_err();
    assert_eq!(
        err,
        LayoutError::SelfLoop {
            node: NodeId::from("a")
        }
    );
}

#[test]
fn roadmap_serde_revalidates_on_load() {
    let roadmap = LayoutEngine::new()
        .synthesize("Frontend", "Web", &topics(3))
        .unwrap();
    let json = serde_json::to_string(&roadmap).unwrap();
    let back: Roadmap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, roadmap);

    // Drop the entry node; deserialization must refuse the dangling graph.
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["nodes"].as_array_mut().unwrap().remove(0);
    assert!(serde_json::from_value::<Roadmap>(value).is_err());
}

#[test]
fn bucket_capacity_collapses_short_lists() {
    assert_eq!(bucket_capacity(1), 4);
    assert_eq!(bucket_capacity(4), 4);
    assert_eq!(bucket_capacity(5), 4);
    assert_eq!(bucket_capacity(16), 4);
    assert_eq!(bucket_capacity(17), 5);
    assert_eq!(bucket_capacity(40), 10);
}

#[test]
fn layout_rejects_duplicate_topic_ids() {
    let mut list = topics(2);
    list[1].id = list[0].id.clone();
    let err = LayoutEngine::new()
        .synthesize("Dup", "", &list)
        .unwrap_err();
    assert!(matches!(err, LayoutError::DuplicateTopic { .. }));
}

#[test]
fn layout_rejects_empty_titles() {
    let mut list = topics(2);
    list[1].title = "   ".into();
    let err = LayoutEngine::new()
        .synthesize("Blank", "", &list)
        .unwrap_err();
    assert!(matches!(err, LayoutError::EmptyTitle { .. }));
}

#[test]
fn category_labels_prefer_the_anchor_hint() {
    let list = vec![
        Topic::new("t1", "HTML", "Structure").with_category_hint("Fundamentals"),
        Topic::new("t2", "CSS", "Style"),
    ];
    let roadmap = LayoutEngine::new().synthesize("Web", "", &list).unwrap();
    let category = roadmap
        .nodes()
        .iter()
        .find(|n| n.kind.is_category())
        .unwrap();
    assert_eq!(category.label, "Fundamentals");
}

#[test]
fn stagger_alternates_within_a_column() {
    let roadmap = LayoutEngine::new()
        .synthesize("Web", "", &topics(3))
        .unwrap();
    let xs: Vec<f64> = roadmap
        .nodes()
        .iter()
        .filter(|n| n.kind.is_content())
        .map(|n| n.position.x)
        .collect();
    assert_eq!(xs, vec![-40.0, 40.0, -40.0]);
}

#[test]
fn skeleton_joins_entry_to_exit() {
    let roadmap = LayoutEngine::new().skeleton("Blank", "empty shape").unwrap();
    assert_eq!(roadmap.nodes().len(), 2);
    assert_eq!(roadmap.edges().len(), 1);
    assert!(roadmap.edges()[0].animated);
    assert_eq!(
        roadmap.count_kind(NodeKind::Entry) + roadmap.count_kind(NodeKind::Exit),
        2
    );
}

#[test]
fn empty_topic_list_produces_the_skeleton_shape() {
    let from_empty = LayoutEngine::new().synthesize("Blank", "empty shape", &[]).unwrap();
    let skeleton = LayoutEngine::new().skeleton("Blank", "empty shape").unwrap();
    assert_eq!(from_empty, skeleton);
}
