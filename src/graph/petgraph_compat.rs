//! Optional petgraph compatibility layer.
//!
//! Converts a [`Roadmap`] into petgraph's `DiGraph`, enabling petgraph's
//! algorithm library (cycle checks, path queries) and DOT export for
//! visual inspection of synthesized layouts.
//!
//! Only available with the `petgraph-compat` feature:
//!
//! ```toml
//! [dependencies]
//! roadweave = { version = "0.1", features = ["petgraph-compat"] }
//! ```

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use super::model::Roadmap;
use crate::types::{EdgeKind, NodeId};

/// Petgraph representation of a roadmap: node weights are labels, edge
/// weights are the [`EdgeKind`].
pub type RoadmapDiGraph = DiGraph<String, EdgeKind>;

/// Result of converting a [`Roadmap`] to petgraph form.
#[derive(Debug, Clone)]
pub struct PetgraphConversion {
    /// The petgraph directed graph.
    pub graph: RoadmapDiGraph,
    /// Mapping from roadmap node ids to petgraph indices.
    pub index_map: FxHashMap<NodeId, NodeIndex>,
}

impl PetgraphConversion {
    /// Look up the petgraph index for a roadmap node id.
    #[must_use]
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index_map.get(id).copied()
    }
}

impl Roadmap {
    /// Convert this roadmap to a petgraph `DiGraph`.
    ///
    /// Construction validation guarantees every edge endpoint resolves, so
    /// the conversion is total.
    #[must_use]
    pub fn to_petgraph(&self) -> PetgraphConversion {
        let mut graph = DiGraph::new();
        let mut index_map: FxHashMap<NodeId, NodeIndex> = FxHashMap::default();
        for node in self.nodes() {
            let idx = graph.add_node(node.label.clone());
            index_map.insert(node.id.clone(), idx);
        }
        for edge in self.edges() {
            let (Some(&source), Some(&target)) =
                (index_map.get(&edge.source), index_map.get(&edge.target))
            else {
                continue;
            };
            graph.add_edge(source, target, edge.kind);
        }
        PetgraphConversion { graph, index_map }
    }

    /// Render this roadmap in Graphviz DOT format.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let conversion = self.to_petgraph();
        format!(
            "{:?}",
            Dot::with_config(&conversion.graph, &[Config::GraphContentOnly])
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::LayoutEngine;
    use crate::topic::Topic;

    fn sample() -> Vec<Topic> {
        vec![
            Topic::new("t1", "HTML", "Structure"),
            Topic::new("t2", "CSS", "Style"),
            Topic::new("t3", "JS", "Behavior"),
        ]
    }

    #[test]
    fn conversion_preserves_counts() {
        let roadmap = LayoutEngine::new()
            .synthesize("Frontend", "Web", &sample())
            .unwrap();
        let pg = roadmap.to_petgraph();
        assert_eq!(pg.graph.node_count(), roadmap.nodes().len());
        assert_eq!(pg.graph.edge_count(), roadmap.edges().len());
    }

    #[test]
    fn synthesized_roadmaps_are_acyclic() {
        let roadmap = LayoutEngine::new()
            .synthesize("Frontend", "Web", &sample())
            .unwrap();
        assert!(!petgraph::algo::is_cyclic_directed(
            &roadmap.to_petgraph().graph
        ));
    }

    #[test]
    fn dot_output_names_labels() {
        let roadmap = LayoutEngine::new()
            .synthesize("Frontend", "Web", &sample())
            .unwrap();
        let dot = roadmap.to_dot();
        assert!(dot.contains("HTML"));
        assert!(dot.contains("Goal"));
    }
}
