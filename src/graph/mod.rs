//! Roadmap graph definition and synthesis.
//!
//! This module carries the two graph-side subsystems:
//!
//! - [`model`]: the canonical, validated, immutable [`Roadmap`] value
//!   (nodes, edges, identity rules)
//! - [`layout`]: the [`LayoutEngine`], a pure function from an ordered
//!   topic list to a positioned roadmap
//!
//! # Quick Start
//!
//! ```rust
//! use roadweave::graph::LayoutEngine;
//! use roadweave::topic::Topic;
//! use roadweave::types::EdgeKind;
//!
//! let topics = vec![
//!     Topic::new("t1", "HTML", "Structure"),
//!     Topic::new("t2", "CSS", "Style"),
//! ];
//! let roadmap = LayoutEngine::new()
//!     .synthesize("Frontend", "Web fundamentals", &topics)
//!     .unwrap();
//!
//! // Additive user edges build a new value; the original is untouched.
//! let t1 = roadmap.content_node_for(&"t1".into()).unwrap().id.clone();
//! let t2 = roadmap.content_node_for(&"t2".into()).unwrap().id.clone();
//! let extended = roadmap.with_edge(&t2, &t1, EdgeKind::CrossLink).unwrap();
//! assert_eq!(extended.edges().len(), roadmap.edges().len() + 1);
//! ```
//!
//! # petgraph Integration
//!
//! With the `petgraph-compat` feature, a [`Roadmap`] converts to a petgraph
//! `DiGraph` for algorithm reuse and DOT visualization:
//!
//! ```ignore
//! // Enable with: roadweave = { features = ["petgraph-compat"] }
//! let pg = roadmap.to_petgraph();
//! assert!(!petgraph::algo::is_cyclic_directed(&pg.graph));
//! std::fs::write("roadmap.dot", roadmap.to_dot())?;
//! ```

mod layout;
mod model;

#[cfg(feature = "petgraph-compat")]
mod petgraph_compat;

#[cfg(test)]
mod tests;

pub use layout::LayoutEngine;
pub use model::{Edge, LayoutError, Node, Position, Roadmap};

#[cfg(feature = "petgraph-compat")]
pub use petgraph_compat::{PetgraphConversion, RoadmapDiGraph};

pub(crate) use layout::bucket_capacity;
