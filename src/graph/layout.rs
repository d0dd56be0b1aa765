//! Deterministic synthesis of a positioned roadmap graph from a topic list.
//!
//! [`LayoutEngine`] is a pure transformation: the same ordered topic list
//! always yields a byte-identical [`Roadmap`] — identical node ids,
//! positions, and edge sets. Positions come from grid arithmetic, ids from
//! stable hashes, and the only probabilistic choice (decorative cross-links)
//! draws from an [`Lcg`] seeded by the deciding topic's id.
//!
//! # Shape of the output
//!
//! ```text
//! entry ──► category 0 ──► t0 ──► t1 ──► t2 ─┐
//!   └─────► category 1 ──► t3 ──► t4 ◄───────┘ (cross-category)
//!                                  └──► exit    (animated)
//! ```
//!
//! Topics are split into at most four contiguous buckets; each non-empty
//! bucket gets a category column, topics stack beneath it with alternating
//! horizontal stagger, and the final topic links into the exit node.
//!
//! # Examples
//!
//! ```rust
//! use roadweave::graph::LayoutEngine;
//! use roadweave::topic::Topic;
//!
//! let topics = vec![
//!     Topic::new("t1", "HTML", "Structure"),
//!     Topic::new("t2", "CSS", "Style"),
//!     Topic::new("t3", "JS", "Behavior"),
//! ];
//! let roadmap = LayoutEngine::new()
//!     .synthesize("Frontend", "Web fundamentals", &topics)
//!     .unwrap();
//!
//! // 3 content + 1 entry + 1 exit + 1 category
//! assert_eq!(roadmap.nodes().len(), 6);
//! assert_eq!(roadmap.edges().len(), 5);
//! ```

use rustc_hash::FxHashSet;
use tracing::instrument;

use super::model::{Edge, LayoutError, Node, Position, Roadmap};
use crate::topic::Topic;
use crate::types::{EdgeKind, NodeId, NodeKind};
use crate::utils::ids::stable_hash;
use crate::utils::rng::Lcg;

/// Maximum number of category buckets a roadmap is split into.
const MAX_BUCKETS: usize = 4;

/// Pure, configurable topic-list-to-graph transformation.
///
/// Configuration uses the fluent `with_*` pattern; all knobs are plain
/// numbers, so two engines with equal configuration are interchangeable.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    column_step: f64,
    row_step: f64,
    stagger: f64,
    cross_link_per_mille: u16,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            column_step: 250.0,
            row_step: 100.0,
            stagger: 40.0,
            cross_link_per_mille: 0,
        }
    }
}

impl LayoutEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal distance between category columns.
    #[must_use]
    pub fn with_column_step(mut self, step: f64) -> Self {
        self.column_step = step;
        self
    }

    /// Vertical distance between stacked topics.
    #[must_use]
    pub fn with_row_step(mut self, step: f64) -> Self {
        self.row_step = step;
        self
    }

    /// Alternating horizontal offset applied to stacked topics.
    #[must_use]
    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    /// Enable decorative cross-links with the given per-mille probability.
    ///
    /// Cross-link decisions are seeded per topic id, so any non-zero value
    /// keeps the output fully deterministic.
    #[must_use]
    pub fn with_cross_links(mut self, per_mille: u16) -> Self {
        self.cross_link_per_mille = per_mille.min(1000);
        self
    }

    /// Synthesize a roadmap from an ordered topic list.
    ///
    /// An empty list yields the skeleton shape: entry and exit joined by one
    /// animated edge.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DuplicateTopic`] or [`LayoutError::EmptyTitle`] for
    /// malformed input; these are programmer errors, not retryable runtime
    /// conditions.
    #[instrument(skip(self, description, topics), fields(topic_count = topics.len()))]
    pub fn synthesize(
        &self,
        title: &str,
        description: &str,
        topics: &[Topic],
    ) -> Result<Roadmap, LayoutError> {
        check_topics(topics)?;

        if topics.is_empty() {
            return self.skeleton(title, description);
        }

        let capacity = bucket_capacity(topics.len());
        let buckets: Vec<&[Topic]> = topics.chunks(capacity).collect();
        debug_assert!(buckets.len() <= MAX_BUCKETS);

        let bucket_count = buckets.len();
        let deepest = buckets.iter().map(|b| b.len()).max().unwrap_or(0);
        let center_x = self.column_step * (bucket_count as f64 - 1.0) / 2.0;

        let mut nodes =
            Vec::with_capacity(topics.len() + bucket_count + 2);
        let mut edges = Vec::with_capacity(topics.len() + 2 * bucket_count);

        let entry_id = NodeId::for_entry(title);
        let exit_id = NodeId::for_exit(title);
        nodes.push(Node::new(
            entry_id.clone(),
            NodeKind::Entry,
            title,
            description,
            Position::new(center_x, 0.0),
        ));

        for (k, bucket) in buckets.iter().enumerate() {
            let column_x = self.column_step * k as f64;
            let anchor = &bucket[0];
            let category_id = NodeId::for_category(&anchor.id);
            let label = anchor
                .category_hint
                .clone()
                .unwrap_or_else(|| format!("Stage {}", k + 1));
            nodes.push(Node::new(
                category_id.clone(),
                NodeKind::Category,
                label,
                format!("{} topics in this stage", bucket.len()),
                Position::new(column_x, self.row_step),
            ));
            edges.push(Edge::link(
                entry_id.clone(),
                category_id.clone(),
                EdgeKind::Sequential,
            ));

            let mut previous = category_id;
            for (i, topic) in bucket.iter().enumerate() {
                let offset = if i % 2 == 0 {
                    -self.stagger
                } else {
                    self.stagger
                };
                let content_id = NodeId::for_content(&topic.id);
                nodes.push(Node::new(
                    content_id.clone(),
                    NodeKind::Content,
                    topic.title.clone(),
                    topic.short_description.clone(),
                    Position::new(column_x + offset, self.row_step * (2.0 + i as f64)),
                ));
                edges.push(Edge::link(previous, content_id.clone(), EdgeKind::Sequential));
                previous = content_id;
            }

            // Bucket boundary: last topic here reaches into the next bucket.
            if let Some(next_bucket) = buckets.get(k + 1) {
                edges.push(Edge::link(
                    NodeId::for_content(&bucket[bucket.len() - 1].id),
                    NodeId::for_content(&next_bucket[0].id),
                    EdgeKind::CrossCategory,
                ));
            }
        }

        nodes.push(Node::new(
            exit_id.clone(),
            NodeKind::Exit,
            "Goal",
            format!("End of the {title} roadmap"),
            Position::new(center_x, self.row_step * (3.0 + deepest as f64)),
        ));
        let last_topic = &topics[topics.len() - 1];
        edges.push(
            Edge::link(
                NodeId::for_content(&last_topic.id),
                exit_id,
                EdgeKind::Sequential,
            )
            .animated(),
        );

        if self.cross_link_per_mille > 0 {
            self.emit_cross_links(&buckets, &mut edges);
        }

        tracing::debug!(
            buckets = bucket_count,
            nodes = nodes.len(),
            edges = edges.len(),
            "synthesized roadmap layout"
        );
        Roadmap::new(title, description, nodes, edges)
    }

    /// The entry-plus-exit shape produced for an empty topic list, exposed
    /// for callers that want it explicitly.
    pub fn skeleton(&self, title: &str, description: &str) -> Result<Roadmap, LayoutError> {
        let entry_id = NodeId::for_entry(title);
        let exit_id = NodeId::for_exit(title);
        let nodes = vec![
            Node::new(
                entry_id.clone(),
                NodeKind::Entry,
                title,
                description,
                Position::new(0.0, 0.0),
            ),
            Node::new(
                exit_id.clone(),
                NodeKind::Exit,
                "Goal",
                format!("End of the {title} roadmap"),
                Position::new(0.0, self.row_step * 2.0),
            ),
        ];
        let edges = vec![Edge::link(entry_id, exit_id, EdgeKind::Sequential).animated()];
        Roadmap::new(title, description, nodes, edges)
    }

    /// Decorative links between non-adjacent topics of the same bucket.
    ///
    /// Each candidate target topic (index >= 2 in its bucket) gets one
    /// seeded draw; on success it links back to a seeded earlier topic that
    /// is not its direct predecessor.
    fn emit_cross_links(&self, buckets: &[&[Topic]], edges: &mut Vec<Edge>) {
        for bucket in buckets {
            for i in 2..bucket.len() {
                let topic = &bucket[i];
                let mut lcg = Lcg::seeded(stable_hash(&["cross-link", topic.id.as_str()]));
                if !lcg.chance(self.cross_link_per_mille) {
                    continue;
                }
                let j = lcg.next_below((i - 1) as u64) as usize;
                edges.push(Edge::link(
                    NodeId::for_content(&bucket[j].id),
                    NodeId::for_content(&topic.id),
                    EdgeKind::CrossLink,
                ));
            }
        }
    }
}

/// Bucket capacity for a list of `n` topics.
///
/// At most [`MAX_BUCKETS`] contiguous buckets; short lists collapse into a
/// single bucket instead of spreading one topic per category.
pub(crate) fn bucket_capacity(n: usize) -> usize {
    n.div_ceil(MAX_BUCKETS).max(MAX_BUCKETS)
}

fn check_topics(topics: &[Topic]) -> Result<(), LayoutError> {
    let mut seen = FxHashSet::default();
    for topic in topics {
        if topic.title.trim().is_empty() {
            return Err(LayoutError::EmptyTitle {
                id: topic.id.clone(),
            });
        }
        if !seen.insert(&topic.id) {
            return Err(LayoutError::DuplicateTopic {
                id: topic.id.clone(),
            });
        }
    }
    Ok(())
}
