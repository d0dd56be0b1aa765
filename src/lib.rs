//! # Roadweave: Roadmap Graph Synthesis & Topic Content Caching
//!
//! Roadweave turns an ordered list of learning topics into a positioned,
//! validated directed graph, and manages asynchronous, language-scoped
//! generation of per-topic text with request de-duplication and
//! stale-response handling.
//!
//! ## Core Concepts
//!
//! - **Topics**: immutable input descriptors for the things to learn
//! - **Roadmap**: the validated, immutable graph of entry, category,
//!   content, and exit nodes
//! - **Layout**: a pure, deterministic function from topic list to roadmap —
//!   stable hashed ids, grid arithmetic, seeded randomness only
//! - **Cache**: one entry per `(topic, language)` with pending/ready/error
//!   tracking and at most one in-flight generation call per key
//! - **Selection**: the display binding that discards responses arriving
//!   after the selection has moved on
//!
//! ## Quick Start
//!
//! ### Synthesizing a roadmap
//!
//! ```
//! use roadweave::graph::LayoutEngine;
//! use roadweave::topic::Topic;
//!
//! let topics = vec![
//!     Topic::new("t1", "HTML", "Structure of web documents"),
//!     Topic::new("t2", "CSS", "Styling and layout"),
//!     Topic::new("t3", "JS", "Behavior and interactivity"),
//! ];
//!
//! let roadmap = LayoutEngine::new()
//!     .synthesize("Frontend Developer", "From markup to apps", &topics)
//!     .expect("well-formed topic list");
//!
//! // Same input, same graph: ids, positions, and edges are reproducible.
//! let again = LayoutEngine::new()
//!     .synthesize("Frontend Developer", "From markup to apps", &topics)
//!     .expect("well-formed topic list");
//! assert_eq!(roadmap, again);
//! ```
//!
//! ### Requesting topic content
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use roadweave::cache::ContentCache;
//! use roadweave::generator::{ContentGenerator, GenerationError};
//! use roadweave::types::{Language, TopicId, TopicRef};
//!
//! struct CannedGenerator;
//!
//! #[async_trait]
//! impl ContentGenerator for CannedGenerator {
//!     async fn generate(
//!         &self,
//!         topic_label: &str,
//!         language: &Language,
//!     ) -> Result<String, GenerationError> {
//!         Ok(format!("# {topic_label}\n\n{}", language.instruction()))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = ContentCache::new();
//! let topic = TopicRef::new(TopicId::from("t1"), "HTML");
//! let generator = Arc::new(CannedGenerator);
//!
//! let text = cache
//!     .request(&topic, &Language::English, generator.clone())
//!     .await
//!     .unwrap();
//!
//! // Concurrent and repeat requests for the same key never re-invoke the
//! // generator; a French request gets its own independent entry.
//! let french = cache
//!     .request(&topic, &Language::French, generator)
//!     .await
//!     .unwrap();
//! assert_ne!(text, french);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Construction errors ([`graph::LayoutError`]) are fatal and synchronous:
//! an invalid graph never reaches a renderer. Generation errors
//! ([`generator::GenerationError`]) are recoverable, land the cache entry in
//! a well-defined error state, and are replayed until an explicit
//! [`cache::ContentCache::retry`]. A cache miss is not an error at all — it
//! is the normal pre-generation state.
//!
//! ## Module Guide
//!
//! - [`types`] - Identity newtypes, languages, and boundary values
//! - [`topic`] - The immutable topic input descriptor
//! - [`graph`] - Roadmap model, validation, and the layout engine
//! - [`cache`] - Content cache, entry lifecycle, request coalescing
//! - [`generator`] - The injected text-generation capability
//! - [`selection`] - Display binding with stale-response handling
//! - [`persistence`] - Opaque roadmap storage gateway
//! - [`telemetry`] - Tracing subscriber bootstrap
//! - [`utils`] - Stable hashing and seeded randomness

pub mod cache;
pub mod generator;
pub mod graph;
pub mod persistence;
pub mod selection;
pub mod telemetry;
pub mod topic;
pub mod types;
pub mod utils;
