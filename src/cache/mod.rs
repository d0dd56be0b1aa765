//! Language-scoped content caching with request coalescing.
//!
//! Three pieces cooperate here:
//!
//! - [`entry`]: the per-key lifecycle state (`Pending -> Ready | Error`,
//!   plus the explicit retry/refresh re-arms)
//! - [`coordinator`]: at most one in-flight generation call per key, with
//!   key-tagged responses for stale-response detection
//! - [`store`]: the [`ContentCache`] facade tying lookups, requests, and
//!   eviction together
//!
//! # Concurrency model
//!
//! All generation work is asynchronous I/O against the injected
//! [`ContentGenerator`](crate::generator::ContentGenerator); the only shared
//! mutable state is the entry map and the in-flight table, each behind a
//! mutex that is never held across an await. Writes for one key always flow
//! through the coalescing path, so two writers never race on the same key;
//! writes to distinct keys proceed independently and may complete in any
//! order.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use roadweave::cache::ContentCache;
//! use roadweave::generator::{ContentGenerator, GenerationError};
//! use roadweave::types::{Language, TopicId, TopicRef};
//!
//! struct EchoGenerator;
//!
//! #[async_trait]
//! impl ContentGenerator for EchoGenerator {
//!     async fn generate(
//!         &self,
//!         topic_label: &str,
//!         language: &Language,
//!     ) -> Result<String, GenerationError> {
//!         Ok(format!("{topic_label} in {language}"))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = ContentCache::new();
//! let topic = TopicRef::new(TopicId::from("t1"), "HTML");
//! let text = cache
//!     .request(&topic, &Language::English, Arc::new(EchoGenerator))
//!     .await
//!     .unwrap();
//! assert_eq!(text, "HTML in english");
//! # }
//! ```

mod coordinator;
mod entry;
mod store;

pub use coordinator::{Dispatch, RequestCoordinator, SharedGeneration};
pub use entry::{CacheEntry, CacheState, CacheStatus};
pub use store::{CacheConfig, CacheError, ContentCache, EvictionPolicy};
