//! The display binding between renderer selection events and the cache.
//!
//! The renderer consumes a [`Roadmap`](crate::graph::Roadmap) read-only and
//! emits topic-selected events; this module turns those events into cache
//! requests and decides what the display may show. Generation calls are
//! never cancelled when the selection moves on — the call completes and
//! populates the cache — but a response whose originating key no longer
//! matches the active `(topic, language)` selection is discarded for
//! display purposes (the soft staleness check).
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roadweave::cache::ContentCache;
//! use roadweave::generator::ContentGenerator;
//! use roadweave::selection::SelectionBinding;
//! use roadweave::types::{Language, TopicId, TopicRef};
//!
//! # async fn example(generator: Arc<dyn ContentGenerator>) {
//! let binding = SelectionBinding::new(ContentCache::new(), generator);
//! binding.set_language(Language::French);
//!
//! let topic = TopicRef::new(TopicId::from("t1"), "HTML");
//! match binding.resolve(&topic).await {
//!     Some(Ok(content)) => println!("{content}"),
//!     Some(Err(error)) => eprintln!("show retry affordance: {error}"),
//!     None => {} // stale: the user already selected something else
//! }
//! # }
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

use crate::cache::ContentCache;
use crate::generator::{ContentGenerator, GenerationError};
use crate::types::{CacheKey, Language, TopicRef};

/// Event emitted by the renderer when a topic node is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicSelected {
    pub topic: TopicRef,
}

impl TopicSelected {
    #[must_use]
    pub fn new(topic: TopicRef) -> Self {
        Self { topic }
    }
}

/// A non-stale resolution forwarded to the display, tagged with the key it
/// belongs to. Error outcomes are forwarded too: the display renders them as
/// a retry affordance, distinct from the pending spinner.
#[derive(Clone, Debug)]
pub struct ContentUpdate {
    pub key: CacheKey,
    pub outcome: Result<String, GenerationError>,
}

/// Tracks the active `(topic, language)` selection and resolves content for
/// it through the cache.
pub struct SelectionBinding {
    cache: ContentCache,
    generator: Arc<dyn ContentGenerator>,
    language: Mutex<Language>,
    active: Mutex<Option<CacheKey>>,
}

impl SelectionBinding {
    #[must_use]
    pub fn new(cache: ContentCache, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            cache,
            generator,
            language: Mutex::new(Language::default()),
            active: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language.lock().clone()
    }

    /// Switch the display language.
    ///
    /// The active selection is re-keyed to the new language, so a response
    /// still in flight for the old language resolves as stale for display.
    /// Stored entries are untouched: every (topic, language) pair keeps its
    /// own independent cache slot.
    pub fn set_language(&self, language: Language) {
        *self.language.lock() = language.clone();
        if let Some(active) = self.active.lock().as_mut() {
            active.language = language;
        }
    }

    /// Record `topic` as the active selection under the current language and
    /// return the cache key a matching response must carry.
    pub fn select(&self, topic: &TopicRef) -> CacheKey {
        let key = CacheKey::new(topic.id.clone(), self.language());
        *self.active.lock() = Some(key.clone());
        key
    }

    /// The currently active selection, if any.
    #[must_use]
    pub fn selected(&self) -> Option<CacheKey> {
        self.active.lock().clone()
    }

    pub fn clear_selection(&self) {
        *self.active.lock() = None;
    }

    /// Select `topic` and resolve its content, discarding stale responses.
    ///
    /// Returns `None` when the active selection changed while the request
    /// was in flight; the generation still completed and populated the
    /// cache for a later return to the topic.
    pub async fn resolve(&self, topic: &TopicRef) -> Option<Result<String, GenerationError>> {
        self.resolve_update(topic).await.map(|update| update.outcome)
    }

    /// Like [`resolve`](Self::resolve), keeping the originating key attached.
    pub async fn resolve_update(&self, topic: &TopicRef) -> Option<ContentUpdate> {
        let key = self.select(topic);
        let language = key.language.clone();
        let outcome = self
            .cache
            .request(topic, &language, Arc::clone(&self.generator))
            .await;
        if self.selected().as_ref() == Some(&key) {
            Some(ContentUpdate { key, outcome })
        } else {
            tracing::debug!(%key, "discarding stale response");
            None
        }
    }

    /// Consume renderer selection events until the channel closes,
    /// forwarding non-stale outcomes to `updates`.
    ///
    /// Each event is handled on its own task: a slow generation never blocks
    /// later selections, and selecting away does not cancel it.
    pub async fn pump(
        self: Arc<Self>,
        events: flume::Receiver<TopicSelected>,
        updates: flume::Sender<ContentUpdate>,
    ) {
        while let Ok(TopicSelected { topic }) = events.recv_async().await {
            let binding = Arc::clone(&self);
            let updates = updates.clone();
            tokio::spawn(async move {
                if let Some(update) = binding.resolve_update(&topic).await {
                    let _ = updates.send_async(update).await;
                }
            });
        }
    }
}
