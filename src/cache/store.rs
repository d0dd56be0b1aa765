//! The language-scoped content cache.
//!
//! [`ContentCache`] is the single source of truth for generated topic text,
//! keyed by `(topic, language)`. Lookups are pure; requests route through a
//! [`RequestCoordinator`] so that concurrent callers for the same key share
//! exactly one generation call, and a dispatched call always runs to
//! completion and populates the cache even when its callers have navigated
//! away.

use miette::Diagnostic;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use futures_util::FutureExt;

use super::coordinator::RequestCoordinator;
use super::entry::{CacheEntry, CacheState, CacheStatus};
use crate::generator::{ContentGenerator, GenerationError};
use crate::types::{CacheKey, Language, TopicId, TopicRef};

/// Bound on how many entries the cache retains.
///
/// The store never evicts pending entries; a bound only removes the
/// least-recently-requested terminal (ready or error) entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Keep every entry for the lifetime of the cache.
    Unbounded,
    /// Retain at most this many entries.
    Capacity(usize),
}

/// Configuration for a [`ContentCache`].
///
/// # Examples
///
/// ```rust
/// use roadweave::cache::{CacheConfig, EvictionPolicy};
///
/// let config = CacheConfig::default().with_eviction(EvictionPolicy::Capacity(256));
/// assert_eq!(config.eviction, EvictionPolicy::Capacity(256));
/// ```
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub eviction: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            eviction: Self::resolve_eviction(None),
        }
    }
}

impl CacheConfig {
    /// Resolve the eviction policy, falling back to the
    /// `ROADWEAVE_CACHE_CAPACITY` environment variable and finally to
    /// unbounded retention.
    fn resolve_eviction(provided: Option<EvictionPolicy>) -> EvictionPolicy {
        if let Some(policy) = provided {
            return policy;
        }
        dotenvy::dotenv().ok();
        match std::env::var("ROADWEAVE_CACHE_CAPACITY")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
        {
            Some(capacity) if capacity > 0 => EvictionPolicy::Capacity(capacity),
            _ => EvictionPolicy::Unbounded,
        }
    }

    #[must_use]
    pub fn new(eviction: Option<EvictionPolicy>) -> Self {
        Self {
            eviction: Self::resolve_eviction(eviction),
        }
    }

    #[must_use]
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }
}

/// Errors raised by the explicit cache state transitions.
///
/// Ordinary generation failures surface as [`GenerationError`]; this type
/// covers callers driving the entry state machine illegally.
#[derive(Debug, Error, Diagnostic)]
pub enum CacheError {
    /// `retry` was called on an entry that is not in the error state.
    #[error("retry is only legal from the error state, found {found}")]
    #[diagnostic(
        code(roadweave::cache::not_retryable),
        help("Only a failed generation can be retried; pending and ready entries are left alone.")
    )]
    NotRetryable { found: CacheStatus },

    /// `refresh` was called on an entry that is not ready.
    #[error("refresh is only legal from the ready state, found {found}")]
    #[diagnostic(code(roadweave::cache::not_refreshable))]
    NotRefreshable { found: CacheStatus },

    /// `retry`/`refresh` was called for a key with no entry at all.
    #[error("no cache entry for {key}")]
    #[diagnostic(code(roadweave::cache::no_entry))]
    NoEntry { key: CacheKey },

    /// The re-dispatched generation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generation(#[from] GenerationError),
}

struct CacheInner {
    entries: Mutex<FxHashMap<CacheKey, CacheEntry>>,
    coordinator: RequestCoordinator,
    config: CacheConfig,
    clock: AtomicU64,
}

impl CacheInner {
    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Terminal transition: write the generation outcome, settle the
    /// in-flight record, and apply the eviction bound.
    fn complete(&self, key: &CacheKey, result: &Result<String, GenerationError>) {
        let mut entries = self.entries.lock();
        let tick = self.tick();
        let entry = entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::pending(key.clone(), tick));
        entry.touched = tick;
        entry.state = match result {
            Ok(content) => {
                tracing::debug!(%key, bytes = content.len(), "generation ready");
                CacheState::Ready {
                    content: content.clone(),
                }
            }
            Err(error) => {
                tracing::warn!(%key, %error, "generation failed");
                CacheState::Error {
                    error: error.clone(),
                }
            }
        };
        self.coordinator.settle(key);
        self.enforce_capacity(&mut entries);
    }

    fn enforce_capacity(&self, entries: &mut FxHashMap<CacheKey, CacheEntry>) {
        let EvictionPolicy::Capacity(capacity) = self.config.eviction else {
            return;
        };
        while entries.len() > capacity {
            let victim = entries
                .values()
                .filter(|e| !e.is_pending())
                .min_by_key(|e| e.touched)
                .map(|e| e.key.clone());
            let Some(key) = victim else {
                // Every entry is pending; the bound waits for them to settle.
                break;
            };
            tracing::debug!(%key, "evicting least-recently-requested entry");
            entries.remove(&key);
        }
    }
}

/// Keyed store of generated text per (topic, language) with status tracking.
///
/// Cheap to clone: clones share the same underlying state, so one cache can
/// be handed to the display binding, background tasks, and tests alike.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use roadweave::cache::ContentCache;
/// use roadweave::generator::ContentGenerator;
/// use roadweave::types::{Language, TopicRef, TopicId};
///
/// # async fn example(generator: Arc<dyn ContentGenerator>) {
/// let cache = ContentCache::new();
/// let topic = TopicRef::new(TopicId::from("t1"), "HTML");
///
/// let text = cache
///     .request(&topic, &Language::English, generator.clone())
///     .await
///     .unwrap();
///
/// // Second call is served from the cache; the generator is not invoked.
/// let again = cache
///     .request(&topic, &Language::English, generator)
///     .await
///     .unwrap();
/// assert_eq!(text, again);
/// # }
/// ```
#[derive(Clone)]
pub struct ContentCache {
    inner: Arc<CacheInner>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    /// A cache with configuration resolved from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(FxHashMap::default()),
                coordinator: RequestCoordinator::new(),
                config,
                clock: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// The coordinator carrying this cache's in-flight bookkeeping.
    #[must_use]
    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.inner.coordinator
    }

    /// Pure lookup. A miss is the normal pre-generation state, not an
    /// error, and the lookup leaves the entry untouched (recency included).
    #[must_use]
    pub fn get(&self, topic: &TopicId, language: &Language) -> Option<CacheEntry> {
        let key = CacheKey::new(topic.clone(), language.clone());
        self.inner.entries.lock().get(&key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    /// Resolve the content for `(topic, language)`, generating it at most
    /// once.
    ///
    /// - Ready entry: resolves immediately, no generator call.
    /// - Pending entry: joins the single in-flight call.
    /// - Error entry: replays the stored error; only [`retry`](Self::retry)
    ///   re-arms a failed key.
    /// - No entry: dispatches one generation call. The call is spawned and
    ///   runs to completion even if this caller is dropped mid-flight, so
    ///   the cache is populated for whoever returns to the topic.
    ///
    /// An empty generator response violates the generator contract and is
    /// stored as [`GenerationError::InvalidResponse`].
    pub async fn request(
        &self,
        topic: &TopicRef,
        language: &Language,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<String, GenerationError> {
        let key = CacheKey::new(topic.id.clone(), language.clone());
        // Entry inspection and dispatch happen under one lock so a terminal
        // transition cannot slip between them; lock order (entries, then
        // in-flight) matches the completion path.
        let dispatch = {
            let mut entries = self.inner.entries.lock();
            match entries.get_mut(&key) {
                Some(entry) => match &entry.state {
                    CacheState::Ready { content } => {
                        let content = content.clone();
                        entry.touched = self.inner.tick();
                        tracing::debug!(%key, "cache hit");
                        return Ok(content);
                    }
                    CacheState::Error { error } => {
                        tracing::debug!(%key, "replaying cached error");
                        return Err(error.clone());
                    }
                    CacheState::Pending => {}
                },
                None => {
                    let tick = self.inner.tick();
                    entries.insert(key.clone(), CacheEntry::pending(key.clone(), tick));
                }
            }

            let inner = Arc::clone(&self.inner);
            let label = topic.label.clone();
            let lang = language.clone();
            let generation_key = key.clone();
            self.inner.coordinator.dispatch(key, move || {
                async move {
                    let result = match generator.generate(&label, &lang).await {
                        Ok(text) if text.trim().is_empty() => {
                            Err(GenerationError::InvalidResponse(
                                "generator returned empty content".into(),
                            ))
                        }
                        other => other,
                    };
                    inner.complete(&generation_key, &result);
                    result
                }
                .boxed()
            })
        };
        if !dispatch.was_coalesced() {
            // Runs to completion even if every caller is dropped.
            tokio::spawn(dispatch.future());
        }
        dispatch.wait().await
    }

    /// Re-arm a failed key: clears the error entry and requests again.
    ///
    /// Only legal from the error state (`ERROR -> PENDING` in the entry
    /// state machine).
    pub async fn retry(
        &self,
        topic: &TopicRef,
        language: &Language,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<String, CacheError> {
        self.clear_for_redispatch(topic, language, CacheStatus::Error)?;
        Ok(self.request(topic, language, generator).await?)
    }

    /// Regenerate a ready key: clears the entry and requests again
    /// (`READY -> PENDING`, the only legal exit from ready).
    pub async fn refresh(
        &self,
        topic: &TopicRef,
        language: &Language,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<String, CacheError> {
        self.clear_for_redispatch(topic, language, CacheStatus::Ready)?;
        Ok(self.request(topic, language, generator).await?)
    }

    fn clear_for_redispatch(
        &self,
        topic: &TopicRef,
        language: &Language,
        expected: CacheStatus,
    ) -> Result<(), CacheError> {
        let key = CacheKey::new(topic.id.clone(), language.clone());
        let mut entries = self.inner.entries.lock();
        let Some(entry) = entries.get(&key) else {
            return Err(CacheError::NoEntry { key });
        };
        let found = entry.status();
        if found != expected {
            return Err(match expected {
                CacheStatus::Error => CacheError::NotRetryable { found },
                _ => CacheError::NotRefreshable { found },
            });
        }
        tracing::debug!(%key, %found, "clearing entry for re-dispatch");
        entries.remove(&key);
        Ok(())
    }
}
