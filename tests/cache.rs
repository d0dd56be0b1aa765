//! Integration tests for the content cache: coalescing, language isolation,
//! state-machine transitions, and eviction.

mod common;
use common::*;

use std::sync::Arc;
use std::time::Duration;

use roadweave::cache::{CacheConfig, CacheError, CacheStatus, ContentCache, EvictionPolicy};
use roadweave::generator::{GenerationError, GenerationErrorKind};
use roadweave::types::Language;

#[tokio::test]
/// Two requests for the same key issued before the first resolves result in
/// exactly one generator call, and both observe the identical string.
async fn concurrent_requests_coalesce() {
    let cache = ContentCache::new();
    let generator = GatedGenerator::new();
    let topic = topic_ref("t1", "HTML");

    let first = cache.request(&topic, &Language::English, generator.clone());
    let second = cache.request(&topic, &Language::English, generator.clone());

    // Both futures are driven concurrently while the generator is blocked.
    let results = tokio::join!(first, second, async {
        // Give both requests a chance to register before opening the gate.
        tokio::task::yield_now().await;
        generator.release(1);
    });

    let a = results.0.unwrap();
    let b = results.1.unwrap();
    assert_eq!(a, b);
    assert_eq!(generator.calls(), 1);
    assert_eq!(cache.coordinator().in_flight_len(), 0);
}

#[tokio::test]
async fn ready_entries_resolve_without_generator_calls() {
    let cache = ContentCache::new();
    let generator = CountingGenerator::new();
    let topic = topic_ref("t1", "HTML");

    let first = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap();
    let second = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
/// English and French accumulate independent entries; neither overwrites
/// the other.
async fn languages_are_isolated() {
    let cache = ContentCache::new();
    let generator = CountingGenerator::new();
    let topic = topic_ref("t1", "HTML");

    let english = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap();
    let french = cache
        .request(&topic, &Language::French, generator.clone())
        .await
        .unwrap();

    assert_ne!(english, french);
    assert_eq!(generator.calls(), 2);

    let english_entry = cache.get(&topic.id, &Language::English).unwrap();
    let french_entry = cache.get(&topic.id, &Language::French).unwrap();
    assert_eq!(english_entry.content(), Some(english.as_str()));
    assert_eq!(french_entry.content(), Some(french.as_str()));
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn get_is_a_pure_miss_before_any_request() {
    let cache = ContentCache::new();
    let topic = topic_ref("t1", "HTML");
    assert!(cache.get(&topic.id, &Language::English).is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
/// A failed generation lands the entry in the error state and the stored
/// error is replayed to later requests without re-invoking the generator.
async fn errors_are_stored_and_replayed() {
    let cache = ContentCache::new();
    let generator = FlakyGenerator::new(usize::MAX, GenerationError::Quota("exhausted".into()));
    let topic = topic_ref("t1", "HTML");

    let err = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), GenerationErrorKind::Quota);

    let entry = cache.get(&topic.id, &Language::English).unwrap();
    assert_eq!(entry.status(), CacheStatus::Error);

    let replayed = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert_eq!(replayed, err);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
/// retry: ERROR -> PENDING -> READY, with the new content replacing the
/// error state.
async fn retry_recovers_a_failed_key() {
    let cache = ContentCache::new();
    let generator = FlakyGenerator::new(1, GenerationError::Network("reset".into()));
    let topic = topic_ref("t1", "HTML");

    let err = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert!(err.is_transient());

    let content = cache
        .retry(&topic, &Language::English, generator.clone())
        .await
        .unwrap();
    assert!(content.contains("recovered"));

    let entry = cache.get(&topic.id, &Language::English).unwrap();
    assert_eq!(entry.status(), CacheStatus::Ready);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn retry_is_rejected_outside_the_error_state() {
    let cache = ContentCache::new();
    let generator = CountingGenerator::new();
    let topic = topic_ref("t1", "HTML");

    // No entry at all.
    let err = cache
        .retry(&topic, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::NoEntry { .. }));

    // Ready entry.
    cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap();
    let err = cache
        .retry(&topic, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CacheError::NotRetryable {
            found: CacheStatus::Ready
        }
    ));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
/// refresh: READY -> PENDING -> READY with regenerated content.
async fn refresh_regenerates_a_ready_key() {
    let cache = ContentCache::new();
    let generator = CountingGenerator::new();
    let topic = topic_ref("t1", "HTML");

    let first = cache
        .request(&topic, &Language::English, generator.clone())
        .await
        .unwrap();
    let refreshed = cache
        .refresh(&topic, &Language::English, generator.clone())
        .await
        .unwrap();

    assert_ne!(first, refreshed);
    assert_eq!(generator.calls(), 2);

    // refresh is not legal from the error state.
    let failing = FlakyGenerator::new(usize::MAX, GenerationError::Quota("no".into()));
    let other = topic_ref("t2", "CSS");
    cache
        .request(&other, &Language::English, failing.clone())
        .await
        .unwrap_err();
    let err = cache
        .refresh(&other, &Language::English, generator.clone())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CacheError::NotRefreshable {
            found: CacheStatus::Error
        }
    ));
}

#[tokio::test]
/// An empty generator response violates the contract and is stored as an
/// invalid-response error.
async fn empty_responses_become_invalid_response_errors() {
    let cache = ContentCache::new();
    let topic = topic_ref("t1", "HTML");

    let err = cache
        .request(&topic, &Language::English, Arc::new(EmptyGenerator))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), GenerationErrorKind::InvalidResponse);
    let entry = cache.get(&topic.id, &Language::English).unwrap();
    assert_eq!(entry.status(), CacheStatus::Error);
}

#[tokio::test]
/// A capacity bound evicts the least-recently-requested terminal entries.
async fn capacity_bound_evicts_oldest_terminal_entries() {
    let cache =
        ContentCache::with_config(CacheConfig::default().with_eviction(EvictionPolicy::Capacity(2)));
    let generator = CountingGenerator::new();

    for id in ["t1", "t2", "t3"] {
        cache
            .request(&topic_ref(id, id), &Language::English, generator.clone())
            .await
            .unwrap();
    }

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&"t1".into(), &Language::English).is_none());
    assert!(cache.get(&"t2".into(), &Language::English).is_some());
    assert!(cache.get(&"t3".into(), &Language::English).is_some());
}

#[tokio::test]
/// Pending entries are never evicted, whatever the bound.
async fn pending_entries_survive_the_capacity_bound() {
    let cache =
        ContentCache::with_config(CacheConfig::default().with_eviction(EvictionPolicy::Capacity(1)));
    let gated = GatedGenerator::new();
    let counting = CountingGenerator::new();
    let pending_topic = topic_ref("t1", "HTML");
    let quick_topic = topic_ref("t2", "CSS");

    let cache_clone = cache.clone();
    let pending_clone = pending_topic.clone();
    let gated_clone = gated.clone();
    let blocked = tokio::spawn(async move {
        cache_clone
            .request(&pending_clone, &Language::English, gated_clone)
            .await
    });

    // Wait until the pending entry is registered.
    while cache.get(&pending_topic.id, &Language::English).is_none() {
        tokio::task::yield_now().await;
    }

    cache
        .request(&quick_topic, &Language::English, counting.clone())
        .await
        .unwrap();

    // The bound removed the terminal entry, not the pending one.
    let pending_entry = cache.get(&pending_topic.id, &Language::English).unwrap();
    assert_eq!(pending_entry.status(), CacheStatus::Pending);

    gated.release(1);
    blocked.await.unwrap().unwrap();
    assert_eq!(
        cache
            .get(&pending_topic.id, &Language::English)
            .unwrap()
            .status(),
        CacheStatus::Ready
    );
}

#[tokio::test]
/// Dropping the caller does not cancel generation: the spawned call
/// completes and populates the cache.
async fn dropped_callers_still_populate_the_cache() {
    let cache = ContentCache::new();
    let generator = GatedGenerator::new();
    let topic = topic_ref("t1", "HTML");

    let cache_clone = cache.clone();
    let topic_clone = topic.clone();
    let generator_clone = generator.clone();
    let caller = tokio::spawn(async move {
        cache_clone
            .request(&topic_clone, &Language::English, generator_clone)
            .await
    });

    while generator.calls() == 0 {
        tokio::task::yield_now().await;
    }
    caller.abort();
    let _ = caller.await;

    generator.release(1);
    let deadline = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if let Some(entry) = cache.get(&topic.id, &Language::English) {
                if entry.status() == CacheStatus::Ready {
                    return;
                }
            }
            tokio::task::yield_now().await;
        }
    });
    deadline.await.expect("generation finished without a caller");
    assert_eq!(generator.calls(), 1);
}
