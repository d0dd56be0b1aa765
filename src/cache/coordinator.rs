//! In-flight request bookkeeping behind the content cache.
//!
//! [`RequestCoordinator`] guarantees the coalescing invariant: at most one
//! outstanding generation call per [`CacheKey`]. Concurrent callers for the
//! same key all receive clones of one shared future and therefore observe
//! the same eventual result. It is a standalone component so alternative
//! cache implementations can reuse the same bookkeeping.
//!
//! Responses are tagged with their originating key via the returned
//! [`Dispatch`] handle; the display layer compares that key against the
//! current selection at resolution time to discard stale responses. The
//! coordinator itself never cancels a dispatched call.
//!
//! # Lock discipline
//!
//! The in-flight table is the only state, guarded by a `parking_lot::Mutex`
//! that is held across map operations only — never across an await.

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::generator::GenerationError;
use crate::types::CacheKey;

/// A cloneable handle on one in-flight generation result.
pub type SharedGeneration = Shared<BoxFuture<'static, Result<String, GenerationError>>>;

/// Tracks at most one in-flight generation future per cache key.
///
/// # Examples
///
/// ```rust
/// use futures_util::FutureExt;
/// use roadweave::cache::RequestCoordinator;
/// use roadweave::types::{CacheKey, Language, TopicId};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let coordinator = RequestCoordinator::new();
/// let key = CacheKey::new(TopicId::from("t1"), Language::English);
///
/// let first = coordinator.dispatch(key.clone(), || {
///     async { Ok("generated".to_string()) }.boxed()
/// });
/// // A second dispatch for the same key joins the first call; its factory
/// // closure is dropped unused.
/// let second = coordinator.dispatch(key.clone(), || unreachable!());
/// assert!(second.was_coalesced());
///
/// assert_eq!(first.wait().await.unwrap(), "generated");
/// # }
/// ```
#[derive(Default)]
pub struct RequestCoordinator {
    in_flight: Mutex<FxHashMap<CacheKey, SharedGeneration>>,
}

impl RequestCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join or start the generation call for `key`.
    ///
    /// If a call is already in flight, the existing shared future is joined
    /// and `make` is never invoked. Otherwise `make` builds the future that
    /// becomes the single outstanding call for this key.
    pub fn dispatch<F>(&self, key: CacheKey, make: F) -> Dispatch
    where
        F: FnOnce() -> BoxFuture<'static, Result<String, GenerationError>>,
    {
        let mut in_flight = self.in_flight.lock();
        if let Some(existing) = in_flight.get(&key) {
            tracing::debug!(%key, "coalescing onto in-flight generation");
            return Dispatch {
                key,
                future: existing.clone(),
                coalesced: true,
            };
        }
        let dispatch_id = Uuid::new_v4();
        tracing::debug!(%key, %dispatch_id, "dispatching generation call");
        let future = make().shared();
        in_flight.insert(key.clone(), future.clone());
        Dispatch {
            key,
            future,
            coalesced: false,
        }
    }

    /// Drop the in-flight record for `key`.
    ///
    /// Called by the owner once the result has been written to its store.
    /// Returns whether a record existed.
    pub fn settle(&self, key: &CacheKey) -> bool {
        self.in_flight.lock().remove(key).is_some()
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &CacheKey) -> bool {
        self.in_flight.lock().contains_key(key)
    }

    #[must_use]
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// One caller's handle on a dispatched (or joined) generation call, tagged
/// with the key it was dispatched for.
#[derive(Clone)]
pub struct Dispatch {
    key: CacheKey,
    future: SharedGeneration,
    coalesced: bool,
}

impl Dispatch {
    /// The originating cache key this response belongs to.
    #[must_use]
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Whether this handle joined an already-outstanding call.
    #[must_use]
    pub fn was_coalesced(&self) -> bool {
        self.coalesced
    }

    /// A clone of the underlying shared future, e.g. for spawning so the
    /// call completes even if every waiting caller is dropped.
    #[must_use]
    pub fn future(&self) -> SharedGeneration {
        self.future.clone()
    }

    /// Await the shared result.
    pub async fn wait(self) -> Result<String, GenerationError> {
        self.future.await
    }

    /// Await the shared result together with its originating key, for
    /// staleness comparison at resolution time.
    pub async fn resolve(self) -> (CacheKey, Result<String, GenerationError>) {
        let key = self.key;
        (key, self.future.await)
    }
}
