//! Cache entry state for generated topic content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::GenerationError;
use crate::types::CacheKey;

/// Discriminant of a [`CacheState`], for reporting and transition checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Pending,
    Ready,
    Error,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Ready => write!(f, "ready"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Lifecycle state of one cached piece of content.
///
/// Legal transitions: `Pending -> Ready`, `Pending -> Error`,
/// `Error -> Pending` (explicit retry), `Ready -> Pending` (explicit
/// refresh). The store enforces these; no other transition exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CacheState {
    /// Generation dispatched, result not yet arrived.
    Pending,
    /// Generation succeeded; the content is served from here on.
    Ready { content: String },
    /// Generation failed; the error is replayed to later requests until an
    /// explicit retry clears it.
    Error { error: GenerationError },
}

/// One cached (topic, language) slot.
///
/// # Examples
///
/// ```rust
/// use roadweave::cache::{CacheEntry, CacheStatus};
/// use roadweave::types::{CacheKey, Language, TopicId};
///
/// let key = CacheKey::new(TopicId::from("t1"), Language::English);
/// let entry = CacheEntry::pending(key, 0);
/// assert_eq!(entry.status(), CacheStatus::Pending);
/// assert!(entry.content().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub state: CacheState,
    /// When the generation behind this entry was first requested.
    pub requested_at: DateTime<Utc>,
    /// Monotonic recency tick maintained by the store for eviction order.
    #[serde(skip)]
    pub(crate) touched: u64,
}

impl CacheEntry {
    /// A fresh pending entry, stamped now.
    #[must_use]
    pub fn pending(key: CacheKey, touched: u64) -> Self {
        Self {
            key,
            state: CacheState::Pending,
            requested_at: Utc::now(),
            touched,
        }
    }

    #[must_use]
    pub fn status(&self) -> CacheStatus {
        match self.state {
            CacheState::Pending => CacheStatus::Pending,
            CacheState::Ready { .. } => CacheStatus::Ready,
            CacheState::Error { .. } => CacheStatus::Error,
        }
    }

    /// The generated text, when this entry is ready.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.state {
            CacheState::Ready { content } => Some(content),
            _ => None,
        }
    }

    /// The stored failure, when this entry is in the error state.
    #[must_use]
    pub fn error(&self) -> Option<&GenerationError> {
        match &self.state {
            CacheState::Error { error } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, CacheState::Pending)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, CacheState::Ready { .. })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.state, CacheState::Error { .. })
    }
}
