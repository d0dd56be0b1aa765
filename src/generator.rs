//! The injected text-generation capability and its error taxonomy.
//!
//! The cache layer never talks to a network client directly: it depends on
//! the [`ContentGenerator`] trait, and production wiring supplies an
//! implementation backed by whatever text-generation service is in use.
//! This keeps [`ContentCache`](crate::cache::ContentCache) and
//! [`RequestCoordinator`](crate::cache::RequestCoordinator) unit-testable
//! with scripted generators.
//!
//! # Contract
//!
//! `generate` resolves with non-empty text or rejects with a typed
//! [`GenerationError`]; implementations must not hang indefinitely — any
//! caller-level timeout belongs inside the implementation and surfaces as a
//! [`GenerationError::Network`] rejection.
//!
//! # Examples
//!
//! ```rust
//! use async_trait::async_trait;
//! use roadweave::generator::{ContentGenerator, GenerationError};
//! use roadweave::types::Language;
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
//! ```

use async_trait::async_trait;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Language;

/// Capability interface to the external text-generation service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate explanatory text for one topic in one language.
    async fn generate(
        &self,
        topic_label: &str,
        language: &Language,
    ) -> Result<String, GenerationError>;
}

/// Recoverable failure of a generation call.
///
/// Cloneable because a single in-flight result fans out to every coalesced
/// caller, and serializable so cached error states survive persistence.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "kebab-case")]
pub enum GenerationError {
    /// The service refused the call for quota/billing reasons. Requires
    /// explicit user action before retrying.
    #[error("generation quota exhausted: {0}")]
    #[diagnostic(
        code(roadweave::generation::quota),
        help("Quota errors are not auto-retried; surface a retry affordance to the user.")
    )]
    Quota(String),

    /// Transport-level failure. Safe to auto-retry.
    #[error("generation network failure: {0}")]
    #[diagnostic(code(roadweave::generation::network))]
    Network(String),

    /// The service answered with something unusable (empty or malformed).
    #[error("invalid generation response: {0}")]
    #[diagnostic(code(roadweave::generation::invalid_response))]
    InvalidResponse(String),
}

/// Discriminant of a [`GenerationError`], for callers that branch on kind
/// without caring about the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationErrorKind {
    Quota,
    Network,
    InvalidResponse,
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::Quota(_) => GenerationErrorKind::Quota,
            Self::Network(_) => GenerationErrorKind::Network,
            Self::InvalidResponse(_) => GenerationErrorKind::InvalidResponse,
        }
    }

    /// Whether an automatic retry is a reasonable reaction.
    ///
    /// Network failures are transient; quota and malformed-response
    /// failures need a human or a fix first.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
