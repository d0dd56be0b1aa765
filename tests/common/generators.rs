//! Scripted content generators for cache and selection tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

use roadweave::generator::{ContentGenerator, GenerationError};
use roadweave::types::Language;

/// Resolves immediately and counts invocations. The running call number is
/// baked into the content so refreshes are distinguishable from cache hits.
pub struct CountingGenerator {
    calls: AtomicUsize,
}

impl CountingGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for CountingGenerator {
    async fn generate(
        &self,
        topic_label: &str,
        language: &Language,
    ) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{topic_label} [{language}] #{call}"))
    }
}

/// Fails with the scripted error for the first `failures` calls, then
/// succeeds.
pub struct FlakyGenerator {
    calls: AtomicUsize,
    failures: usize,
    error: GenerationError,
}

impl FlakyGenerator {
    pub fn new(failures: usize, error: GenerationError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failures,
            error,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for FlakyGenerator {
    async fn generate(
        &self,
        topic_label: &str,
        language: &Language,
    ) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            Err(self.error.clone())
        } else {
            Ok(format!("{topic_label} [{language}] recovered"))
        }
    }
}

/// Blocks every call until explicitly released, opening a window in which
/// concurrent requests and selection changes can be arranged.
pub struct GatedGenerator {
    calls: AtomicUsize,
    gate: Semaphore,
}

impl GatedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
        })
    }

    /// Let `n` blocked calls proceed.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for GatedGenerator {
    async fn generate(
        &self,
        topic_label: &str,
        language: &Language,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GenerationError::Network("gate closed".into()))?;
        permit.forget();
        Ok(format!("{topic_label} [{language}] gated"))
    }
}

/// Violates the generator contract by resolving with empty text.
pub struct EmptyGenerator;

#[async_trait]
impl ContentGenerator for EmptyGenerator {
    async fn generate(
        &self,
        _topic_label: &str,
        _language: &Language,
    ) -> Result<String, GenerationError> {
        Ok("   ".to_string())
    }
}
