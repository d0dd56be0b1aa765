//! Opaque save/load of whole roadmaps.
//!
//! The gateway is a last-write-wins key-value store with no transactional
//! semantics; production wiring supplies a backend, and [`InMemoryGateway`]
//! serves tests and embedding. Roadmaps cross the boundary as JSON, and the
//! load path re-runs graph validation during deserialization, so a corrupt
//! backend can never hand an invalid graph to a renderer.

use async_trait::async_trait;
use miette::Diagnostic;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::graph::Roadmap;
use crate::types::RoadmapId;

/// Failure of a gateway operation.
#[derive(Debug, Error, Diagnostic)]
pub enum GatewayError {
    /// The backend rejected or lost the operation.
    #[error("persistence backend failure: {message}")]
    #[diagnostic(code(roadweave::persistence::backend))]
    Backend { message: String },

    /// A stored roadmap failed to (de)serialize or re-validate.
    #[error("stored roadmap is unreadable: {0}")]
    #[diagnostic(
        code(roadweave::persistence::corrupt),
        help("Load re-runs graph validation; the stored payload no longer forms a valid roadmap.")
    )]
    Corrupt(#[from] serde_json::Error),
}

/// Capability interface for roadmap storage.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Store `roadmap` for `owner`, replacing any roadmap with the same id.
    async fn save(&self, roadmap: &Roadmap, owner: &str) -> Result<(), GatewayError>;

    /// All roadmaps stored for `owner`, sorted by id.
    async fn load(&self, owner: &str) -> Result<Vec<Roadmap>, GatewayError>;

    /// Remove one roadmap. Deleting an absent id is a no-op.
    async fn delete(&self, roadmap_id: &RoadmapId, owner: &str) -> Result<(), GatewayError>;
}

/// Gateway keeping serialized roadmaps in process memory.
///
/// Storing JSON rather than live values keeps the in-memory behavior
/// identical to a real backend: loads deserialize and re-validate.
#[derive(Default)]
pub struct InMemoryGateway {
    owners: Mutex<FxHashMap<String, FxHashMap<RoadmapId, String>>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn save(&self, roadmap: &Roadmap, owner: &str) -> Result<(), GatewayError> {
        let payload = serde_json::to_string(roadmap)?;
        self.owners
            .lock()
            .entry(owner.to_string())
            .or_default()
            .insert(roadmap.id().clone(), payload);
        Ok(())
    }

    async fn load(&self, owner: &str) -> Result<Vec<Roadmap>, GatewayError> {
        let payloads: Vec<(RoadmapId, String)> = match self.owners.lock().get(owner) {
            Some(stored) => stored
                .iter()
                .map(|(id, payload)| (id.clone(), payload.clone()))
                .collect(),
            None => Vec::new(),
        };
        let mut sorted = payloads;
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
            .into_iter()
            .map(|(_, payload)| serde_json::from_str(&payload).map_err(GatewayError::from))
            .collect()
    }

    async fn delete(&self, roadmap_id: &RoadmapId, owner: &str) -> Result<(), GatewayError> {
        if let Some(stored) = self.owners.lock().get_mut(owner) {
            stored.remove(roadmap_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LayoutEngine;
    use crate::topic::Topic;

    fn roadmap(title: &str) -> Roadmap {
        LayoutEngine::new()
            .synthesize(
                title,
                "stored",
                &[Topic::new("t1", "HTML", ""), Topic::new("t2", "CSS", "")],
            )
            .unwrap()
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let gateway = InMemoryGateway::new();
        let stored = roadmap("Frontend");
        gateway.save(&stored, "owner-1").await.unwrap();

        let loaded = gateway.load("owner-1").await.unwrap();
        assert_eq!(loaded, vec![stored]);
        assert!(gateway.load("someone-else").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_is_last_write_wins_per_id() {
        let gateway = InMemoryGateway::new();
        let first = roadmap("Frontend");
        gateway.save(&first, "owner-1").await.unwrap();
        // Same topics and title produce the same id; a re-save replaces.
        gateway.save(&first, "owner-1").await.unwrap();
        assert_eq!(gateway.load("owner-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_owner_and_tolerates_absence() {
        let gateway = InMemoryGateway::new();
        let stored = roadmap("Frontend");
        gateway.save(&stored, "owner-1").await.unwrap();

        gateway.delete(stored.id(), "owner-2").await.unwrap();
        assert_eq!(gateway.load("owner-1").await.unwrap().len(), 1);

        gateway.delete(stored.id(), "owner-1").await.unwrap();
        assert!(gateway.load("owner-1").await.unwrap().is_empty());

        // Absent id: no-op, not an error.
        gateway.delete(stored.id(), "owner-1").await.unwrap();
    }
}
