//! In-memory chunk store.
//!
//! [`InMemoryChunkStore`] is a zero-dependency [`ChunkStore`] backed by a
//! `HashMap` protected by a `tokio::sync::RwLock`. It is suitable for
//! development, testing, and small-scale use.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::Candidate;
use crate::error::{RagError, Result};
use crate::store::ChunkStore;

/// An in-memory [`ChunkStore`].
///
/// Collections are nested maps: collection name → (document ID, chunk
/// index) → candidate. All operations are async-safe via
/// `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryChunkStore {
    collections: RwLock<HashMap<String, HashMap<(String, u32), Candidate>>>,
}

impl InMemoryChunkStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn missing(collection: &str) -> RagError {
        RagError::Store {
            backend: "InMemory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        }
    }
}

#[async_trait]
impl ChunkStore for InMemoryChunkStore {
    async fn create_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.remove(name);
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: Vec<Candidate>) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| Self::missing(collection))?;
        for record in records {
            store.insert((record.chunk.document_id.clone(), record.chunk.index), record);
        }
        Ok(())
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| Self::missing(collection))?;
        store.retain(|(doc, _), _| doc != document_id);
        Ok(())
    }

    async fn load(&self, collection: &str) -> Result<Vec<Candidate>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| Self::missing(collection))?;

        let mut records: Vec<Candidate> = store.values().cloned().collect();
        records.sort_by(|a, b| {
            (a.chunk.document_id.as_str(), a.chunk.index)
                .cmp(&(b.chunk.document_id.as_str(), b.chunk.index))
        });
        Ok(records)
    }
}
