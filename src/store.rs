//! Chunk persistence seam.

use async_trait::async_trait;

use crate::document::Candidate;
use crate::error::Result;

/// A storage backend for chunks and their embeddings.
///
/// Implementations manage named collections (one per knowledge base) of
/// [`Candidate`] records keyed by document ID and chunk index. The core
/// does not define a storage format beyond treating a vector as an
/// ordered list of floats serialized however the backend needs.
///
/// # Example
///
/// ```rust,ignore
/// use kb_rag::{ChunkStore, InMemoryChunkStore};
///
/// let store = InMemoryChunkStore::new();
/// store.create_collection("docs").await?;
/// store.upsert("docs", records).await?;
/// let candidates = store.load("docs").await?;
/// ```
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Create a named collection. No-op if it already exists.
    async fn create_collection(&self, name: &str) -> Result<()>;

    /// Delete a named collection and all its records.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Insert or replace candidate records in a collection.
    async fn upsert(&self, collection: &str, records: Vec<Candidate>) -> Result<()>;

    /// Delete a document's chunks, and their embeddings, from a collection.
    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<()>;

    /// Load every candidate in a collection.
    ///
    /// Candidates are returned ordered by document ID and chunk index, so
    /// ranking's stable tie-break is reproducible across calls.
    async fn load(&self, collection: &str) -> Result<Vec<Candidate>>;
}
