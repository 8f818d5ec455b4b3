//! Knowledge-base pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-answer workflow by
//! composing an [`EmbeddingProvider`], a [`ChatModel`], a [`ChunkStore`],
//! a [`Chunker`], and an optional [`TextExtractor`]. All collaborators are
//! injected explicitly; the pipeline holds no mutable state and may be
//! shared across concurrent requests.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kb_rag::{InMemoryChunkStore, RagConfig, RagPipeline, SentenceChunker};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .chat_model(Arc::new(my_chat_model))
//!     .store(Arc::new(InMemoryChunkStore::new()))
//!     .chunker(Arc::new(SentenceChunker::default()))
//!     .build()?;
//!
//! pipeline.create_knowledge_base("docs").await?;
//! pipeline.ingest("docs", &document).await?;
//! let reply = pipeline.answer("docs", &[], "What does the report say?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::completion::{ChatMessage, ChatModel, grounded_messages};
use crate::config::RagConfig;
use crate::context::build_context;
use crate::document::{Candidate, Chunk, Document, Embedding, ScoredChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::extract::{FileType, MAX_FILE_SIZE, TextExtractor, validate_file_size};
use crate::retriever::rank;
use crate::store::ChunkStore;

/// The knowledge-base pipeline orchestrator.
///
/// Coordinates document ingestion (extract → chunk → embed → store) and
/// question answering (embed → rank → assemble context → complete).
/// Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    chat_model: Arc<dyn ChatModel>,
    store: Arc<dyn ChunkStore>,
    chunker: Arc<dyn Chunker>,
    extractor: Option<Arc<dyn TextExtractor>>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the chunk store.
    pub fn store(&self) -> &Arc<dyn ChunkStore> {
        &self.store
    }

    /// Create a knowledge base (a named store collection).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if the store operation fails.
    pub async fn create_knowledge_base(&self, name: &str) -> Result<()> {
        self.store.create_collection(name).await.map_err(|e| {
            error!(knowledge_base = name, error = %e, "failed to create knowledge base");
            RagError::Pipeline(format!("failed to create knowledge base '{name}': {e}"))
        })
    }

    /// Delete a knowledge base and everything stored in it.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if the store operation fails.
    pub async fn delete_knowledge_base(&self, name: &str) -> Result<()> {
        self.store.delete_collection(name).await.map_err(|e| {
            error!(knowledge_base = name, error = %e, "failed to delete knowledge base");
            RagError::Pipeline(format!("failed to delete knowledge base '{name}': {e}"))
        })
    }

    /// Ingest a document: chunk → embed → store.
    ///
    /// Every chunk is embedded and stored as a [`Candidate`] labeled with
    /// the document name. An embedding failure fails the whole document;
    /// no partial chunk set is written. Returns the stored chunks.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if embedding or storage fails,
    /// including the document ID in the error message.
    pub async fn ingest(&self, knowledge_base: &str, document: &Document) -> Result<Vec<Chunk>> {
        let chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(chunks);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();

        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
            RagError::Pipeline(format!("embedding failed for document '{}': {e}", document.id))
        })?;

        let model = self.embedding_provider.model_id().to_string();
        let records: Vec<Candidate> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, vector)| {
                Candidate::new(
                    chunk.clone(),
                    Some(Embedding { vector, model: model.clone() }),
                    document.name.clone(),
                )
            })
            .collect();

        self.store.upsert(knowledge_base, records).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "upsert failed during ingestion");
            RagError::Pipeline(format!("upsert failed for document '{}': {e}", document.id))
        })?;

        info!(document.id = %document.id, chunk_count = chunks.len(), "ingested document");

        Ok(chunks)
    }

    /// Validate, extract, and ingest an uploaded file.
    ///
    /// Checks the filename extension and the size cap, runs the
    /// configured [`TextExtractor`], and ingests the resulting document.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::UnsupportedFileType`] for unknown extensions,
    /// [`RagError::Extraction`] for oversized files or extraction
    /// failures, and [`RagError::Pipeline`] when no extractor is
    /// configured or ingestion fails.
    pub async fn ingest_file(
        &self,
        knowledge_base: &str,
        document_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Vec<Chunk>> {
        let extractor = self
            .extractor
            .as_ref()
            .ok_or_else(|| RagError::Pipeline("no text extractor configured".to_string()))?;

        let file_type = FileType::from_filename(filename)?;
        if !validate_file_size(bytes.len()) {
            return Err(RagError::Extraction(format!(
                "file too large, maximum size is {MAX_FILE_SIZE} bytes"
            )));
        }

        let extracted = extractor.extract(bytes, file_type).await.map_err(|e| {
            error!(filename, error = %e, "text extraction failed");
            e
        })?;

        let document = Document {
            id: document_id.to_string(),
            name: filename.to_string(),
            text: extracted.content,
            metadata: extracted.metadata,
        };

        self.ingest(knowledge_base, &document).await
    }

    /// Delete a document's chunks and embeddings from a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if the store operation fails.
    pub async fn delete_document(&self, knowledge_base: &str, document_id: &str) -> Result<()> {
        self.store.delete_document(knowledge_base, document_id).await.map_err(|e| {
            error!(knowledge_base, document_id, error = %e, "failed to delete document");
            RagError::Pipeline(format!("failed to delete document '{document_id}': {e}"))
        })
    }

    /// Embed the question and rank the stored candidates against it.
    ///
    /// Candidates without embeddings are excluded; candidates embedded by
    /// a different model are kept with a low fallback score. Returns at
    /// most `top_k` chunks.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if query embedding or the store
    /// load fails.
    pub async fn retrieve(&self, knowledge_base: &str, question: &str) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            RagError::Pipeline(format!("query embedding failed: {e}"))
        })?;

        let candidates = self.store.load(knowledge_base).await.map_err(|e| {
            error!(knowledge_base, error = %e, "failed to load candidates");
            RagError::Pipeline(format!(
                "failed to load candidates from '{knowledge_base}': {e}"
            ))
        })?;

        let ranked = rank(&query_embedding, candidates, self.config.top_k);
        info!(knowledge_base, result_count = ranked.len(), "retrieval completed");
        Ok(ranked)
    }

    /// Answer a user turn grounded in retrieved context.
    ///
    /// Retrieves and ranks chunks for the question, assembles the context
    /// string (the no-content sentinel when nothing ranked), prepends the
    /// grounding system prompt to the conversation, and completes.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if retrieval or completion fails.
    pub async fn answer(
        &self,
        knowledge_base: &str,
        history: &[ChatMessage],
        question: &str,
    ) -> Result<String> {
        let ranked = self.retrieve(knowledge_base, question).await?;
        let context = build_context(&ranked);

        let mut conversation = history.to_vec();
        conversation.push(ChatMessage::user(question));
        let messages = grounded_messages(&conversation, &context);

        self.chat_model.complete(&messages).await.map_err(|e| {
            error!(error = %e, "chat completion failed");
            RagError::Pipeline(format!("chat completion failed: {e}"))
        })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields except `extractor` are required. Call
/// [`build()`](RagPipelineBuilder::build) to validate and produce the
/// pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    chat_model: Option<Arc<dyn ChatModel>>,
    store: Option<Arc<dyn ChunkStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    extractor: Option<Arc<dyn TextExtractor>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the chat-completion backend.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Set the chunk store backend.
    pub fn store(mut self, store: Arc<dyn ChunkStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set an optional text extractor for file ingestion.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| RagError::Config("chat_model is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Config("store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;

        Ok(RagPipeline {
            config,
            embedding_provider,
            chat_model,
            store,
            chunker,
            extractor: self.extractor,
        })
    }
}
