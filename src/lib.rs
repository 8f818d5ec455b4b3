//! # kb-rag
//!
//! Retrieval-augmented context assembly for knowledge-base chat
//! applications.
//!
//! ## Overview
//!
//! Two core components, usable independently:
//!
//! - [`chunk_text`] / [`SentenceChunker`] — split extracted document text
//!   into overlapping, sentence-aware chunks suitable for independent
//!   embedding and retrieval. Pure, no I/O.
//! - [`rank`] / [`build_context`] — rank `(chunk, embedding)` candidates
//!   against a query embedding and assemble the grounding context string,
//!   degrading gracefully when embeddings are missing or were produced by
//!   a different model.
//!
//! Surrounding collaborators are reached through narrow traits:
//! [`EmbeddingProvider`], [`ChatModel`], [`ChunkStore`], and
//! [`TextExtractor`]. The [`RagPipeline`] wires them together for the
//! full ingest-and-answer workflow; enable the `ollama` feature for
//! HTTP providers backed by a local Ollama server.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kb_rag::{
//!     InMemoryChunkStore, PlainTextExtractor, RagConfig, RagPipeline, SentenceChunker,
//! };
//! use kb_rag::ollama::{OllamaChatModel, OllamaEmbeddingProvider};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(OllamaEmbeddingProvider::new()))
//!     .chat_model(Arc::new(OllamaChatModel::new()))
//!     .store(Arc::new(InMemoryChunkStore::new()))
//!     .chunker(Arc::new(SentenceChunker::default()))
//!     .extractor(Arc::new(PlainTextExtractor))
//!     .build()?;
//!
//! pipeline.create_knowledge_base("docs").await?;
//! pipeline.ingest_file("docs", "doc_1", "notes.txt", bytes).await?;
//! let reply = pipeline.answer("docs", &[], "What do the notes say?").await?;
//! ```

pub mod chunking;
pub mod completion;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod inmemory;
#[cfg(feature = "ollama")]
pub mod ollama;
pub mod pipeline;
pub mod retriever;
pub mod similarity;
pub mod store;

pub use chunking::{
    Chunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, SentenceChunker, chunk_text,
};
pub use completion::{ChatMessage, ChatModel, Role, grounded_messages};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{NO_RELEVANT_CONTENT, build_context};
pub use document::{Candidate, Chunk, Document, DocumentMetadata, Embedding, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use extract::{
    ExtractedDocument, FileType, MAX_FILE_SIZE, PlainTextExtractor, TextExtractor,
    validate_file_size,
};
pub use inmemory::InMemoryChunkStore;
#[cfg(feature = "ollama")]
pub use ollama::{OllamaChatModel, OllamaEmbeddingProvider};
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use retriever::{DEFAULT_TOP_K, rank};
pub use similarity::cosine_similarity;
pub use store::ChunkStore;
