//! Data types for documents, chunks, embeddings, and retrieval candidates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document with extracted text and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// Original filename; used as the source label on retrieved context.
    pub name: String,
    /// The extracted text content of the document.
    pub text: String,
    /// Metadata reported by text extraction.
    pub metadata: DocumentMetadata,
}

/// Metadata reported by text extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetadata {
    /// Document title, when the format carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author, when the format carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Page count for paginated formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    /// Whitespace-separated word count of the extracted text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

/// An ordered text segment of a [`Document`].
///
/// Chunks are created once at ingestion and never mutated; `index` is
/// unique within the owning document, and reading a document's chunks in
/// ascending index order reconstructs its chunked coverage. Content is
/// trimmed and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The ID of the owning [`Document`].
    pub document_id: String,
    /// Position of this chunk within the document.
    pub index: u32,
    /// Trimmed, non-empty text content.
    pub content: String,
    /// Chunk-level metadata (word count, char count).
    pub metadata: HashMap<String, String>,
}

/// A fixed-length vector embedding tagged with the model that produced it.
///
/// Vectors produced by different models may have different lengths; the
/// retriever treats that as a scoring condition, not an error. The length
/// is fixed at creation and never changes in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector, serialized as an ordered list of floats.
    pub vector: Vec<f32>,
    /// Identifier of the model that produced the vector.
    pub model: String,
}

/// A retrieval candidate: one chunk plus everything ranking needs.
///
/// The embedding is an explicit `Option` — a candidate without one is
/// excluded from ranking rather than failing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// The chunk under consideration.
    pub chunk: Chunk,
    /// The chunk's embedding, when one was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
    /// Label shown as the source of retrieved content (the original filename).
    pub source_label: String,
    /// Content length in characters, recorded at ingestion time.
    pub content_length: usize,
}

impl Candidate {
    /// Create a candidate, recording the chunk's content length.
    pub fn new(
        chunk: Chunk,
        embedding: Option<Embedding>,
        source_label: impl Into<String>,
    ) -> Self {
        let content_length = chunk.content.chars().count();
        Self { chunk, embedding, source_label: source_label.into(), content_length }
    }
}

/// A ranked chunk with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity in [-1, 1], or a fallback proxy score.
    pub similarity: f32,
    /// Label of the source document.
    pub source_label: String,
}
