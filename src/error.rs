//! Error types for the `kb-rag` crate.

use thiserror::Error;

/// Errors that can occur in knowledge-base retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Two vectors of different lengths were compared.
    ///
    /// Raised only by [`cosine_similarity`](crate::similarity::cosine_similarity).
    /// The retriever checks lengths before scoring and routes mismatched
    /// candidates through a fallback score, so this never escapes a single
    /// candidate's scoring.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the left vector.
        left: usize,
        /// Length of the right vector.
        right: usize,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during chat completion.
    #[error("Completion error ({provider}): {message}")]
    Completion {
        /// The chat model that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the chunk store backend.
    #[error("Store error ({backend}): {message}")]
    Store {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while extracting text from an uploaded document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An uploaded file has an extension no extractor understands.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error in pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
