//! Document chunking.
//!
//! This module provides the [`Chunker`] trait, the [`chunk_text`] splitter
//! it is built on, and [`SentenceChunker`], the standard implementation:
//! overlapping windows whose right edges snap back to sentence boundaries
//! so chunks are not severed mid-thought.

use std::collections::HashMap;

use crate::document::{Chunk, Document};

/// Characters that may end a chunk early: sentence terminators and newline.
const BOUNDARY_CHARS: [char; 4] = ['.', '?', '!', '\n'];

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// A strategy for splitting documents into chunks.
///
/// Implementations produce ordered [`Chunk`]s with text and metadata but
/// no embeddings; embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into ordered chunks.
    ///
    /// Returns an empty `Vec` if the document text is empty.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Split text into overlapping, sentence-aware chunks.
///
/// Scans left to right taking windows of at most `chunk_size` characters.
/// A window that does not reach the end of the text snaps its right edge
/// back to just after the last `.`, `?`, `!`, or newline inside the
/// window, provided that boundary lies strictly past the window's
/// midpoint; otherwise the full window is kept. Each chunk is trimmed of
/// surrounding whitespace and dropped if empty.
///
/// The cursor advances by the pre-trim chunk length minus `overlap`; when
/// that would not move it forward (the raw chunk is no longer than the
/// overlap, which happens near the end of the text), it advances by the
/// full chunk length instead, so the scan always terminates.
///
/// Positions are char offsets, never byte offsets, so multi-byte input is
/// never split inside a character. Callers keep `chunk_size > 0` and
/// `overlap < chunk_size`; empty input or a zero `chunk_size` yields no
/// chunks.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < total {
        let end = (start + chunk_size).min(total);
        let mut window = &chars[start..end];

        // Snap back to the latest sentence boundary past the midpoint.
        if end < total {
            if let Some(pos) = window.iter().rposition(|c| BOUNDARY_CHARS.contains(c)) {
                if 2 * pos > chunk_size {
                    window = &window[..=pos];
                }
            }
        }

        let raw_len = window.len();
        let chunk: String = window.iter().collect();
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        let next = start + raw_len.saturating_sub(overlap);
        if next <= start {
            // Raw chunk no longer than the overlap: take a full step.
            start += raw_len;
        } else {
            start = next;
        }
    }

    chunks
}

/// Splits documents with [`chunk_text`] and the standard 1000/200 window.
///
/// Each produced chunk carries its position as `index` and records its
/// word and character counts in the chunk metadata.
///
/// # Example
///
/// ```rust,ignore
/// use kb_rag::SentenceChunker;
///
/// let chunker = SentenceChunker::default();
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    chunk_size: usize,
    overlap: usize,
}

impl SentenceChunker {
    /// Create a new `SentenceChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `overlap` — number of overlapping characters between consecutive chunks
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self { chunk_size, overlap }
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        chunk_text(&document.text, self.chunk_size, self.overlap)
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                let mut metadata = HashMap::new();
                metadata.insert(
                    "word_count".to_string(),
                    content.split_whitespace().count().to_string(),
                );
                metadata.insert(
                    "char_count".to_string(),
                    content.chars().count().to_string(),
                );
                Chunk {
                    document_id: document.id.clone(),
                    index: i as u32,
                    content,
                    metadata,
                }
            })
            .collect()
    }
}
