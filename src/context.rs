//! Context assembly for the language model.

use crate::document::ScoredChunk;

/// Sentinel context used when nothing relevant was retrieved.
///
/// Deliberately identical whether the knowledge base holds no documents
/// at all or holds documents with no matching chunks.
pub const NO_RELEVANT_CONTENT: &str = "No relevant content found in the knowledge base.";

/// Format ranked chunks into the grounding context string.
///
/// Each entry becomes a block carrying its source label, full chunk
/// content, and relevance percentage at one decimal place; blocks are
/// joined by blank lines in ranked order. An empty ranking yields
/// [`NO_RELEVANT_CONTENT`].
pub fn build_context(ranked: &[ScoredChunk]) -> String {
    if ranked.is_empty() {
        return NO_RELEVANT_CONTENT.to_string();
    }

    ranked
        .iter()
        .map(|scored| {
            format!(
                "Source: {}\nContent: {}\nRelevance: {:.1}%",
                scored.source_label,
                scored.chunk.content,
                scored.similarity * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
