//! Candidate ranking against a query embedding.
//!
//! Ranking never hard-fails on a single candidate. A chunk without an
//! embedding is excluded; a chunk embedded by a different model (vector
//! length differs from the query's) receives a low content-length proxy
//! score instead of a similarity error; an unexpected similarity failure
//! degrades to a fixed floor. Low-confidence inclusion beats silent
//! exclusion.

use tracing::debug;

use crate::document::{Candidate, ScoredChunk};
use crate::similarity::cosine_similarity;

/// Default number of chunks selected for context.
pub const DEFAULT_TOP_K: usize = 5;

/// Cap on the proxy score for candidates whose embedding length does not
/// match the query's, so they rank below genuinely scored candidates in
/// the common case but are not dropped.
const MISMATCH_SCORE_CAP: f32 = 0.5;

/// Fixed score for candidates whose similarity computation failed.
const ERROR_FALLBACK_SCORE: f32 = 0.1;

/// Rank candidates by similarity to the query embedding, keeping the top `top_k`.
///
/// Candidates without an embedding are excluded entirely — not scored,
/// not returned. Matching-length embeddings are scored with
/// [`cosine_similarity`]; mismatched lengths get the content-length
/// fallback `min(content_length / 1000, 1) * 0.5` without touching the
/// similarity function, and any similarity error scores `0.1`.
///
/// The sort is stable and descending, so equal scores keep their original
/// candidate order. Returns fewer than `top_k` entries when fewer
/// candidates are scorable, and an empty `Vec` for empty input.
pub fn rank(
    query_embedding: &[f32],
    candidates: Vec<Candidate>,
    top_k: usize,
) -> Vec<ScoredChunk> {
    let mut scored: Vec<ScoredChunk> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let embedding = candidate.embedding?;
            let similarity = if embedding.vector.len() == query_embedding.len() {
                cosine_similarity(query_embedding, &embedding.vector)
                    .unwrap_or(ERROR_FALLBACK_SCORE)
            } else {
                debug!(
                    document_id = %candidate.chunk.document_id,
                    chunk_index = candidate.chunk.index,
                    model = %embedding.model,
                    embedding_len = embedding.vector.len(),
                    query_len = query_embedding.len(),
                    "embedding length differs from query, using fallback score"
                );
                mismatch_score(candidate.content_length)
            };
            Some(ScoredChunk {
                chunk: candidate.chunk,
                similarity,
                source_label: candidate.source_label,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    scored
}

/// Content-length proxy score for dimension-mismatched embeddings.
fn mismatch_score(content_length: usize) -> f32 {
    (content_length as f32 / 1000.0).min(1.0) * MISMATCH_SCORE_CAP
}
