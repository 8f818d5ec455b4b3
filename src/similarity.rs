//! Vector similarity.

use crate::error::{RagError, Result};

/// Compute the cosine similarity of two equal-length vectors.
///
/// Equal length is a hard precondition: comparing vectors of different
/// lengths returns [`RagError::DimensionMismatch`]. Similarity against a
/// zero vector is defined as `0.0` rather than a division error. For
/// non-zero inputs the result lies in [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch { left: a.len(), right: b.len() });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}
