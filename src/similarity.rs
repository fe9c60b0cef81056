//! Similarity metrics for comparing embedding vectors.
//!
//! The [`Similarity`] trait is the pluggable scoring strategy used by the
//! in-memory store. [`Cosine`] is the default; [`DotProduct`] is provided
//! for callers whose embeddings are already normalized.

use crate::error::{RagError, Result};

/// A metric scoring two equal-length vectors, larger meaning more similar.
pub trait Similarity: Send + Sync {
    /// Score the similarity of `a` and `b`.
    ///
    /// Callers guarantee equal lengths; metrics may still reject inputs
    /// they cannot score (see [`Cosine`]).
    fn score(&self, a: &[f32], b: &[f32]) -> Result<f32>;

    /// Validate a query vector before a search runs.
    ///
    /// The default accepts anything. Metrics that would fail on every
    /// comparison for a given query override this so the search can fail
    /// once, up front, instead of producing an empty result.
    fn check_query(&self, _query: &[f32]) -> Result<()> {
        Ok(())
    }
}

/// Cosine similarity: `dot(a, b) / (‖a‖ · ‖b‖)`.
///
/// A zero-magnitude input would divide by zero and silently poison the
/// ranking with NaN, so it is reported as [`RagError::DegenerateVector`]
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Similarity for Cosine {
    fn score(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(RagError::DegenerateVector);
        }
        Ok(dot / (norm_a * norm_b))
    }

    fn check_query(&self, query: &[f32]) -> Result<()> {
        if query.iter().all(|&x| x == 0.0) {
            return Err(RagError::DegenerateVector);
        }
        Ok(())
    }
}

/// Raw dot product. Magnitude-sensitive; accepts any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProduct;

impl Similarity for DotProduct {
    fn score(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
    }
}
