//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap a specific embedding backend behind a unified
/// async interface. Calls perform network I/O and may fail; failures are
/// reported as [`RagError::Embedding`](crate::RagError::Embedding) with a
/// [`kind`](crate::EmbeddingErrorKind) that distinguishes bad credentials
/// from transient transport trouble from rejected input. Retry policy
/// belongs to the implementation or its caller, never to the retrieval
/// engine.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::EmbeddingProvider;
///
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// Must preserve order and cardinality: vector `i` of the output
    /// embeds text `i` of the input, and the lengths match. The default
    /// implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially; backends with native batch endpoints should override
    /// it to amortize the round trip.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
