//! Vector store trait for storing and searching keyed embeddings.

use async_trait::async_trait;

use crate::document::SearchResult;
use crate::error::Result;

/// A keyed collection of embedding vectors with similarity search.
///
/// Keys are unique; inserting under an existing key replaces that entry.
/// All vectors in one store share a single dimensionality. Mutation
/// (`insert`, `insert_batch`, `clear`) is serialized; reads (`search`,
/// `retrieve`, `len`) may run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.insert("a chunk of text".into(), embedding).await?;
/// let results = store.search(&query_embedding, 3).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a vector under `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch)
    /// if the vector's width differs from the store's dimensionality; the
    /// store is left unchanged.
    async fn insert(&self, key: String, vector: Vec<f32>) -> Result<()>;

    /// Insert many entries as one mutation.
    ///
    /// Every vector is validated before any entry is written, so a failed
    /// batch leaves the store unchanged.
    async fn insert_batch(&self, entries: Vec<(String, Vec<f32>)>) -> Result<()>;

    /// Return the `k` entries most similar to `query`, ordered by
    /// descending score.
    ///
    /// Returns fewer than `k` results when the store holds fewer entries;
    /// that is not an error. `k` must be greater than zero.
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Look up the vector stored under `key`.
    ///
    /// A missing key is a normal outcome, reported as `None`.
    async fn retrieve(&self, key: &str) -> Option<Vec<f32>>;

    /// Remove all entries. Safe to call on an empty store.
    async fn clear(&self);

    /// Number of stored entries.
    async fn len(&self) -> usize;

    /// Whether the store holds no entries.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
