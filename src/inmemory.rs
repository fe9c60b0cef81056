//! In-memory vector store with pluggable similarity.
//!
//! This module provides [`InMemoryVectorStore`], a brute-force exact
//! store backed by an insertion-ordered entry list protected by a
//! `tokio::sync::RwLock`. Search cost is O(n·d) per query, which bounds
//! the practical size but keeps results exact and deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::document::SearchResult;
use crate::error::{RagError, Result};
use crate::similarity::{Cosine, Similarity};
use crate::vectorstore::VectorStore;

struct Entry {
    key: String,
    vector: Vec<f32>,
}

#[derive(Default)]
struct Inner {
    /// Entries in first-insertion order. Upserts rewrite in place so a
    /// key keeps its original position, which makes equal-score ties
    /// deterministic under the stable sort in `search`.
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    dimensions: Option<usize>,
}

impl Inner {
    fn upsert(&mut self, key: String, vector: Vec<f32>) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].vector = vector;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push(Entry { key, vector });
        }
    }
}

/// An in-memory vector store scored by an injected [`Similarity`] metric.
///
/// Defaults to [`Cosine`]. The store owns its dimensionality: it is fixed
/// either at construction via [`with_dimensions`](Self::with_dimensions)
/// or by the first inserted vector, and every later insert and query is
/// checked against it.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::{DotProduct, InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new().with_similarity(Arc::new(DotProduct));
/// store.insert("chunk text".into(), vec![0.1, 0.9]).await?;
/// ```
pub struct InMemoryVectorStore {
    inner: tokio::sync::RwLock<Inner>,
    similarity: Arc<dyn Similarity>,
    declared_dimensions: Option<usize>,
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryVectorStore {
    /// Create a new empty store using cosine similarity.
    pub fn new() -> Self {
        Self {
            inner: tokio::sync::RwLock::new(Inner::default()),
            similarity: Arc::new(Cosine),
            declared_dimensions: None,
        }
    }

    /// Replace the similarity metric used by `search`.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Declare the store's dimensionality up front instead of inferring
    /// it from the first insert. A declared dimensionality survives
    /// [`clear`](VectorStore::clear); an inferred one does not.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.declared_dimensions = Some(dimensions);
        self.inner.get_mut().dimensions = Some(dimensions);
        self
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(&self, key: String, vector: Vec<f32>) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.dimensions {
            Some(expected) if expected != vector.len() => {
                return Err(RagError::DimensionMismatch { expected, actual: vector.len() });
            }
            None => inner.dimensions = Some(vector.len()),
            _ => {}
        }
        inner.upsert(key, vector);
        Ok(())
    }

    async fn insert_batch(&self, entries: Vec<(String, Vec<f32>)>) -> Result<()> {
        let mut inner = self.inner.write().await;

        // Validate every width before touching the entries, so a bad
        // batch leaves the store exactly as it was.
        let mut expected = inner.dimensions;
        for (_, vector) in &entries {
            match expected {
                Some(d) if d != vector.len() => {
                    return Err(RagError::DimensionMismatch { expected: d, actual: vector.len() });
                }
                None => expected = Some(vector.len()),
                _ => {}
            }
        }

        inner.dimensions = expected;
        for (key, vector) in entries {
            inner.upsert(key, vector);
        }
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::InvalidConfig("k must be greater than zero".to_string()));
        }
        self.similarity.check_query(query)?;

        let inner = self.inner.read().await;
        if let Some(expected) = inner.dimensions {
            if query.len() != expected {
                return Err(RagError::DimensionMismatch { expected, actual: query.len() });
            }
        }

        let mut scored = Vec::with_capacity(inner.entries.len());
        for entry in &inner.entries {
            match self.similarity.score(query, &entry.vector) {
                Ok(score) => scored.push(SearchResult { key: entry.key.clone(), score }),
                Err(e) => {
                    warn!(key = %entry.key, error = %e, "skipping unscorable entry");
                }
            }
        }

        // sort_by is stable: equal scores keep insertion order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    async fn retrieve(&self, key: &str) -> Option<Vec<f32>> {
        let inner = self.inner.read().await;
        inner.index.get(key).map(|&slot| inner.entries[slot].vector.clone())
    }

    async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.index.clear();
        inner.dimensions = self.declared_dimensions;
    }

    async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::DotProduct;

    #[tokio::test]
    async fn insert_then_retrieve_round_trips() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 2.0, 3.0]).await.unwrap();
        assert_eq!(store.retrieve("a").await, Some(vec![1.0, 2.0, 3.0]));
    }

    #[tokio::test]
    async fn retrieve_of_missing_key_is_none() {
        let store = InMemoryVectorStore::new();
        assert_eq!(store.retrieve("never inserted").await, None);
    }

    #[tokio::test]
    async fn upsert_overwrites_without_growing() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        store.insert("b".into(), vec![0.0, 1.0]).await.unwrap();
        store.insert("a".into(), vec![0.5, 0.5]).await.unwrap();
        assert_eq!(store.len().await, 2);
        assert_eq!(store.retrieve("a").await, Some(vec![0.5, 0.5]));
    }

    #[tokio::test]
    async fn search_ranks_by_cosine_descending() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        store.insert("b".into(), vec![0.0, 1.0]).await.unwrap();
        store.insert("c".into(), vec![0.9, 0.1]).await.unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].key, "a");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].key, "c");
        assert!((results[1].score - 0.9939).abs() < 1e-3);
    }

    #[tokio::test]
    async fn search_returns_all_entries_when_k_exceeds_len() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        store.insert("b".into(), vec![0.0, 1.0]).await.unwrap();

        let results = store.search(&[1.0, 1.0], 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn search_rejects_zero_k() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        assert!(matches!(store.search(&[1.0, 0.0], 0).await, Err(RagError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn equal_scores_keep_insertion_order() {
        let store = InMemoryVectorStore::new();
        store.insert("first".into(), vec![0.0, 1.0]).await.unwrap();
        store.insert("second".into(), vec![0.0, 2.0]).await.unwrap();

        // Both are orthogonal to the query, so both score exactly zero.
        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].key, "first");
        assert_eq!(results[1].key, "second");
    }

    #[tokio::test]
    async fn insert_rejects_mismatched_dimensions() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();

        let err = store.insert("b".into(), vec![1.0, 2.0, 3.0]).await;
        assert!(matches!(err, Err(RagError::DimensionMismatch { expected: 2, actual: 3 })));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn search_rejects_mismatched_query_width() {
        let store = InMemoryVectorStore::new().with_dimensions(2);
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        let err = store.search(&[1.0, 0.0, 0.0], 1).await;
        assert!(matches!(err, Err(RagError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[tokio::test]
    async fn failed_batch_leaves_store_unchanged() {
        let store = InMemoryVectorStore::new();
        let err = store
            .insert_batch(vec![("a".into(), vec![1.0, 0.0]), ("b".into(), vec![1.0, 0.0, 0.0])])
            .await;
        assert!(matches!(err, Err(RagError::DimensionMismatch { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clear_empties_and_is_idempotent() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();

        store.clear().await;
        assert!(store.is_empty().await);
        store.clear().await;
        assert!(store.is_empty().await);

        // Inferred dimensionality resets with the entries.
        store.insert("wide".into(), vec![1.0, 2.0, 3.0]).await.unwrap();
        assert_eq!(store.retrieve("wide").await, Some(vec![1.0, 2.0, 3.0]));
    }

    #[tokio::test]
    async fn declared_dimensions_survive_clear() {
        let store = InMemoryVectorStore::new().with_dimensions(2);
        store.clear().await;
        let err = store.insert("a".into(), vec![1.0, 2.0, 3.0]).await;
        assert!(matches!(err, Err(RagError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[tokio::test]
    async fn unscorable_entries_are_skipped() {
        let store = InMemoryVectorStore::new();
        store.insert("zero".into(), vec![0.0, 0.0]).await.unwrap();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();

        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "a");
    }

    #[tokio::test]
    async fn degenerate_query_fails_the_search() {
        let store = InMemoryVectorStore::new();
        store.insert("a".into(), vec![1.0, 0.0]).await.unwrap();
        assert!(matches!(store.search(&[0.0, 0.0], 1).await, Err(RagError::DegenerateVector)));
    }

    #[tokio::test]
    async fn dot_product_metric_ranks_by_magnitude() {
        let store =
            InMemoryVectorStore::new().with_similarity(Arc::new(DotProduct));
        store.insert("small".into(), vec![1.0, 0.0]).await.unwrap();
        store.insert("large".into(), vec![10.0, 0.0]).await.unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].key, "large");
        assert_eq!(results[1].key, "small");
    }
}
