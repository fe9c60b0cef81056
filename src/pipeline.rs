//! Retrieval pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the ingest-and-query workflow by
//! composing an [`EmbeddingProvider`], a [`VectorStore`], and a
//! [`Chunker`]. Ingest flows one way (document → chunks → vectors →
//! store) and so does query (query text → query vector → ranked
//! entries). The pipeline returns ranked chunk text for the caller to
//! assemble into a generation prompt; it never formats prompts or calls
//! a generation model itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragcore::{Document, RagPipeline, RetrievalConfig};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .embedder(Arc::new(my_embedder))
//!     .build()?;
//!
//! pipeline.ingest(&Document::new("doc-1", text)).await?;
//! let context = pipeline.query_texts("what does the contract say?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::{Chunker, SentenceChunker};
use crate::config::RetrievalConfig;
use crate::document::{Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::inmemory::InMemoryVectorStore;
use crate::vectorstore::VectorStore;

/// The retrieval pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → store) and query
/// execution (embed → search). Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RetrievalConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Ingest a document: chunk → embed → store.
    ///
    /// Chunk texts are embedded in a single batch call, then each
    /// (chunk text, vector) pair is stored keyed by the chunk text.
    /// Nothing is inserted unless the whole batch call succeeds, so a
    /// failed ingest leaves the store exactly as it was.
    ///
    /// Returns the number of chunks stored.
    ///
    /// # Errors
    ///
    /// Embedding failures propagate unchanged so the caller can inspect
    /// the [`kind`](crate::EmbeddingErrorKind). Returns
    /// [`RagError::BatchSizeMismatch`] if the provider answers with the
    /// wrong number of vectors.
    pub async fn ingest(&self, document: &Document) -> Result<usize> {
        let chunks = self.chunker.split(&document.text);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingest");
        })?;

        if embeddings.len() != chunks.len() {
            error!(
                document.id = %document.id,
                expected = chunks.len(),
                actual = embeddings.len(),
                "embedding provider broke the batch contract"
            );
            return Err(RagError::BatchSizeMismatch {
                expected: chunks.len(),
                actual: embeddings.len(),
            });
        }

        let entries: Vec<(String, Vec<f32>)> = chunks.into_iter().zip(embeddings).collect();
        let chunk_count = entries.len();
        self.store.insert_batch(entries).await?;

        info!(document.id = %document.id, chunk_count, "ingested document");
        Ok(chunk_count)
    }

    /// Ingest multiple documents sequentially.
    ///
    /// Returns the total number of chunks stored. Stops at the first
    /// document that fails; earlier documents remain ingested.
    pub async fn ingest_batch(&self, documents: &[Document]) -> Result<usize> {
        let mut total = 0;
        for document in documents {
            total += self.ingest(document).await?;
        }
        Ok(total)
    }

    /// Query with the configured `top_k`: embed → search.
    pub async fn query(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.query_with_k(query, self.config.top_k).await
    }

    /// Query with a caller-supplied `k`.
    ///
    /// # Errors
    ///
    /// Embedding failures propagate unchanged; `k == 0` is rejected by
    /// the store as [`RagError::InvalidConfig`].
    pub async fn query_with_k(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during query");
        })?;

        let results = self.store.search(&query_embedding, k).await?;
        info!(result_count = results.len(), "query completed");
        Ok(results)
    }

    /// Query and return only the ranked chunk texts.
    ///
    /// This is the shape a generation caller joins into a context block.
    pub async fn query_texts(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.query(query).await?.into_iter().map(|r| r.key).collect())
    }

    /// Drop every stored vector, returning the collection to empty so a
    /// fresh ingestion session can begin.
    pub async fn clear(&self) {
        self.store.clear().await;
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// The embedding provider is required. The store defaults to a fresh
/// [`InMemoryVectorStore`] and the chunker to a [`SentenceChunker`]
/// derived from the config's chunk parameters.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = RagPipeline::builder()
///     .config(RetrievalConfig::builder().top_k(5).build()?)
///     .embedder(Arc::new(embedder))
///     .store(Arc::new(store))      // optional
///     .chunker(Arc::new(chunker))  // optional
///     .build()?;
/// ```
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RetrievalConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration. Defaults to [`RetrievalConfig::default()`].
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider (required).
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] if the embedder is missing or
    /// the config's chunk parameters cannot construct the default
    /// sentence chunker.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::InvalidConfig("embedder is required".to_string()))?;
        let store = self.store.unwrap_or_else(|| Arc::new(InMemoryVectorStore::new()));
        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(SentenceChunker::new(config.chunk_size, config.chunk_overlap)?),
        };

        Ok(RagPipeline { config, embedder, store, chunker })
    }
}
