//! Retrieval engine for retrieval-augmented generation.
//!
//! This crate provides:
//! - Sentence-aware and fixed-stride text chunking
//! - An async embedding port with a feature-gated OpenAI backend
//! - An exact in-memory vector store with pluggable similarity
//! - A pipeline composing chunk → embed → store and embed → search
//!
//! The engine stops at ranked chunk text: prompt assembly, generation
//! calls, file extraction, and HTTP serving all live with the caller.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod similarity;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker, SentenceChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use document::{Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{EmbeddingErrorKind, RagError, Result};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use similarity::{Cosine, DotProduct, Similarity};
pub use vectorstore::VectorStore;
