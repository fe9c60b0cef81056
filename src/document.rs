//! Data types for documents and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document containing decoded text and metadata.
///
/// Encoding detection and file extraction happen upstream; the engine
/// only sees a normalized sequence of characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with the given id and text and no metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), metadata: HashMap::new() }
    }
}

/// A retrieved store entry paired with a relevance score.
///
/// Entries are keyed by their chunk text, so `key` is the retrievable
/// context itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The key of the stored entry (the chunk text).
    pub key: String,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
