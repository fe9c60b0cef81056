//! Document chunking strategies.
//!
//! This module provides the [`Chunker`] trait and two implementations:
//!
//! - [`SentenceChunker`] — splits at sentence boundaries where possible,
//!   with configurable overlap between consecutive chunks
//! - [`FixedSizeChunker`] — splits by character count at a fixed stride
//!
//! Both operate on character indices, so multi-byte text is split safely.

use crate::error::{RagError, Result};

/// How far back from a candidate cut point to look for a sentence
/// terminator or space before falling back to a hard cut.
const SENTENCE_SEARCH_WINDOW: usize = 200;

/// A strategy for splitting text into chunks.
///
/// Implementations produce an ordered sequence of substrings bounded by
/// the configured chunk size. Chunking is pure computation; embeddings
/// are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty (or all-whitespace) input.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits text into overlapping chunks, preferring sentence boundaries.
///
/// Whitespace runs are collapsed to single spaces before splitting. Each
/// cut point is moved back to the last `.`, `?` or `!` within
/// [`SENTENCE_SEARCH_WINDOW`] characters of the candidate position, then
/// to the last space, and only hard-cut when neither exists. Consecutive
/// chunks overlap by `chunk_overlap` characters so sentence context is
/// not lost across a boundary.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::SentenceChunker;
///
/// let chunker = SentenceChunker::new(1000, 200)?;
/// let chunks = chunker.split(&document_text);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceChunker {
    /// Create a new `SentenceChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] unless `chunk_overlap + 1 < chunk_size`.
    /// The backward sentence search needs that slack to guarantee the cursor
    /// advances on every step.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_overlap >= chunk_size.saturating_sub(1) {
            return Err(RagError::InvalidConfig(format!(
                "chunk_overlap ({chunk_overlap}) leaves no room to advance within chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for SentenceChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() <= self.chunk_size {
            return vec![normalized];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = start + self.chunk_size;
            if end >= chars.len() {
                push_trimmed(&mut chunks, &chars[start..]);
                break;
            }

            let window_start = end.saturating_sub(SENTENCE_SEARCH_WINDOW);
            let sentence_end = rfind_char(&chars, window_start, end, is_sentence_terminal)
                .filter(|&p| p > start);
            let next = if let Some(p) = sentence_end {
                push_trimmed(&mut chunks, &chars[start..=p]);
                (p + 1).saturating_sub(self.chunk_overlap)
            } else if let Some(p) =
                rfind_char(&chars, window_start, end, |c| c == ' ').filter(|&p| p > start)
            {
                push_trimmed(&mut chunks, &chars[start..p]);
                p.saturating_sub(self.chunk_overlap)
            } else {
                push_trimmed(&mut chunks, &chars[start..end]);
                end.saturating_sub(self.chunk_overlap)
            };

            // Overlap may point at or before the current start; the cursor
            // must still move forward on every iteration.
            start = next.max(start + 1);
        }

        chunks
    }
}

/// Splits text into fixed-size chunks by character count at a fixed stride.
///
/// Emits `text[i..i + chunk_size]` for `i` stepping by
/// `chunk_size - chunk_overlap`; the final chunk may be shorter. Input
/// text is taken as-is, with no whitespace normalization and no sentence
/// awareness.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(256, 50)?;
/// let chunks = chunker.split(&document_text);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] if `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_overlap >= chunk_size {
            return Err(RagError::InvalidConfig(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            start += step;
        }

        chunks
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Index of the last character in `chars[from..to]` matching `pred`.
fn rfind_char(chars: &[char], from: usize, to: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    chars[from..to].iter().rposition(|&c| pred(c)).map(|i| from + i)
}

/// Push the trimmed chunk, dropping it if trimming leaves nothing.
fn push_trimmed(chunks: &mut Vec<String>, chars: &[char]) {
    let chunk = chars.iter().collect::<String>();
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
