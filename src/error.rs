//! Error types shared by the store, embedder, word2vec and text modules.
//!
//! The vector math in [`crate::vector`] and [`crate::similarity`] never
//! fails; every degenerate input there maps to a defined number instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding service returned {status}: {body}")]
    EmbeddingService { status: u16, body: String },

    #[error("embedding service returned {got} vectors for {expected} inputs")]
    EmbeddingCount { expected: usize, got: usize },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("invalid search: {0}")]
    InvalidSearch(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("word not in vocabulary: {0}")]
    UnknownWord(String),

    #[error("malformed model at line {line}: {message}")]
    Model { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
