//! # vecsim - Learning Embeddings and Vector Similarity
//!
//! vecsim is a learning project for exploring embeddings. At its core are
//! cosine similarity, a similarity report over a set of embeddings, and
//! element-wise vector arithmetic for analogy composition. Around that sit
//! an in-memory document store with vector search, an Ollama embedding
//! client, and a reader for trained word2vec models.
//!
//! ## Example
//!
//! ```
//! use vecsim::features::royalty;
//! use vecsim::similarity::Embedding;
//! use vecsim::vector::{add, cosine_similarity, sub};
//!
//! let data = royalty(); // Horse, Man, Woman, King, Queen
//!
//! // King - Man + Woman ~= Queen
//! let king_sub_man = sub(data[3].vector(), &data[1].vector());
//! let plus_woman = add(king_sub_man, &data[2].vector());
//!
//! let result = cosine_similarity(&plus_woman, &data[4].vector());
//! assert!((result - 1.0).abs() < 1e-6);
//! ```

pub mod config;
pub mod embedder;
pub mod error;
pub mod features;
pub mod similarity;
pub mod store;
pub mod text;
pub mod vector;
pub mod word2vec;

pub use config::Config;
pub use embedder::{Embedder, OllamaEmbedder};
pub use error::{Error, Result};
pub use similarity::{Embedding, SimilarityResult, similarity};
pub use store::{Document, DocumentStore, IndexSettings, Metric, VectorSearch};
pub use vector::{add, cosine_similarity, sub};
