//! Runtime configuration for the embedding service and vector search.

use crate::store::VectorSearch;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBED_MODEL: &str = "mxbai-embed-large";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Ollama server
    pub ollama_url: String,

    /// Model used to create embeddings
    pub embed_model: String,

    /// Texts sent to the embedder per request
    pub batch_size: usize,

    /// Neighbors a vector search may consider
    pub num_candidates: usize,

    /// Results a vector search returns
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            batch_size: 10,
            num_candidates: 5,
            limit: 5,
        }
    }
}

impl Config {
    pub fn with_ollama_url(mut self, url: impl Into<String>) -> Self {
        self.ollama_url = url.into();
        self
    }

    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = model.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the search limit. `num_candidates` is raised to match if it
    /// would otherwise fall below the limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self.num_candidates = self.num_candidates.max(limit);
        self
    }

    pub fn with_num_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    /// Sets both search parameters as given. An invalid pair is left for
    /// the store to reject.
    pub fn with_search(mut self, num_candidates: usize, limit: usize) -> Self {
        self.num_candidates = num_candidates;
        self.limit = limit;
        self
    }

    pub fn search(&self) -> VectorSearch {
        VectorSearch { num_candidates: self.num_candidates, limit: self.limit }
    }
}
