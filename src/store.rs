//! The document store module
//! Keeps `{text, embedding, metadata}` documents in memory and answers
//! nearest-neighbor queries over them

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::similarity::Embedding;
use crate::vector::{cosine_similarity, dot_product, euclidean_distance};

/// How documents are compared against a query vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Cosine,
    DotProduct,
    Euclidean,
}

/// Shape of the vector index: every stored embedding must have
/// `num_dimensions` components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub num_dimensions: usize,
    pub similarity: Metric,
}

impl IndexSettings {
    pub fn cosine(num_dimensions: usize) -> Self {
        IndexSettings { num_dimensions, similarity: Metric::Cosine }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Document { id: id.into(), text: text.into(), embedding, metadata: Map::new() }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Embedding for Document {
    fn vector(&self) -> Vec<f32> {
        self.embedding.clone()
    }
}

/// Parameters of a vector search.
///
/// `num_candidates` bounds how many neighbors a search may consider and
/// must be at least `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearch {
    pub num_candidates: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub score: f32,
}

/// Whether an insert created a new document or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    settings: IndexSettings,
    docs: Vec<Document>,
}

impl DocumentStore {
    /// Creates an empty store whose documents must match `settings`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsim::store::{DocumentStore, IndexSettings};
    ///
    /// let store = DocumentStore::new(IndexSettings::cosine(3));
    /// assert_eq!(store.count(), 0);
    /// ```
    pub fn new(settings: IndexSettings) -> DocumentStore {
        DocumentStore { settings, docs: Vec::new() }
    }

    pub fn settings(&self) -> IndexSettings {
        self.settings
    }

    /// Inserts a document, or replaces the one with the same ID.
    ///
    /// Embeddings are stored as given. A document whose embedding length
    /// differs from the index dimension is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsim::store::{Document, DocumentStore, IndexSettings, Upsert};
    ///
    /// let mut store = DocumentStore::new(IndexSettings::cosine(2));
    ///
    /// let result = store.insert(Document::new("a", "first", vec![3.0, 4.0]));
    /// assert_eq!(result.unwrap(), Upsert::Inserted);
    ///
    /// let result = store.insert(Document::new("a", "again", vec![1.0, 0.0]));
    /// assert_eq!(result.unwrap(), Upsert::Updated);
    ///
    /// // Dimension mismatch error
    /// assert!(store.insert(Document::new("b", "bad", vec![1.0, 2.0, 3.0])).is_err());
    /// ```
    pub fn insert(&mut self, doc: Document) -> Result<Upsert> {
        let dim = doc.embedding.len();
        if dim != self.settings.num_dimensions {
            return Err(Error::Dimension { expected: self.settings.num_dimensions, got: dim });
        }

        if let Some(existing) = self.docs.iter_mut().find(|d| d.id == doc.id) {
            debug!(id = %doc.id, "updated document");
            *existing = doc;
            return Ok(Upsert::Updated);
        }

        debug!(id = %doc.id, "inserted document");
        self.docs.push(doc);
        Ok(Upsert::Inserted)
    }

    /// Finds the documents nearest to `query`.
    ///
    /// Every document is scored, then the best `limit` are returned from
    /// highest to lowest score. Documents with equal scores keep their
    /// insertion order. Scores are normalized to be comparable across
    /// metrics: cosine and dot product map `s` to `(1 + s) / 2`, euclidean
    /// maps distance `d` to `1 / (1 + d)`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchResult>)` - At most `limit` results; empty for an empty store
    /// * `Err(Error)` - Wrong query dimension, `limit` of zero, or `num_candidates < limit`
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsim::store::{Document, DocumentStore, IndexSettings, VectorSearch};
    ///
    /// let mut store = DocumentStore::new(IndexSettings::cosine(3));
    /// store.insert(Document::new("vec1", "x axis", vec![1.0, 0.0, 0.0])).unwrap();
    /// store.insert(Document::new("vec2", "y axis", vec![0.0, 1.0, 0.0])).unwrap();
    /// store.insert(Document::new("vec3", "diagonal", vec![0.7, 0.7, 0.0])).unwrap();
    ///
    /// let search = VectorSearch { num_candidates: 5, limit: 2 };
    /// let results = store.vector_search(&[1.0, 0.0, 0.0], search).unwrap();
    /// assert_eq!(results.len(), 2);
    /// assert_eq!(results[0].id, "vec1");
    /// assert!((results[0].score - 1.0).abs() < 1e-5);
    /// ```
    pub fn vector_search(&self, query: &[f32], search: VectorSearch) -> Result<Vec<SearchResult>> {
        if query.len() != self.settings.num_dimensions {
            return Err(Error::Dimension { expected: self.settings.num_dimensions, got: query.len() });
        }
        if search.limit == 0 {
            return Err(Error::InvalidSearch("limit must be greater than zero".to_string()));
        }
        if search.num_candidates < search.limit {
            return Err(Error::InvalidSearch(format!(
                "numCandidates ({}) must be at least limit ({})",
                search.num_candidates, search.limit
            )));
        }

        let top_k = search.limit;
        let mut best: Vec<(usize, f32)> = Vec::with_capacity(top_k + 1);
        for (i, doc) in self.docs.iter().enumerate() {
            let score = self.score(query, &doc.embedding)?;
            let insert_index = best.partition_point(|&x| x.1 >= score);
            if insert_index < top_k {
                best.insert(insert_index, (i, score));
                best.truncate(top_k);
            }
        }

        debug!(hits = best.len(), scanned = self.docs.len(), "vector search");

        Ok(best.iter()
            .map(|&(i, score)| {
                let doc = &self.docs[i];
                SearchResult {
                    id: doc.id.clone(),
                    text: doc.text.clone(),
                    embedding: doc.embedding.clone(),
                    score,
                }
            })
            .collect())
    }

    fn score(&self, query: &[f32], embedding: &[f32]) -> Result<f32> {
        let score = match self.settings.similarity {
            Metric::Cosine => (1.0 + cosine_similarity(query, embedding)) / 2.0,
            Metric::DotProduct => (1.0 + dot_product(query, embedding)?) / 2.0,
            Metric::Euclidean => 1.0 / (1.0 + euclidean_distance(query, embedding)?),
        };
        Ok(score)
    }

    /// Retrieves a document by its ID.
    ///
    /// ```
    /// use vecsim::store::{Document, DocumentStore, IndexSettings};
    ///
    /// let mut store = DocumentStore::new(IndexSettings::cosine(2));
    /// store.insert(Document::new("vec1", "text", vec![3.0, 4.0])).unwrap();
    ///
    /// assert!(store.get("vec1").is_some());
    /// assert!(store.get("vec2").is_none());
    /// ```
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Deletes a document by its ID.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        match self.docs.iter().position(|d| d.id == id) {
            Some(i) => {
                self.docs.remove(i);
                debug!(id, "deleted document");
                Ok(())
            }
            None => Err(Error::DocumentNotFound(id.to_string())),
        }
    }

    /// All documents in insertion order.
    pub fn list(&self) -> &[Document] {
        &self.docs
    }

    /// Returns the number of documents in the store.
    pub fn count(&self) -> usize {
        self.docs.len()
    }
}
