//! Reader for trained word2vec models.
//!
//! Training happens in an external tool; this module loads its output and
//! answers "which words are closest" queries with cosine similarity.
//! Both common file layouts are supported. They share a `"<words> <dims>"`
//! header line. In the text layout each following line holds a word and
//! its `dims` floats. In the binary layout each word is terminated by a
//! space and followed by `dims` little-endian `f32` values.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::vector::{analogy, cosine_similarity};

/// Upper bound on values reserved up front; larger models grow as they load.
const PREALLOC_VALUES: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Binary,
}

/// A word and how similar it is to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    pub word: String,
    pub similarity: f32,
}

impl fmt::Display for Nearest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3})", self.word, self.similarity)
    }
}

/// Word vectors stored contiguously as `[w1_d1, w1_d2, ..., w2_d1, ...]`.
#[derive(Debug, Clone)]
pub struct Model {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<f32>,
    dimension: usize,
}

impl Model {
    pub fn load(path: impl AsRef<Path>, format: Format) -> Result<Model> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let model = match format {
            Format::Text => Model::from_text(reader)?,
            Format::Binary => Model::from_binary(reader)?,
        };
        info!(path = %path.display(), words = model.len(), dims = model.dimension, "loaded word2vec model");
        Ok(model)
    }

    pub fn from_text<R: BufRead>(reader: R) -> Result<Model> {
        let mut lines = reader.lines();
        let header = lines.next().transpose()?.unwrap_or_default();
        let (count, dimension) = parse_header(&header)?;
        let mut model = Model::with_capacity(count, dimension)?;

        for (i, line) in lines.enumerate() {
            let line = line?;
            let line_no = i + 2;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };

            let values: Vec<f32> = parts
                .map(|p| p.parse::<f32>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| Error::Model { line: line_no, message: format!("bad value for '{}': {}", word, e) })?;

            if values.len() != dimension {
                return Err(Error::Model {
                    line: line_no,
                    message: format!("'{}' has {} values, expected {}", word, values.len(), dimension),
                });
            }
            model.push(word.to_string(), &values);
        }

        model.check_count(count)?;
        Ok(model)
    }

    pub fn from_binary<R: BufRead>(mut reader: R) -> Result<Model> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let (count, dimension) = parse_header(&header)?;
        let mut model = Model::with_capacity(count, dimension)?;

        let mut word = Vec::new();
        let mut bytes = [0u8; 4];
        let mut values = Vec::new();

        for entry in 0..count {
            word.clear();
            reader.read_until(b' ', &mut word)?;
            if word.last() != Some(&b' ') {
                return Err(Error::Model { line: entry + 2, message: "unexpected end of file".to_string() });
            }
            word.pop();

            values.clear();
            for _ in 0..dimension {
                reader.read_exact(&mut bytes)?;
                values.push(f32::from_le_bytes(bytes));
            }

            let text = String::from_utf8_lossy(&word);
            model.push(text.trim_start_matches('\n').to_string(), &values);
        }

        Ok(model)
    }

    fn with_capacity(count: usize, dimension: usize) -> Result<Model> {
        let total = count.checked_mul(dimension).ok_or_else(|| Error::Model {
            line: 1,
            message: format!("header declares {} words of {} dimensions, too large", count, dimension),
        })?;
        let reserved = total.min(PREALLOC_VALUES) / dimension;

        Ok(Model {
            words: Vec::with_capacity(reserved),
            index: HashMap::with_capacity(reserved),
            vectors: Vec::with_capacity(reserved * dimension),
            dimension,
        })
    }

    fn push(&mut self, word: String, values: &[f32]) {
        self.index.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.vectors.extend_from_slice(values);
    }

    fn check_count(&self, expected: usize) -> Result<()> {
        if self.words.len() != expected {
            return Err(Error::Model {
                line: 1,
                message: format!("header declares {} words, found {}", expected, self.words.len()),
            });
        }
        Ok(())
    }

    /// Retrieves a vector slice from the flat array by index.
    fn get_vector(&self, index: usize) -> &[f32] {
        let start = index * self.dimension;
        &self.vectors[start..start + self.dimension]
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn vector_of(&self, word: &str) -> Result<&[f32]> {
        self.index.get(word)
            .map(|&i| self.get_vector(i))
            .ok_or_else(|| Error::UnknownWord(word.to_string()))
    }

    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        Ok(cosine_similarity(self.vector_of(a)?, self.vector_of(b)?))
    }

    /// The `n` words most similar to `word`, excluding `word` itself.
    pub fn nearest(&self, word: &str, n: usize) -> Result<Vec<Nearest>> {
        let vector = self.vector_of(word)?;
        Ok(self.nearest_to(vector, n, &[word]))
    }

    /// The `n` words most similar to `vector`, best first, skipping any
    /// word listed in `exclude`.
    pub fn nearest_to(&self, vector: &[f32], n: usize, exclude: &[&str]) -> Vec<Nearest> {
        if n == 0 {
            return Vec::new();
        }

        let mut best: Vec<(usize, f32)> = Vec::with_capacity(n + 1);
        for (i, word) in self.words.iter().enumerate() {
            if exclude.contains(&word.as_str()) {
                continue;
            }
            let sim = cosine_similarity(vector, self.get_vector(i));
            let insert_index = best.partition_point(|&x| x.1 >= sim);
            if insert_index < n {
                best.insert(insert_index, (i, sim));
                best.truncate(n);
            }
        }

        best.into_iter()
            .map(|(i, similarity)| Nearest { word: self.words[i].clone(), similarity })
            .collect()
    }

    /// Words nearest to `a - b + c`, excluding the three inputs.
    pub fn analogy(&self, a: &str, b: &str, c: &str, n: usize) -> Result<Vec<Nearest>> {
        let target = analogy(self.vector_of(a)?, self.vector_of(b)?, self.vector_of(c)?);
        Ok(self.nearest_to(&target, n, &[a, b, c]))
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let bad = |message: String| Error::Model { line: 1, message };
    let mut parts = header.split_whitespace();

    let mut field = |name: &str| -> Result<usize> {
        let raw = parts.next().ok_or_else(|| bad(format!("missing {} in header", name)))?;
        raw.parse().map_err(|_| bad(format!("invalid {} '{}' in header", name, raw)))
    };

    let count = field("word count")?;
    let dimension = field("dimension")?;
    if dimension == 0 {
        return Err(bad("dimension must be positive".to_string()));
    }
    Ok((count, dimension))
}
