//! Similarity reporting over collections of embeddings.

use crate::vector::cosine_similarity;

/// Anything that can produce its vector form.
///
/// Labels such as a name or source text live on the implementing type and
/// only matter for reporting.
pub trait Embedding {
    fn vector(&self) -> Vec<f32>;
}

impl Embedding for Vec<f32> {
    fn vector(&self) -> Vec<f32> {
        self.clone()
    }
}

impl<T: Embedding + ?Sized> Embedding for &T {
    fn vector(&self) -> Vec<f32> {
        (**self).vector()
    }
}

/// Outcome of comparing one target against one candidate.
#[derive(Debug)]
pub struct SimilarityResult<'a, E: ?Sized> {
    pub target: &'a E,
    pub candidate: &'a E,
    /// Cosine similarity in [-1, 1].
    pub similarity: f32,
    /// `similarity * 100`, for display.
    pub percentage: f32,
}

/// Compares `target` against every candidate.
///
/// Results come back in the same order as `candidates`; no sorting is done.
/// The target may appear among the candidates, in which case its own entry
/// scores `1.0` (or `0.0` for a zero vector).
///
/// # Examples
///
/// ```
/// use vecsim::similarity::similarity;
///
/// let points: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
/// let results = similarity(&points[0], &points);
///
/// assert_eq!(results.len(), 3);
/// assert!((results[0].similarity - 1.0).abs() < 1e-6);
/// assert_eq!(results[1].similarity, 0.0);
/// ```
pub fn similarity<'a, E: Embedding>(target: &'a E, candidates: &'a [E]) -> Vec<SimilarityResult<'a, E>> {
    let target_vec = target.vector();

    candidates.iter()
        .map(|candidate| {
            let similarity = cosine_similarity(&target_vec, &candidate.vector());
            SimilarityResult {
                target,
                candidate,
                similarity,
                percentage: similarity * 100.0,
            }
        })
        .collect()
}
