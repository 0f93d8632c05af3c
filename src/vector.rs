//! This is the vector math module
//! Provide cosine similarity and element-wise arithmetic, plus the
//! dot product and distance helpers used by the document store

use crate::error::{Error, Result};

/// Cosine Similarity
/// cos = dot(x, y) / (||x|| * ||y||)
///
/// Each product is taken in `f32` and summed in `f64`, then the ratio is
/// narrowed back to `f32`. If either vector has a zero self dot-product
/// (all zeros, or empty) the result is exactly `0.0`.
///
/// Both vectors are expected to have the same length. Only the
/// overlapping prefix is read otherwise.
///
/// # Examples
///
/// ```
/// use vecsim::vector::cosine_similarity;
///
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
/// assert!((cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]) - 1.0).abs() < 1e-6);
/// ```
pub fn cosine_similarity(x: &[f32], y: &[f32]) -> f32 {
    let (mut sum, mut s1, mut s2) = (0.0f64, 0.0f64, 0.0f64);

    for (a, b) in x.iter().zip(y.iter()) {
        sum += (a * b) as f64;
        s1 += (a * a) as f64;
        s2 += (b * b) as f64;
    }

    if s1 == 0.0 || s2 == 0.0 {
        return 0.0;
    }

    (sum / (s1.sqrt() * s2.sqrt())) as f32
}

/// Element-wise addition, in place.
///
/// Only the first `min(a.len(), b.len())` components of `a` change. The
/// rest of `a` is left untouched and any extra components of `b` are
/// ignored.
pub fn add_assign(a: &mut [f32], b: &[f32]) {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
}

/// Element-wise subtraction, in place. Same length rules as [`add_assign`].
pub fn sub_assign(a: &mut [f32], b: &[f32]) {
    for (x, y) in a.iter_mut().zip(b) {
        *x -= y;
    }
}

/// Adds `b` into `a` and returns `a`.
///
/// The result always has `a`'s length; mismatched lengths are not an error.
///
/// ```
/// use vecsim::vector::add;
///
/// assert_eq!(add(vec![5.0], &[3.0]), vec![8.0]);
/// assert_eq!(add(vec![1.0, 2.0, 3.0], &[1.0]), vec![2.0, 2.0, 3.0]);
/// ```
pub fn add(mut a: Vec<f32>, b: &[f32]) -> Vec<f32> {
    add_assign(&mut a, b);
    a
}

/// Subtracts `b` from `a` and returns `a`.
///
/// ```
/// use vecsim::vector::sub;
///
/// assert_eq!(sub(vec![5.0, 2.0], &[3.0, 1.0]), vec![2.0, 1.0]);
/// ```
pub fn sub(mut a: Vec<f32>, b: &[f32]) -> Vec<f32> {
    sub_assign(&mut a, b);
    a
}

/// Flips the sign of every component.
///
/// ```
/// use vecsim::vector::negate;
///
/// assert_eq!(negate(&[1.0, -2.0, 0.5]), vec![-1.0, 2.0, -0.5]);
/// ```
pub fn negate(v: &[f32]) -> Vec<f32> {
    v.iter().map(|x| -x).collect()
}

/// Analogy composition: `a - b + c`.
///
/// With the hand-crafted dataset, `king - man + woman` lands exactly on
/// `queen`.
pub fn analogy(a: &[f32], b: &[f32], c: &[f32]) -> Vec<f32> {
    add(sub(a.to_vec(), b), c)
}

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Can only process vectors with same dimensions
pub fn dot_product(left: &[f32], right: &[f32]) -> Result<f32> {
    if left.len() != right.len() {
        return Err(Error::Dimension { expected: left.len(), got: right.len() });
    }

    let dot_prod = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum();

    Ok(dot_prod)
}

/// Euclidean distance, for equal-length vectors
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> Result<f32> {
    if left.len() != right.len() {
        return Err(Error::Dimension { expected: left.len(), got: right.len() });
    }

    Ok(left.iter()
        .zip(right.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt())
}

#[cfg(test)]
mod vector_test {
    use super::*;

    // ========== Cosine Similarity Tests ==========

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 0.0, 1.0, 1.0, -1.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-1.0, -2.0, -3.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_scale_invariant() {
        // [3,4] and [6,8] point the same way
        let result = cosine_similarity(&[3.0, 4.0], &[6.0, 8.0]);
        assert!((result - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_known_angle() {
        // 45 degrees apart
        let result = cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]);
        assert!((result - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let v = vec![1.0, 2.0, 3.0];
        let z = vec![0.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&v, &z), 0.0);
        assert_eq!(cosine_similarity(&z, &v), 0.0);
        assert_eq!(cosine_similarity(&z, &z), 0.0);
    }

    #[test]
    fn test_cosine_empty_is_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = vec![0.3, -1.2, 4.5, 0.0, 2.2];
        let b = vec![1.1, 0.4, -0.7, 3.3, 0.9];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_high_dimension_self() {
        // Long vectors still come back as 1.0 thanks to f64 accumulation
        let v: Vec<f32> = (0..1024).map(|i| ((i % 17) as f32 - 8.0) * 0.013).collect();
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-5);
    }

    // ========== Add / Sub Shortcut Table ==========

    #[test]
    fn test_add_one_dim() {
        assert_eq!(add(vec![5.0], &[3.0]), vec![8.0]);
    }

    #[test]
    fn test_add_two_by_one() {
        assert_eq!(add(vec![5.0, 2.0], &[3.0]), vec![8.0, 2.0]);
    }

    #[test]
    fn test_add_three_by_one() {
        // Same answer the subtraction shortcut gives for (3, 1)
        assert_eq!(add(vec![1.0, 2.0, 3.0], &[10.0]), vec![11.0, 2.0, 3.0]);
    }

    #[test]
    fn test_add_two_by_two() {
        assert_eq!(add(vec![1.0, 2.0], &[3.0, 4.0]), vec![4.0, 6.0]);
    }

    #[test]
    fn test_add_three_by_two() {
        assert_eq!(add(vec![1.0, 2.0, 3.0], &[3.0, 4.0]), vec![4.0, 6.0, 3.0]);
    }

    #[test]
    fn test_add_three_by_three() {
        assert_eq!(add(vec![1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sub_one_dim() {
        assert_eq!(sub(vec![5.0], &[3.0]), vec![2.0]);
    }

    #[test]
    fn test_sub_two_by_two() {
        assert_eq!(sub(vec![5.0, 2.0], &[3.0, 1.0]), vec![2.0, 1.0]);
    }

    #[test]
    fn test_sub_three_by_one() {
        assert_eq!(sub(vec![1.0, 2.0, 3.0], &[10.0]), vec![-9.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sub_three_by_two() {
        assert_eq!(sub(vec![1.0, 2.0, 3.0], &[3.0, 4.0]), vec![-2.0, -2.0, 3.0]);
    }

    #[test]
    fn test_sub_three_by_three() {
        assert_eq!(sub(vec![4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]), vec![3.0, 2.0, 1.0]);
    }

    // ========== General Path ==========

    #[test]
    fn test_add_longer_b_is_truncated() {
        let result = add(vec![1.0, 1.0, 1.0, 1.0], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(result, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_sub_shorter_b_keeps_tail() {
        let tail = 0.1f32 + 0.2f32;
        let result = sub(vec![9.0, 9.0, 9.0, 9.0, tail], &[1.0, 2.0]);
        assert_eq!(result.len(), 5);
        assert_eq!(&result[..2], &[8.0, 7.0]);
        assert_eq!(result[4].to_bits(), tail.to_bits());
    }

    #[test]
    fn test_add_empty_b() {
        assert_eq!(add(vec![1.0, 2.0], &[]), vec![1.0, 2.0]);
    }

    #[test]
    fn test_add_empty_a() {
        assert!(add(vec![], &[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_sub_matches_add_negate() {
        let v = vec![0.5, -1.5, 2.25, 8.0, -0.125];
        let w = vec![1.0, 0.25, -3.0, 0.5, 4.0];
        assert_eq!(sub(v.clone(), &w), add(v, &negate(&w)));
    }

    #[test]
    fn test_assign_forms() {
        let mut a = [1.0, 2.0, 3.0];
        add_assign(&mut a, &[1.0, 1.0]);
        assert_eq!(a, [2.0, 3.0, 3.0]);
        sub_assign(&mut a, &[2.0, 3.0, 3.0, 99.0]);
        assert_eq!(a, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_analogy_king_queen() {
        let king = [1.0, 0.0, 1.0, 1.0, -1.0];
        let man = [0.0, 0.0, 1.0, 0.0, -1.0];
        let woman = [0.0, 0.0, 1.0, 0.0, 1.0];
        let queen = [1.0, 0.0, 1.0, 1.0, 1.0];

        let king_sub_man = sub(king.to_vec(), &man);
        assert_eq!(king_sub_man, vec![1.0, 0.0, 0.0, 1.0, 0.0]);

        let result = add(king_sub_man, &woman);
        assert_eq!(result, queen.to_vec());
        assert_eq!(analogy(&king, &man, &woman), queen.to_vec());
        assert!((cosine_similarity(&result, &queen) - 1.0).abs() < 1e-6);
    }

    // ========== Dot Product / Distance Tests ==========

    #[test]
    fn test_dot_product_basic() {
        // 1*4 + 2*5 + 3*6 = 32
        let result = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert!((result - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_dimension_mismatch() {
        let result = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert!(matches!(result, Err(Error::Dimension { expected: 3, got: 2 })));
    }

    #[test]
    fn test_euclidean_distance() {
        let result = euclidean_distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]).unwrap();
        assert!((result - 5.0).abs() < 1e-6);
        assert!(euclidean_distance(&[1.0], &[1.0, 2.0]).is_err());
    }
}
