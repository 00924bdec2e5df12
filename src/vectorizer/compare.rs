use num::Float;

use crate::utils::sparse::SparseVec;

pub trait Compare<N>
where
    N: Float,
{
    /// Cosine similarity in [0, 1]
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    fn cosine_similarity(a: &SparseVec<N>, b: &SparseVec<N>) -> f64;
}

/// Cosine for vectors that are already unit length
/// Reduces to the dot product. A zero vector on either side scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Float,
{
    #[inline]
    fn cosine_similarity(a: &SparseVec<N>, b: &SparseVec<N>) -> f64 {
        if a.is_zero() || b.is_zero() {
            return 0.0;
        }
        let dot = a.dot(b).to_f64().unwrap_or(0.0);
        if dot.is_nan() {
            return 0.0;
        }
        dot.clamp(0.0, 1.0)
    }
}
