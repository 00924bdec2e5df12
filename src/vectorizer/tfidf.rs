use num::Float;

use crate::{utils::sparse::SparseVec, vectorizer::{doc_freq::DocFrequency, token::TokenFrequency}};

/// Smoothed inverse document frequency
/// `ln((1 + n) / (1 + df)) + 1`, so a term present in every document still
/// keeps a small positive weight.
#[inline]
pub fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
    ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

#[inline]
fn cast<N: Float>(v: f64) -> N {
    N::from(v).unwrap_or_else(N::zero)
}

pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Weight of a term occurring `count` times in a document
    fn tf(count: u32) -> f64;

    /// IDF weight per vocabulary dimension
    fn idf_vec(df: &DocFrequency) -> Vec<N> {
        let doc_num = df.get_doc_num();
        df.iter()
            .map(|(_, doc_freq)| cast(smooth_idf(doc_num, doc_freq)))
            .collect()
    }

    /// Unit-length TF-IDF vector of one document
    /// Terms outside the vocabulary are ignored. A document without any
    /// vocabulary term yields the zero vector.
    fn tfidf_vec(freq: &TokenFrequency, df: &DocFrequency, idf: &[N]) -> SparseVec<N> {
        let dim = df.vocab_size();
        let pairs = freq.iter().filter_map(|(term, count)| {
            let idx = df.dim_of(term)?;
            let w = idf.get(idx).copied()?;
            Some((idx, cast::<N>(Self::tf(count)) * w))
        });
        let mut vec = SparseVec::from_pairs(dim, pairs);
        vec.normalize();
        vec.shrink_to_fit();
        vec
    }
}

/// Raw term counts with smoothed IDF
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    #[inline]
    fn tf(count: u32) -> f64 {
        count as f64
    }
}

/// `1 + ln(count)` term weighting with smoothed IDF
/// Damps documents that repeat a few terms many times.
#[derive(Debug, Clone, Copy, Default)]
pub struct SublinearTFIDFEngine;

impl<N> TFIDFEngine<N> for SublinearTFIDFEngine
where
    N: Float,
{
    #[inline]
    fn tf(count: u32) -> f64 {
        if count == 0 {
            0.0
        } else {
            1.0 + (count as f64).ln()
        }
    }
}
