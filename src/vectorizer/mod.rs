pub mod analyzer;
pub mod compare;
pub mod doc_freq;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;

use crate::{
    stopwords::StopWords,
    utils::sparse::SparseVec,
    vectorizer::{
        analyzer::Analyzer,
        doc_freq::DocFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
    },
};

/// TF-IDF vector space fitted over one ordered document list
///
/// Every row shares the same vocabulary, so rows can be compared directly.
/// Rows keep the order of the input texts. Each row is L2-normalised.
///
/// `TFIDFVectorizer<N, E>`:
/// - `N`: float type of vector entries (f32, f64)
/// - `E`: TF-IDF weighting engine
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// document frequencies, also the vocabulary
    pub doc_freq: DocFrequency,
    /// IDF weight per dimension
    pub idf_vec: Vec<N>,
    /// one unit vector per input text
    pub rows: Vec<SparseVec<N>>,
    _marker: PhantomData<E>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Tokenize, count and weight `texts` in one pass
    pub fn fit_transform<T>(texts: &[T], analyzer: &Analyzer, stopwords: &StopWords) -> Self
    where
        T: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = texts
            .par_iter()
            .map(|text| analyzer.analyze(text.as_ref(), stopwords))
            .collect();

        let mut doc_freq = DocFrequency::new();
        for freq in &freqs {
            doc_freq.add_doc(freq);
        }
        let idf_vec = E::idf_vec(&doc_freq);

        let rows: Vec<SparseVec<N>> = freqs
            .par_iter()
            .map(|freq| E::tfidf_vec(freq, &doc_freq, &idf_vec))
            .collect();

        tracing::debug!(
            docs = rows.len(),
            vocab = doc_freq.vocab_size(),
            "fitted tf-idf vector space"
        );

        Self {
            doc_freq,
            idf_vec,
            rows,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.vocab_size()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVec<N>> {
        self.rows.get(index)
    }

    /// Check if the token is part of the vocabulary
    pub fn contains_token(&self, token: &str) -> bool {
        self.doc_freq.dim_of(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_share_one_vocabulary() {
        let texts = ["pump station", "pump valve", ""];
        let v: TFIDFVectorizer = TFIDFVectorizer::fit_transform(&texts, &Analyzer::default(), &StopWords::none());
        assert_eq!(v.doc_num(), 3);
        assert_eq!(v.vocab_size(), 3);
        assert!(v.rows.iter().all(|r| r.len() == 3));
        assert!(v.row(2).unwrap().is_zero());
        assert!(v.contains_token("valve"));
        assert!(!v.contains_token("bridge"));
    }

    #[test]
    fn stopwords_never_enter_vocabulary() {
        let sw: StopWords = ["the"].into_iter().collect();
        let texts = ["the pump", "the valve"];
        let v: TFIDFVectorizer<f32> = TFIDFVectorizer::fit_transform(&texts, &Analyzer::default(), &sw);
        assert!(!v.contains_token("the"));
        assert_eq!(v.vocab_size(), 2);
    }
}
