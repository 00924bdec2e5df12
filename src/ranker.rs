use std::marker::PhantomData;

use rayon::prelude::*;

use crate::{
    document::{Corpus, Document},
    error::RankError,
    stopwords::StopWords,
    vectorizer::{
        analyzer::Analyzer,
        compare::{Compare, DefaultCompare},
        evaluate::scoring::{HitEntry, ScoredResult, SCORE_DECIMALS},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        TFIDFVectorizer,
    },
};

/// Number of matches returned when no limit is given
pub const DEFAULT_TOP_N: usize = 10;

/// Similarity ranker
///
/// Fits one TF-IDF space over the base document and every candidate
/// (base first), scores each candidate by cosine similarity to the base,
/// and returns the best `top_n`. Holds only configuration, so one ranker
/// can serve any number of calls, including concurrent ones.
#[derive(Debug, Clone)]
pub struct Ranker<E = DefaultTFIDFEngine, C = DefaultCompare> {
    pub analyzer: Analyzer,
    pub top_n: usize,
    _marker: PhantomData<(E, C)>,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> Ranker<E, C>
where
    E: TFIDFEngine<f64> + Send + Sync,
    C: Compare<f64>,
{
    pub fn new() -> Self {
        Self {
            analyzer: Analyzer::default(),
            top_n: DEFAULT_TOP_N,
            _marker: PhantomData,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Rank `corpus` against `base`
    ///
    /// Scores lie in [0, 1], rounded to five places, ordered descending.
    /// Equal scores keep corpus order.
    pub fn rank(&self, base: &Document, corpus: &Corpus, stopwords: &StopWords) -> Result<ScoredResult, RankError> {
        if self.top_n == 0 {
            return Err(RankError::InvalidArgument("top_n must be at least 1".to_string()));
        }
        if base.text.trim().is_empty() {
            return Err(RankError::EmptyDocument(base.id.clone()));
        }
        if corpus.is_empty() {
            return Ok(ScoredResult::default());
        }

        let mut texts: Vec<&str> = Vec::with_capacity(corpus.len() + 1);
        texts.push(&base.text);
        texts.extend(corpus.texts());

        let space: TFIDFVectorizer<f64, E> = TFIDFVectorizer::fit_transform(&texts, &self.analyzer, stopwords);
        let (base_vec, candidates) = match space.rows.split_first() {
            Some(split) => split,
            None => return Ok(ScoredResult::default()),
        };

        let list: Vec<HitEntry> = corpus
            .ids()
            .collect::<Vec<_>>()
            .into_par_iter()
            .zip(candidates.par_iter())
            .map(|(id, vec)| HitEntry {
                key: id.to_string(),
                score: C::cosine_similarity(base_vec, vec),
            })
            .collect();

        let mut result = ScoredResult::new(list);
        result
            .round_scores(SCORE_DECIMALS)
            .sort_by_score_desc()
            .truncate(self.top_n);

        tracing::debug!(
            base = %base.id,
            candidates = corpus.len(),
            returned = result.len(),
            "ranked corpus"
        );
        Ok(result)
    }
}

/// Rank `corpus` against `base` with the default engine
///
/// Convenience over [`Ranker`]. `top_n` must be at least 1; a larger value
/// than the corpus size returns every candidate.
pub fn rank(base: &Document, corpus: &Corpus, stopwords: &StopWords, top_n: usize) -> Result<ScoredResult, RankError> {
    Ranker::<DefaultTFIDFEngine, DefaultCompare>::new()
        .with_top_n(top_n)
        .rank(base, corpus, stopwords)
}
