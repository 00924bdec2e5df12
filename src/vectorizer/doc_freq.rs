use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document frequencies over a fitted document set
///
/// Keeps the number of documents and, per term, the number of documents
/// containing it. The position of a term in the map is its vector dimension,
/// so the vocabulary order is the order terms were first seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocFrequency {
    doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    term_counts: IndexMap<Box<str>, u64>,
}

impl DocFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one document's distinct terms
    pub fn add_doc(&mut self, freq: &TokenFrequency) {
        self.doc_num += 1;
        for (term, _) in freq.iter() {
            match self.term_counts.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    self.term_counts.insert(term.into(), 1);
                }
            }
        }
    }

    /// Get the number of documents
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Dimension of `term`, if it is in the vocabulary
    #[inline]
    pub fn dim_of(&self, term: &str) -> Option<usize> {
        self.term_counts.get_index_of(term)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// `(term, document count)` in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(t, &c)| (t.as_ref(), c))
    }

    pub fn term_at(&self, dim: usize) -> Option<&str> {
        self.term_counts.get_index(dim).map(|(t, _)| t.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(tokens: &[&str]) -> TokenFrequency {
        let mut f = TokenFrequency::new();
        f.add_tokens(tokens);
        f
    }

    #[test]
    fn counts_documents_not_occurrences() {
        let mut df = DocFrequency::new();
        df.add_doc(&freq(&["pump", "pump", "valve"]));
        df.add_doc(&freq(&["valve", "pipe"]));
        df.add_doc(&TokenFrequency::new());
        assert_eq!(df.get_doc_num(), 3);
        assert_eq!(df.get_term_count("pump"), 1);
        assert_eq!(df.get_term_count("valve"), 2);
        assert_eq!(df.get_term_count("missing"), 0);
        assert_eq!(df.vocab_size(), 3);
    }

    #[test]
    fn dimensions_follow_first_seen_order() {
        let mut df = DocFrequency::new();
        df.add_doc(&freq(&["b", "a"]));
        df.add_doc(&freq(&["c", "a"]));
        assert_eq!(df.dim_of("b"), Some(0));
        assert_eq!(df.dim_of("a"), Some(1));
        assert_eq!(df.dim_of("c"), Some(2));
        assert_eq!(df.term_at(2), Some("c"));
        assert_eq!(df.dim_of("d"), None);
    }
}
