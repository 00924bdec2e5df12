use serde::{Deserialize, Serialize};

use crate::{stopwords::StopWords, vectorizer::token::TokenFrequency};

/// Text analyzer
/// Splits text into word tokens and counts them.
///
/// A token is a maximal run of word characters (Unicode alphanumerics and
/// `_`) at least `min_token_chars` long. Stopwords are always matched
/// against the lowercased token, whether or not `lowercase` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analyzer {
    pub lowercase: bool,
    pub min_token_chars: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_chars: 2,
        }
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Analyzer {
    /// Iterate raw word runs of `text`, before case folding and filtering
    pub fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min = self.min_token_chars.max(1);
        text.split(|c: char| !is_word_char(c))
            .filter(move |w| !w.is_empty() && w.chars().count() >= min)
    }

    /// Tokens of `text` after case folding and stopword removal
    pub fn tokenize(&self, text: &str, stopwords: &StopWords) -> Vec<String> {
        self.words(text)
            .filter_map(|w| {
                let lower = w.to_lowercase();
                if stopwords.contains(&lower) {
                    None
                } else if self.lowercase {
                    Some(lower)
                } else {
                    Some(w.to_string())
                }
            })
            .collect()
    }

    /// Count the tokens of `text`
    pub fn analyze(&self, text: &str, stopwords: &StopWords) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&self.tokenize(text, stopwords));
        freq
    }
}
