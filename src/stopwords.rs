use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StopWordsError;

const ENGLISH: &str = include_str!("../data/english.txt");

/// Set of lowercase tokens excluded from the vocabulary
///
/// Serialized as a sorted list of words. Deserialized words are trimmed and
/// lowercased like any other insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Empty set, nothing is filtered
    pub fn none() -> Self {
        Self::default()
    }

    /// Built-in list for a locale
    /// Only English is bundled.
    pub fn for_locale(locale: &str) -> Result<Self, StopWordsError> {
        match locale.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(parse_stopwords(ENGLISH)),
            _ => Err(StopWordsError::UnknownLocale(locale.to_string())),
        }
    }

    /// Add one token, lowercased
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    /// `token` is expected to be lowercase already
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S> FromIterator<S> for StopWords
where
    S: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut stopwords = Self::none();
        for word in iter {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                stopwords.insert(word);
            }
        }
        stopwords
    }
}

impl From<Vec<String>> for StopWords {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<StopWords> for Vec<String> {
    fn from(stopwords: StopWords) -> Self {
        let mut words: Vec<String> = stopwords.words.into_iter().collect();
        words.sort_unstable();
        words
    }
}

/// Parse a newline-delimited list, one token per line
/// Blank lines are skipped, tokens are trimmed and lowercased.
pub fn parse_stopwords(text: &str) -> StopWords {
    text.lines().collect()
}

/// Load a newline-delimited stopword file
pub fn load_stopwords(path: impl AsRef<Path>) -> Result<StopWords, StopWordsError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| StopWordsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stopwords = parse_stopwords(&text);
    tracing::debug!(path = %path.display(), count = stopwords.len(), "loaded stopwords");
    Ok(stopwords)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_trims_lowercases_and_skips_blanks() {
        let sw = parse_stopwords("The\n  and \n\r\n\nOF\r\n");
        assert_eq!(sw.len(), 3);
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(sw.contains("of"));
        assert!(!sw.contains("The"));
    }

    #[test]
    fn builtin_english_list() {
        let sw = StopWords::for_locale("English").unwrap();
        assert_eq!(sw.len(), 179);
        assert!(sw.contains("the"));
        assert!(sw.contains("wouldn't"));
        assert!(!sw.contains("screen"));
    }

    #[test]
    fn unknown_locale_is_an_error() {
        let err = StopWords::for_locale("klingon").unwrap_err();
        assert!(matches!(err, StopWordsError::UnknownLocale(l) if l == "klingon"));
    }

    #[test]
    fn json_words_are_lowercased() {
        let sw: StopWords = serde_json::from_str(r#"["The", " OF ", ""]"#).unwrap();
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("the"));
        assert!(sw.contains("of"));
        assert_eq!(serde_json::to_string(&sw).unwrap(), r#"["of","the"]"#);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();
        let sw = load_stopwords(file.path()).unwrap();
        assert!(sw.contains("alpha") && sw.contains("beta"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_stopwords("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, StopWordsError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
