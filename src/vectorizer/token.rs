use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

///  TokenFrequency
/// Raw occurrence counts of the tokens of one document.
///
/// # Examples
/// ```
/// use rfp_match::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["screen", "project", "screen"]);
/// assert_eq!(freq.token_count("screen"), 2);
/// assert_eq!(freq.token_count("pump"), 0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
        }
    }

    /// Count one occurrence of `token`
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// occurrences of `token`, 0 when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// `(token, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tokens_in_first_seen_order() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["b", "a", "b", "c", "b"]);
        assert_eq!(freq.token_count("b"), 3);
        assert_eq!(freq.token_count("zzz"), 0);
        let entries: Vec<(&str, u32)> = freq.iter().collect();
        assert_eq!(entries, vec![("b", 3), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn new_is_empty() {
        let freq = TokenFrequency::new();
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }
}
