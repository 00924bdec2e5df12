use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A document identifier paired with its extracted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Ordered candidate collection, identifier -> text
///
/// Identifiers are expected to be unique. Inserting an identifier that is
/// already present replaces its text but keeps its original position, so the
/// last write wins. Callers should not rely on this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    docs: IndexMap<String, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            docs: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a document, returning the text it replaced
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.docs.insert(id.into(), text.into())
    }

    pub fn push(&mut self, doc: Document) -> Option<String> {
        self.insert(doc.id, doc.text)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// `(id, text)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.docs.values().map(String::as_str)
    }
}

impl<I, T> FromIterator<(I, T)> for Corpus
where
    I: Into<String>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        let mut corpus = Corpus::new();
        for (id, text) in iter {
            corpus.insert(id, text);
        }
        corpus
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<It: IntoIterator<Item = Document>>(iter: It) -> Self {
        let mut corpus = Corpus::new();
        for doc in iter {
            corpus.push(doc);
        }
        corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let corpus: Corpus = [("b", "two"), ("a", "one"), ("c", "three")].into_iter().collect();
        assert_eq!(corpus.ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(corpus.texts().collect::<Vec<_>>(), vec!["two", "one", "three"]);
    }

    #[test]
    fn duplicate_id_replaces_text_in_place() {
        let mut corpus = Corpus::new();
        corpus.insert("a", "first");
        corpus.insert("b", "other");
        let prev = corpus.insert("a", "second");
        assert_eq!(prev.as_deref(), Some("first"));
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.iter().next(), Some(("a", "second")));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let corpus: Corpus = [Document::new("z", "last"), Document::new("a", "first")].into_iter().collect();
        let json = serde_json::to_string(&corpus).unwrap();
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
        let back: Corpus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, corpus);
    }
}
