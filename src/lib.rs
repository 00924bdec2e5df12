/// This crate ranks proposal documents against an RFP using TF-IDF cosine similarity.
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod ranker;
pub mod stopwords;
pub mod storage;
pub mod utils;
pub mod vectorizer;

/// Similarity Ranker
/// The top-level entry point of this crate.
/// Fits one TF-IDF vector space over the base document and the corpus, then
/// scores every candidate by cosine similarity to the base.
///
/// `Ranker<E, C>` has the following generic parameters:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
/// - `C`: similarity measure (e.g., DefaultCompare)
///
/// The free function `rank` runs the default ranker with a given `top_n`.
///
/// # Examples
/// ```
/// use rfp_match::{rank, Corpus, Document, StopWords};
///
/// let base = Document::new("rfp", "fine screen project bissell point");
/// let corpus: Corpus = [
///     ("A", "fine screen project"),
///     ("B", "unrelated text about bridges"),
///     ("C", "fine screen project bissell point exactly"),
/// ]
/// .into_iter()
/// .collect();
///
/// let result = rank(&base, &corpus, &StopWords::none(), 2).unwrap();
/// assert_eq!(result.keys(), vec!["C", "A"]);
/// ```
pub use ranker::{rank, Ranker, DEFAULT_TOP_N};

/// Document and Corpus
/// - `Document`: identifier and text of one document
/// - `Corpus`: ordered identifier -> text mapping of candidate documents
pub use document::{Corpus, Document};

/// Stopword Set
/// Tokens in this set never enter the vocabulary.
/// A built-in English list is available through `StopWords::for_locale`.
pub use stopwords::StopWords;

/// Token Frequency structure
/// Counts the occurrences of each token within one document.
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TokenFrequency;

/// Analyzer
/// Splits text into lowercase word tokens and drops stopwords.
pub use vectorizer::analyzer::Analyzer;

/// TF-IDF Vectorizer
/// Converts an ordered list of texts into L2-normalised TF-IDF rows sharing
/// one vocabulary.
pub use vectorizer::TFIDFVectorizer;

/// TF IDF Calculation Engine Trait
/// Defines the TF weighting and IDF used by the vectorizer.
/// - `DefaultTFIDFEngine`: raw counts with smoothed IDF
/// - `SublinearTFIDFEngine`: `1 + ln(tf)` with smoothed IDF
pub use vectorizer::tfidf::{DefaultTFIDFEngine, SublinearTFIDFEngine, TFIDFEngine};

/// Similarity measure between two normalised rows
pub use vectorizer::compare::{Compare, DefaultCompare};

/// Ranking result structures
/// - `ScoredResult`: ordered matches, best first, serialised as a JSON object
/// - `HitEntry`: one document key and its score
pub use vectorizer::evaluate::scoring::{HitEntry, ScoredResult};

pub use error::{RankError, StopWordsError};
