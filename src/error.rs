use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the similarity ranker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("base document `{0}` has no text")]
    EmptyDocument(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors returned while loading a stopword list
#[derive(Error, Debug)]
pub enum StopWordsError {
    #[error("failed to read stopwords from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no built-in stopword list for locale `{0}`")]
    UnknownLocale(String),
}
