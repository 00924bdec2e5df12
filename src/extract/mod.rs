//! Text acquisition collaborator
//!
//! Turns a stored document (PDF, scan, text) into plain text. The ranker
//! only ever sees the final text.

pub mod command;
pub mod poll;

use std::time::Duration;

use thiserror::Error;

pub use command::CommandExtractor;
pub use poll::{PollingExtractor, ReadApi, ReadStatus};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("document `{name}` is unreadable: {reason}")]
    Unreadable { name: String, reason: String },
    #[error("text extraction failed for `{name}`: {reason}")]
    Failed { name: String, reason: String },
    #[error("text extraction for `{name}` did not finish within {waited:?}")]
    Timeout { name: String, waited: Duration },
    #[error("extractor I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document handed to an extractor
/// Extractors use whichever of the content or the direct link they need.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub content: &'a [u8],
}

pub trait TextExtractor {
    fn extract_text(&self, doc: &SourceDocument<'_>) -> Result<String, ExtractionError>;
}

impl<T> TextExtractor for &T
where
    T: TextExtractor + ?Sized,
{
    fn extract_text(&self, doc: &SourceDocument<'_>) -> Result<String, ExtractionError> {
        (**self).extract_text(doc)
    }
}

/// Reads documents that are already UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, doc: &SourceDocument<'_>) -> Result<String, ExtractionError> {
        String::from_utf8(doc.content.to_vec()).map_err(|e| ExtractionError::Unreadable {
            name: doc.name.to_string(),
            reason: e.to_string(),
        })
    }
}
