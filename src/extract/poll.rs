use std::thread;
use std::time::{Duration, Instant};

use crate::config::PollConfig;
use crate::extract::{ExtractionError, SourceDocument, TextExtractor};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(120);

/// State of an asynchronous read operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStatus {
    NotStarted,
    Running,
    /// recognised text, one entry per line
    Succeeded(Vec<String>),
    Failed(String),
}

/// Submit-then-poll read service, such as a cloud OCR endpoint
pub trait ReadApi {
    /// Start reading the document at `url`, returning an operation id
    fn submit(&self, url: &str) -> Result<String, ExtractionError>;

    fn status(&self, operation_id: &str) -> Result<ReadStatus, ExtractionError>;
}

/// Drives a [`ReadApi`] to completion
///
/// Polls at a fixed interval and gives up with
/// [`ExtractionError::Timeout`] once `max_wait` has passed.
#[derive(Debug, Clone)]
pub struct PollingExtractor<A> {
    api: A,
    interval: Duration,
    max_wait: Duration,
}

impl<A> PollingExtractor<A>
where
    A: ReadApi,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    pub fn from_config(api: A, config: &PollConfig) -> Self {
        Self::new(api)
            .with_interval(config.interval())
            .with_max_wait(config.max_wait())
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Poll `operation_id` until it reaches a terminal state
    pub fn wait_for(&self, name: &str, operation_id: &str) -> Result<Vec<String>, ExtractionError> {
        let started = Instant::now();
        loop {
            match self.api.status(operation_id)? {
                ReadStatus::Succeeded(lines) => return Ok(lines),
                ReadStatus::Failed(reason) => {
                    return Err(ExtractionError::Failed {
                        name: name.to_string(),
                        reason,
                    })
                }
                ReadStatus::NotStarted | ReadStatus::Running => {}
            }
            let waited = started.elapsed();
            if waited >= self.max_wait {
                return Err(ExtractionError::Timeout {
                    name: name.to_string(),
                    waited,
                });
            }
            tracing::trace!(name, operation_id, ?waited, "read operation pending");
            thread::sleep(self.interval.min(self.max_wait - waited));
        }
    }
}

impl<A> TextExtractor for PollingExtractor<A>
where
    A: ReadApi,
{
    fn extract_text(&self, doc: &SourceDocument<'_>) -> Result<String, ExtractionError> {
        tracing::info!(name = doc.name, "starting text extraction");
        let operation_id = self.api.submit(doc.url)?;
        let lines = self.wait_for(doc.name, &operation_id)?;
        Ok(lines.join("\n"))
    }
}
