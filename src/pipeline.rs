//! RFP processing jobs over a blob store
//!
//! - [`Pipeline::ingest_proposals`] extracts text for newly uploaded proposals
//! - [`Pipeline::process_raw_rfp`] extracts text for the pending RFP
//! - [`Pipeline::run_similarity`] ranks the proposals against the RFP and
//!   publishes `<rfp>.json` to the results container

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    config::PipelineConfig,
    document::{Corpus, Document},
    error::RankError,
    extract::{ExtractionError, SourceDocument, TextExtractor},
    ranker::Ranker,
    stopwords::StopWords,
    storage::{blob_url, Blob, BlobStore, StorageError},
    utils::text::{file_stem, remove_breaks_and_dedent, strip_line_feeds, with_extension},
    vectorizer::evaluate::scoring::ScoredResult,
};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("container `{0}` has no documents to process")]
    NothingToProcess(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Rank(#[from] RankError),
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct Pipeline<'a, S, X>
where
    S: BlobStore + ?Sized,
    X: TextExtractor + ?Sized,
{
    store: &'a S,
    extractor: &'a X,
    config: &'a PipelineConfig,
    stopwords: StopWords,
}

impl<'a, S, X> Pipeline<'a, S, X>
where
    S: BlobStore + ?Sized,
    X: TextExtractor + ?Sized,
{
    pub fn new(store: &'a S, extractor: &'a X, config: &'a PipelineConfig, stopwords: StopWords) -> Self {
        Self {
            store,
            extractor,
            config,
            stopwords,
        }
    }

    fn extract(&self, container: &str, blob: &Blob) -> Result<String, ExtractionError> {
        let endpoint = self.store.primary_endpoint(container);
        let url = blob_url(&endpoint, &blob.name, self.config.sas_token.as_deref());
        let text = self.extractor.extract_text(&SourceDocument {
            name: &blob.name,
            url: &url,
            content: &blob.content,
        })?;
        Ok(remove_breaks_and_dedent(&text))
    }

    /// Extract text for every raw proposal without a processed counterpart
    /// Returns the number of texts added.
    pub fn ingest_proposals(&self) -> Result<usize, PipelineError> {
        let c = &self.config.containers;
        let mut done: HashSet<String> = self
            .store
            .list_blob_names(&c.processed_proposal)?
            .iter()
            .map(|name| file_stem(name).to_string())
            .collect();

        let mut added = 0;
        for blob in self.store.list_blobs(&c.raw_proposal)? {
            let stem = file_stem(&blob.name);
            if done.contains(stem) {
                continue;
            }
            let text = self.extract(&c.raw_proposal, &blob)?;
            let name = with_extension(&blob.name, "txt");
            self.store.upload(&c.processed_proposal, &name, text.as_bytes(), true)?;
            done.insert(stem.to_string());
            added += 1;
        }
        if added == 0 {
            tracing::info!("no new proposals found");
        } else {
            tracing::info!(added, "new proposal texts stored");
        }
        Ok(added)
    }

    /// Extract the first pending RFP into the processed container
    /// Returns the name of the stored text blob.
    pub fn process_raw_rfp(&self) -> Result<String, PipelineError> {
        let c = &self.config.containers;
        let blob = self
            .store
            .list_blobs(&c.raw_rfp)?
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::NothingToProcess(c.raw_rfp.clone()))?;
        tracing::info!(rfp = %blob.name, "processing rfp");

        let text = self.extract(&c.raw_rfp, &blob)?;
        let name = with_extension(&blob.name, "txt");
        self.store.upload(&c.processed_rfp, &name, text.as_bytes(), true)?;
        if self.config.delete_after_process {
            self.store.delete(&c.raw_rfp, &blob.name)?;
            tracing::info!(rfp = %blob.name, container = %c.raw_rfp, "raw rfp deleted");
        }
        Ok(name)
    }

    /// Read every blob of `container` as `stem -> text`
    fn read_texts(&self, container: &str) -> Result<Corpus, PipelineError> {
        let blobs = self.store.list_blobs(container)?;
        tracing::info!(container, count = blobs.len(), "reading stored texts");
        let mut corpus = Corpus::with_capacity(blobs.len());
        for blob in blobs {
            let text = String::from_utf8_lossy(&blob.content);
            corpus.insert(file_stem(&blob.name), strip_line_feeds(&text));
        }
        Ok(corpus)
    }

    /// Rank stored proposals against the first processed RFP and publish the result
    pub fn run_similarity(&self) -> Result<ScoredResult, PipelineError> {
        let c = &self.config.containers;
        let name = self
            .store
            .list_blob_names(&c.processed_rfp)?
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::NothingToProcess(c.processed_rfp.clone()))?;
        self.run_similarity_for(&name)
    }

    /// Rank stored proposals against the processed RFP `rfp_name`
    ///
    /// The result is uploaded as `<rfp stem>.json`, then the processed RFP
    /// text is removed.
    pub fn run_similarity_for(&self, rfp_name: &str) -> Result<ScoredResult, PipelineError> {
        let c = &self.config.containers;
        let proposals = self.read_texts(&c.processed_proposal)?;
        let content = self.store.read_blob(&c.processed_rfp, rfp_name)?;
        let base = Document::new(
            file_stem(rfp_name),
            strip_line_feeds(&String::from_utf8_lossy(&content)),
        );

        let ranker: Ranker = Ranker::new().with_top_n(self.config.top_n);
        let result = ranker.rank(&base, &proposals, &self.stopwords)?;

        let name = with_extension(&base.id, "json");
        self.store
            .upload(&c.results, &name, result.to_json_pretty()?.as_bytes(), true)?;
        tracing::info!(rfp = %base.id, matches = result.len(), results = %name, "published ranking");

        self.store.delete(&c.processed_rfp, rfp_name)?;
        Ok(result)
    }

    /// Process the pending RFP, then rank and publish that same RFP
    pub fn run(&self) -> Result<ScoredResult, PipelineError> {
        let name = self.process_raw_rfp()?;
        self.run_similarity_for(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract::PlainTextExtractor, storage::MemoryBlobStore};

    fn seeded() -> MemoryBlobStore {
        let store = MemoryBlobStore::new();
        store.upload("raw-rfp", "bissell.txt", b"Fine screen\nproject\nBissell Point", false).unwrap();
        store.upload("raw-proposal", "A.txt", b"fine screen project", false).unwrap();
        store.upload("raw-proposal", "B.txt", b"unrelated text about bridges", false).unwrap();
        store
            .upload("raw-proposal", "C.txt", b"fine screen project\nbissell point exactly", false)
            .unwrap();
        store
    }

    #[test]
    fn ingest_is_incremental() {
        let store = seeded();
        let cfg = PipelineConfig::default();
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        assert_eq!(p.ingest_proposals().unwrap(), 3);
        assert_eq!(p.ingest_proposals().unwrap(), 0);
        let c = store.read_blob("processed-proposal", "C.txt").unwrap();
        assert_eq!(c, b"fine screen project bissell point exactly");
    }

    #[test]
    fn full_run_publishes_ranking() {
        let store = seeded();
        let cfg = PipelineConfig { top_n: 2, ..PipelineConfig::default() };
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        p.ingest_proposals().unwrap();
        let result = p.run().unwrap();
        assert_eq!(result.keys(), vec!["C", "A"]);

        let json = store.read_blob("results", "bissell.json").unwrap();
        let published: ScoredResult = serde_json::from_slice(&json).unwrap();
        assert_eq!(published, result);
        assert!(store.list_blobs("raw-rfp").unwrap().is_empty());
        assert!(store.list_blobs("processed-rfp").unwrap().is_empty());
    }

    #[test]
    fn raw_rfp_kept_when_configured() {
        let store = seeded();
        let cfg = PipelineConfig { delete_after_process: false, ..PipelineConfig::default() };
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        assert_eq!(p.process_raw_rfp().unwrap(), "bissell.txt");
        assert_eq!(store.list_blob_names("raw-rfp").unwrap(), vec!["bissell.txt"]);
        assert_eq!(
            store.read_blob("processed-rfp", "bissell.txt").unwrap(),
            b"Fine screen project Bissell Point"
        );
    }

    #[test]
    fn missing_rfp_is_reported() {
        let store = MemoryBlobStore::new();
        let cfg = PipelineConfig::default();
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        assert!(matches!(p.process_raw_rfp(), Err(PipelineError::NothingToProcess(c)) if c == "raw-rfp"));
        assert!(matches!(p.run_similarity(), Err(PipelineError::NothingToProcess(c)) if c == "processed-rfp"));
    }

    #[test]
    fn run_ranks_the_rfp_it_just_processed() {
        let store = seeded();
        store.upload("processed-rfp", "aaa-left-over.txt", b"unrelated text", false).unwrap();
        let cfg = PipelineConfig::default();
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        p.ingest_proposals().unwrap();

        let result = p.run().unwrap();
        assert_eq!(result.keys()[0], "C");
        assert_eq!(store.list_blob_names("results").unwrap(), vec!["bissell.json"]);
        assert_eq!(store.list_blob_names("processed-rfp").unwrap(), vec!["aaa-left-over.txt"]);
    }

    #[test]
    fn same_stem_is_ingested_once() {
        let store = MemoryBlobStore::new();
        store.upload("raw-proposal", "a.docx", b"from docx", false).unwrap();
        store.upload("raw-proposal", "a.pdf", b"from pdf", false).unwrap();
        let cfg = PipelineConfig::default();
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());

        assert_eq!(p.ingest_proposals().unwrap(), 1);
        assert_eq!(store.list_blob_names("processed-proposal").unwrap(), vec!["a.txt"]);
        assert_eq!(store.read_blob("processed-proposal", "a.txt").unwrap(), b"from docx");
    }

    #[test]
    fn empty_rfp_text_is_a_rank_error() {
        let store = MemoryBlobStore::new();
        store.upload("processed-rfp", "blank.txt", b"\n\n", false).unwrap();
        let cfg = PipelineConfig::default();
        let p = Pipeline::new(&store, &PlainTextExtractor, &cfg, StopWords::none());
        assert!(matches!(p.run_similarity(), Err(PipelineError::Rank(RankError::EmptyDocument(_)))));
        // nothing published, input kept for inspection
        assert!(store.list_blobs("results").unwrap().is_empty());
        assert_eq!(store.list_blob_names("processed-rfp").unwrap(), vec!["blank.txt"]);
    }
}
