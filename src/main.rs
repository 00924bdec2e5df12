use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rfp_match::{
    config::PipelineConfig,
    extract::{CommandExtractor, PlainTextExtractor, TextExtractor},
    logging::init_logging,
    pipeline::{Pipeline, PipelineError},
    stopwords::{load_stopwords, StopWords},
    storage::LocalBlobStore,
    utils::text::{file_stem, remove_breaks_and_dedent},
    Corpus, Document, Ranker,
};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if cli.sas_token.is_some() {
        config.sas_token = cli.sas_token.clone();
    }

    match cli.command {
        Commands::Rank {
            base,
            corpus,
            stopwords,
            locale,
        } => {
            let stopwords = match stopwords {
                Some(path) => load_stopwords(path)?,
                None => StopWords::for_locale(&locale)?,
            };
            let base = read_document(&base)?;
            let corpus = read_corpus(&corpus)?;
            let ranker: Ranker = Ranker::new().with_top_n(config.top_n);
            let result = ranker.rank(&base, &corpus, &stopwords)?;
            println!("{}", result.to_json_pretty()?);
        }
        Commands::Ingest => {
            let added = with_pipeline(&cli.storage_root, cli.extract_cmd.as_deref(), &config, |p| {
                p.ingest_proposals()
            })?;
            println!("{added}");
        }
        Commands::ProcessRfp => {
            let name = with_pipeline(&cli.storage_root, cli.extract_cmd.as_deref(), &config, |p| {
                p.process_raw_rfp()
            })?;
            println!("{name}");
        }
        Commands::Similarity => {
            let result = with_pipeline(&cli.storage_root, cli.extract_cmd.as_deref(), &config, |p| {
                p.run_similarity()
            })?;
            println!("{}", result.to_json_pretty()?);
        }
        Commands::Run => {
            let result = with_pipeline(&cli.storage_root, cli.extract_cmd.as_deref(), &config, |p| p.run())?;
            println!("{}", result.to_json_pretty()?);
        }
    }
    Ok(())
}

/// Run one pipeline job over a local blob store
fn with_pipeline<T>(
    storage_root: &Path,
    extract_cmd: Option<&str>,
    config: &PipelineConfig,
    job: impl FnOnce(&Pipeline<'_, LocalBlobStore, dyn TextExtractor>) -> Result<T, PipelineError>,
) -> Result<T> {
    let store = LocalBlobStore::new(storage_root);
    let stopwords = match &config.stopwords_path {
        Some(path) => load_stopwords(path)?,
        None => StopWords::for_locale("english")?,
    };
    let extractor: Box<dyn TextExtractor> = match extract_cmd {
        Some(line) => Box::new(CommandExtractor::from_command_line(line).ok_or_else(|| anyhow!("empty --extract-cmd"))?),
        None => Box::new(PlainTextExtractor),
    };
    let pipeline = Pipeline::new(&store, extractor.as_ref(), config, stopwords);
    Ok(job(&pipeline)?)
}

/// Read a text file as one flattened document keyed by its stem
fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let id = file_stem(&path.to_string_lossy()).to_string();
    Ok(Document::new(id, remove_breaks_and_dedent(&text)))
}

/// `.txt` files of `dir` in file name order, keyed by stem
fn read_corpus(dir: &Path) -> Result<Corpus> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    tracing::info!(dir = %dir.display(), documents = paths.len(), "loaded corpus");

    let mut corpus = Corpus::with_capacity(paths.len());
    for path in paths {
        let doc = read_document(&path)?;
        corpus.insert(doc.id, doc.text);
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_separate_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfp.txt");
        fs::write(&path, "fine screen\r\nproject bissell\npoint").unwrap();
        let doc = read_document(&path).unwrap();
        assert_eq!(doc.id, "rfp");
        assert_eq!(doc.text, "fine screen project bissell point");
    }

    #[test]
    fn corpus_reads_txt_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "pump\nstation").unwrap();
        fs::write(dir.path().join("a.txt"), "grit").unwrap();
        fs::write(dir.path().join("notes.md"), "skipped").unwrap();
        let corpus = read_corpus(dir.path()).unwrap();
        assert_eq!(corpus.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(corpus.get("b"), Some("pump station"));
    }
}
