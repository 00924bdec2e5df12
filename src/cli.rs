use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rfp-match",
    about = "Rank proposal documents against an RFP by TF-IDF cosine similarity",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding one sub-directory per blob container
    #[arg(long, env = "RFP_MATCH_STORAGE_ROOT", default_value = "storage", global = true)]
    pub storage_root: PathBuf,

    /// JSON pipeline configuration; defaults apply when omitted
    #[arg(long, env = "RFP_MATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// External text extraction command, fed the document on stdin
    /// e.g. `pdftotext - -`. Documents are read as UTF-8 text when unset.
    #[arg(long, env = "RFP_MATCH_EXTRACT_CMD", global = true)]
    pub extract_cmd: Option<String>,

    /// Access token appended to blob links
    #[arg(long, env = "RFP_MATCH_SAS_TOKEN", global = true)]
    pub sas_token: Option<String>,

    /// Overrides the configured number of published matches
    #[arg(long, env = "RFP_MATCH_TOP_N", global = true)]
    pub top_n: Option<usize>,

    /// Emit logs as JSON
    #[arg(long, env = "RFP_MATCH_JSON_LOGS", global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the .txt files of a directory against a base text file
    Rank {
        /// Base document (the RFP text)
        #[arg(short, long, env = "RFP_MATCH_BASE")]
        base: PathBuf,

        /// Directory of candidate .txt files, identified by file stem
        #[arg(short, long, env = "RFP_MATCH_CORPUS")]
        corpus: PathBuf,

        /// Stopword file, one token per line
        #[arg(long, env = "RFP_MATCH_STOPWORDS", conflicts_with = "locale")]
        stopwords: Option<PathBuf>,

        /// Built-in stopword list
        #[arg(long, env = "RFP_MATCH_LOCALE", default_value = "english")]
        locale: String,
    },

    /// Extract text for proposals not yet processed
    Ingest,

    /// Extract text for the pending RFP
    ProcessRfp,

    /// Rank stored proposals against the processed RFP and publish results
    Similarity,

    /// Process the pending RFP, then rank and publish
    Run,
}
