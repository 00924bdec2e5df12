//! Blob storage collaborator
//!
//! The pipeline reads and writes documents through [`BlobStore`]. A store
//! holds named containers, each holding named blobs. Listings are ordered
//! by blob name.

pub mod local;
pub mod memory;

use thiserror::Error;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("blob `{name}` not found in container `{container}`")]
    NotFound { container: String, name: String },
    #[error("blob `{name}` already exists in container `{container}`")]
    AlreadyExists { container: String, name: String },
    #[error("invalid blob or container name `{0}`")]
    InvalidName(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub name: String,
    pub content: Vec<u8>,
}

pub trait BlobStore {
    /// All blobs of `container`, ordered by name
    /// A container that does not exist yet lists as empty.
    fn list_blobs(&self, container: &str) -> Result<Vec<Blob>, StorageError>;

    /// Blob names of `container`, ordered
    fn list_blob_names(&self, container: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.list_blobs(container)?.into_iter().map(|b| b.name).collect())
    }

    fn read_blob(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Store `content` under `name`
    /// Without `overwrite`, an existing blob is an error.
    fn upload(&self, container: &str, name: &str, content: &[u8], overwrite: bool) -> Result<(), StorageError>;

    fn delete(&self, container: &str, name: &str) -> Result<(), StorageError>;

    /// Base URL of `container`, used to build direct blob links
    fn primary_endpoint(&self, container: &str) -> String;
}

/// Direct link to a blob, with an optional SAS token as query string
///
/// The token may be given with or without its leading `?`.
pub fn blob_url(endpoint: &str, name: &str, sas_token: Option<&str>) -> String {
    let base = format!("{}/{}", endpoint.trim_end_matches('/'), name);
    match sas_token.map(|t| t.trim_start_matches('?')) {
        Some(token) if !token.is_empty() => format!("{base}?{token}"),
        _ => base,
    }
}

/// Reject names that could escape a container
pub(crate) fn check_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}
