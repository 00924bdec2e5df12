use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::storage::{check_name, Blob, BlobStore, StorageError};

/// Blob store backed by a directory
/// Each container is a sub-directory of `root`, each blob a file in it.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_dir(&self, container: &str) -> Result<PathBuf, StorageError> {
        check_name(container)?;
        Ok(self.root.join(container))
    }

    fn blob_path(&self, container: &str, name: &str) -> Result<PathBuf, StorageError> {
        check_name(name)?;
        Ok(self.container_dir(container)?.join(name))
    }

    fn not_found(container: &str, name: &str) -> StorageError {
        StorageError::NotFound {
            container: container.to_string(),
            name: name.to_string(),
        }
    }
}

impl BlobStore for LocalBlobStore {
    fn list_blobs(&self, container: &str) -> Result<Vec<Blob>, StorageError> {
        let names = self.list_blob_names(container)?;
        let mut blobs = Vec::with_capacity(names.len());
        for name in names {
            let content = self.read_blob(container, &name)?;
            blobs.push(Blob { name, content });
        }
        Ok(blobs)
    }

    fn list_blob_names(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.container_dir(container)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_blob(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.blob_path(container, name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Self::not_found(container, name),
            _ => e.into(),
        })
    }

    fn upload(&self, container: &str, name: &str, content: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let path = self.blob_path(container, name)?;
        if !overwrite && path.exists() {
            return Err(StorageError::AlreadyExists {
                container: container.to_string(),
                name: name.to_string(),
            });
        }
        fs::create_dir_all(self.container_dir(container)?)?;
        fs::write(&path, content)?;
        tracing::debug!(container, name, bytes = content.len(), "uploaded blob");
        Ok(())
    }

    fn delete(&self, container: &str, name: &str) -> Result<(), StorageError> {
        let path = self.blob_path(container, name)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Self::not_found(container, name),
            _ => e.into(),
        })?;
        tracing::debug!(container, name, "deleted blob");
        Ok(())
    }

    fn primary_endpoint(&self, container: &str) -> String {
        format!("file://{}", self.root.join(container).display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_list_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(store.list_blobs("results").unwrap().is_empty());

        store.upload("results", "b.json", b"{}", false).unwrap();
        store.upload("results", "a.json", b"[]", false).unwrap();
        assert_eq!(store.list_blob_names("results").unwrap(), vec!["a.json", "b.json"]);
        assert_eq!(store.read_blob("results", "b.json").unwrap(), b"{}");

        store.delete("results", "a.json").unwrap();
        let blobs = store.list_blobs("results").unwrap();
        assert_eq!(blobs, vec![Blob { name: "b.json".into(), content: b"{}".to_vec() }]);
    }

    #[test]
    fn overwrite_rules() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        store.upload("c", "x.txt", b"one", false).unwrap();
        let err = store.upload("c", "x.txt", b"two", false).unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));
        store.upload("c", "x.txt", b"two", true).unwrap();
        assert_eq!(store.read_blob("c", "x.txt").unwrap(), b"two");
    }

    #[test]
    fn missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(matches!(store.read_blob("c", "nope"), Err(StorageError::NotFound { .. })));
        assert!(matches!(store.delete("c", "nope"), Err(StorageError::NotFound { .. })));
    }

    #[test]
    fn path_escape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(matches!(store.upload("..", "x", b"", true), Err(StorageError::InvalidName(_))));
        assert!(matches!(store.read_blob("c", "../x"), Err(StorageError::InvalidName(_))));
    }
}
