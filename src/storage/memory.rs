use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::storage::{check_name, Blob, BlobStore, StorageError};

type Containers = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// In-process blob store
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    containers: RwLock<Containers>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Containers> {
        self.containers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Containers> {
        self.containers.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn list_blobs(&self, container: &str) -> Result<Vec<Blob>, StorageError> {
        check_name(container)?;
        Ok(self
            .read()
            .get(container)
            .map(|blobs| {
                blobs
                    .iter()
                    .map(|(name, content)| Blob {
                        name: name.clone(),
                        content: content.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn read_blob(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        check_name(container)?;
        check_name(name)?;
        self.read()
            .get(container)
            .and_then(|blobs| blobs.get(name))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                container: container.to_string(),
                name: name.to_string(),
            })
    }

    fn upload(&self, container: &str, name: &str, content: &[u8], overwrite: bool) -> Result<(), StorageError> {
        check_name(container)?;
        check_name(name)?;
        let mut guard = self.write();
        let blobs = guard.entry(container.to_string()).or_default();
        if !overwrite && blobs.contains_key(name) {
            return Err(StorageError::AlreadyExists {
                container: container.to_string(),
                name: name.to_string(),
            });
        }
        blobs.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn delete(&self, container: &str, name: &str) -> Result<(), StorageError> {
        check_name(container)?;
        check_name(name)?;
        self.write()
            .get_mut(container)
            .and_then(|blobs| blobs.remove(name))
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound {
                container: container.to_string(),
                name: name.to_string(),
            })
    }

    fn primary_endpoint(&self, container: &str) -> String {
        format!("memory://{container}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_containers() {
        let store = MemoryBlobStore::new();
        store.upload("raw-rfp", "z.pdf", b"z", false).unwrap();
        store.upload("raw-rfp", "a.pdf", b"a", false).unwrap();
        store.upload("other", "a.pdf", b"other", false).unwrap();
        assert_eq!(store.list_blob_names("raw-rfp").unwrap(), vec!["a.pdf", "z.pdf"]);
        assert_eq!(store.read_blob("other", "a.pdf").unwrap(), b"other");
        store.delete("raw-rfp", "a.pdf").unwrap();
        assert_eq!(store.list_blob_names("raw-rfp").unwrap(), vec!["z.pdf"]);
        assert!(store.list_blobs("empty").unwrap().is_empty());
    }

    #[test]
    fn errors() {
        let store = MemoryBlobStore::new();
        store.upload("c", "x", b"1", false).unwrap();
        assert!(matches!(store.upload("c", "x", b"2", false), Err(StorageError::AlreadyExists { .. })));
        assert!(matches!(store.delete("c", "y"), Err(StorageError::NotFound { .. })));
        assert!(matches!(store.read_blob("d", "x"), Err(StorageError::NotFound { .. })));
        assert_eq!(store.primary_endpoint("c"), "memory://c");
    }
}
