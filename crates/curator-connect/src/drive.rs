//! Mock Drive file store.
//!
//! In-memory stand-in for the remote file-storage service. File ids are
//! content-hash derived, so storing the same bytes twice yields the same
//! reference (deduplication, matching how the production store behaves).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use curator_core::{Error, FileStore, Result, StoredFile};

/// Environment variables naming the target folders.
pub const ARCHIVE_FOLDER_ENV: &str = "DRIVE_ARCHIVE_FOLDER_ID";
pub const PUBLISHED_FOLDER_ENV: &str = "DRIVE_PUBLISHED_FOLDER_ID";

/// In-memory mock of the Drive storage connector.
pub struct MockDriveStore {
    archive_folder_id: String,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockDriveStore {
    /// Create an empty store rooted at the given archive folder id.
    pub fn new(archive_folder_id: impl Into<String>) -> Self {
        Self {
            archive_folder_id: archive_folder_id.into(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store configured from the environment.
    pub fn from_env() -> Self {
        let folder = std::env::var(ARCHIVE_FOLDER_ENV).unwrap_or_default();
        Self::new(folder)
    }

    /// Compute the content-addressed file id for a blob.
    fn file_id_for(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Number of distinct blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStore for MockDriveStore {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredFile> {
        let file_id = Self::file_id_for(data);
        let path = if self.archive_folder_id.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", self.archive_folder_id, filename)
        };

        self.blobs
            .lock()
            .map_err(|_| Error::Internal("drive store lock poisoned".to_string()))?
            .insert(file_id.clone(), data.to_vec());

        debug!(
            subsystem = "connect",
            component = "drive",
            op = "store",
            file_id = %file_id,
            size = data.len(),
            "Stored blob"
        );

        Ok(StoredFile { file_id, path })
    }

    async fn retrieve(&self, file_id: &str) -> Result<Vec<u8>> {
        self.blobs
            .lock()
            .map_err(|_| Error::Internal("drive store lock poisoned".to_string()))?
            .get(file_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("file {file_id}")))
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let removed = self
            .blobs
            .lock()
            .map_err(|_| Error::Internal("drive store lock poisoned".to_string()))?
            .remove(file_id);

        if removed.is_none() {
            return Err(Error::NotFound(format!("file {file_id}")));
        }
        debug!(
            subsystem = "connect",
            component = "drive",
            op = "delete",
            file_id = %file_id,
            "Deleted blob"
        );
        Ok(())
    }

    async fn exists(&self, file_id: &str) -> Result<bool> {
        Ok(self
            .blobs
            .lock()
            .map_err(|_| Error::Internal("drive store lock poisoned".to_string()))?
            .contains_key(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_retrieve_round_trip() {
        let store = MockDriveStore::new("folder-abc");
        let stored = store.store("report.pdf", b"pdf bytes").await.unwrap();

        assert_eq!(stored.path, "folder-abc/report.pdf");
        assert!(store.exists(&stored.file_id).await.unwrap());

        let data = store.retrieve(&stored.file_id).await.unwrap();
        assert_eq!(data, b"pdf bytes");
    }

    #[tokio::test]
    async fn test_same_content_same_id() {
        let store = MockDriveStore::new("folder-abc");
        let a = store.store("a.bin", b"same bytes").await.unwrap();
        let b = store.store("b.bin", b"same bytes").await.unwrap();

        assert_eq!(a.file_id, b.file_id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let store = MockDriveStore::new("folder-abc");
        let stored = store.store("x.bin", b"data").await.unwrap();

        store.delete(&stored.file_id).await.unwrap();
        assert!(!store.exists(&stored.file_id).await.unwrap());
        assert!(store.retrieve(&stored.file_id).await.is_err());
        assert!(store.delete(&stored.file_id).await.is_err());
    }
}
