//! On-disk storage backend.
//!
//! Every key lives in one JSON object document, e.g.
//!
//! ```text
//! { "@GoMarketplace:products": "[{\"id\":\"1\", ...}]" }
//! ```
//!
//! Writes replace the whole document through a temporary sibling file and a
//! rename, so a crash mid-write leaves the previous document intact.
//!
//! Every `FileStorage` in the process that points at the same file shares one
//! write lock, so providers using different keys of one document never lose
//! each other's writes. Other processes writing the same file are not
//! coordinated with.

use super::{Storage, StorageError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, trace};

type Document = BTreeMap<String, String>;

/// Write locks by absolute document path.
static WRITE_LOCKS: LazyLock<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| std::sync::Mutex::new(HashMap::new()));

fn write_lock_for(path: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = WRITE_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// A [`Storage`] persisted as a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Held across read-modify-write (and the temp file) so concurrent writers
    // don't drop each other's keys.
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Uses `path` as the backing document. The file (and its parent
    /// directories) are created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let write_lock = write_lock_for(&path);
        Self { path, write_lock }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let encoded = serde_json::to_string_pretty(document).map_err(StorageError::Encode)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, encoded).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), keys = document.len(), "Storage file written");
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let document = self.read_document().await?;
        let value = document.get(key).cloned();
        trace!(key, found = value.is_some(), "get_item");
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document).await
    }
}
