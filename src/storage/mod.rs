//! # Key-Value Storage
//!
//! The cart never talks to a concrete storage backend. It receives an
//! `Arc<dyn Storage>` when the provider is built and only ever reads and
//! overwrites a single key through it.
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - process-local map, used by tests and ephemeral sessions.
//! - [`FileStorage`] - one JSON document on disk holding every key, the
//!   device-local equivalent of an app's async storage area.
//!
//! Tests that need to script storage behaviour (failures, specific payloads)
//! use [`MockStorage`](crate::framework::mock::MockStorage).

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::path::PathBuf;

/// Errors raised by a [`Storage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not read or write its medium.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document exists but is not a valid key-value document.
    #[error("storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode storage document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Asynchronous string key-value store.
///
/// Values are opaque strings; callers own the encoding. Implementations must be
/// safe to share between tasks.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key was never set.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
