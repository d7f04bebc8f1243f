//! Key-value storage backing the build and favorites
//!
//! Values are opaque serialized strings. The store is read once at startup
//! and written from the persistence worker.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
