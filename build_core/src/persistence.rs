//! Background persistence worker.
//!
//! Mutating operations must not wait on storage. They hand a serialized
//! snapshot to [`Persistence::write`], which queues it for a detached worker
//! task that performs the store writes in order. Write failures are logged
//! and dropped; the caller never sees them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::store::{KeyValueStore, StoreError};

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors that can occur while reading persisted values
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("corrupted value under {key:?}: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Commands that can be sent to the persistence worker
enum Command {
    /// Replace the value under `key`
    Write { key: String, value: String },

    /// Reply once every earlier command has been handled
    Flush { reply: oneshot::Sender<()> },

    /// Stop after handling every earlier command
    Shutdown,
}

/// Handle to the persistence worker.
///
/// Cloning is cheap; all clones feed the same worker, so writes from every
/// clone are applied in the order they were queued.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    command_tx: mpsc::UnboundedSender<Command>,
}

impl Persistence {
    /// Start a worker for `store` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let worker = PersistenceWorker {
            store: Arc::clone(&store),
            command_rx,
            writes: 0,
            failures: 0,
        };
        tokio::spawn(worker.run());
        Self { store, command_tx }
    }

    /// Read the raw value under `key` after pending writes have landed
    pub async fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        self.flush().await;
        self.store.get(key).await
    }

    /// Read and decode the JSON value under `key`
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| PersistenceError::Corrupted {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Queue a write without waiting for it
    pub fn write(&self, key: &str, value: String) {
        let command = Command::Write {
            key: key.to_string(),
            value,
        };
        if self.command_tx.send(command).is_err() {
            warn!("Persistence worker stopped, dropping write to {:?}", key);
        }
    }

    /// Serialize `value` now and queue the write
    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write(key, raw),
            Err(e) => warn!("Failed to serialize value for {:?}: {}", key, e),
        }
    }

    /// Wait until every write queued before this call has been attempted
    pub async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        if self.command_tx.send(Command::Flush { reply }).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Ask the worker to stop once the queue drains
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        !self.command_tx.is_closed()
    }
}

/// Background worker that owns all store writes
struct PersistenceWorker {
    store: Arc<dyn KeyValueStore>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    writes: u64,
    failures: u64,
}

impl PersistenceWorker {
    /// Main worker loop
    async fn run(mut self) {
        info!("PersistenceWorker started");

        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Write { key, value } => self.write(&key, value).await,
                Command::Flush { reply } => {
                    let _ = reply.send(());
                }
                Command::Shutdown => {
                    info!("Shutdown command received");
                    break;
                }
            }
        }

        info!(
            "PersistenceWorker stopped: writes={}, failures={}",
            self.writes, self.failures
        );
    }

    async fn write(&mut self, key: &str, value: String) {
        match self.store.set(key, value).await {
            Ok(()) => {
                self.writes += 1;
                debug!("Persisted {:?}", key);
            }
            Err(e) => {
                self.failures += 1;
                warn!("Failed to persist {:?}: {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct BrokenStore;

    fn offline() -> StoreError {
        std::io::Error::new(std::io::ErrorKind::NotConnected, "offline").into()
    }

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, StoreError> {
            Err(offline())
        }

        async fn set(&self, _key: &str, _value: String) -> std::result::Result<(), StoreError> {
            Err(offline())
        }
    }

    #[tokio::test]
    async fn test_writes_apply_in_order() {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::spawn(store.clone());

        for level in 1..=5 {
            persistence.write("stats", level.to_string());
        }
        persistence.flush().await;

        assert_eq!(store.get("stats").await.unwrap().as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_read_sees_queued_writes() {
        let persistence = Persistence::spawn(Arc::new(MemoryStore::new()));
        persistence.write_json("favorites", &vec!["sword"]);

        let read: Option<Vec<String>> = persistence.read_json("favorites").await.unwrap();
        assert_eq!(read, Some(vec!["sword".to_string()]));
    }

    #[tokio::test]
    async fn test_corrupted_value() {
        let store = Arc::new(MemoryStore::with_entry("stats", "{not json"));
        let persistence = Persistence::spawn(store);

        let result: Result<Option<Vec<u32>>> = persistence.read_json("stats").await;
        assert!(matches!(result, Err(PersistenceError::Corrupted { key, .. }) if key == "stats"));
    }

    #[tokio::test]
    async fn test_write_failures_are_swallowed() {
        let persistence = Persistence::spawn(Arc::new(BrokenStore));
        persistence.write("stats", "{}".to_string());
        persistence.flush().await;
        assert!(persistence.is_running());
        assert!(matches!(persistence.read("stats").await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_write_after_shutdown_is_dropped() {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::spawn(store.clone());

        persistence.write("stats", "1".to_string());
        persistence.shutdown();
        persistence.flush().await;
        persistence.write("stats", "2".to_string());

        assert!(!persistence.is_running());
        assert_eq!(store.get("stats").await.unwrap().as_deref(), Some("1"));
    }
}
