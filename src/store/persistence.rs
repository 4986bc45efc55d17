//! Persistence adapters: durable whole-collection load/save.
//!
//! The document store calls [`PersistenceAdapter::save`] with the *entire*
//! collection on every mutation. No incremental append log - acceptable while
//! catalogs fit comfortably in memory; this is an explicit scalability
//! boundary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::PersistenceError;

/// Durable storage for one collection.
///
/// `save` must be atomic from the store's perspective: after a crash
/// mid-write, a subsequent `load` observes either the old or the new
/// collection, never a truncated hybrid.
#[async_trait]
pub trait PersistenceAdapter<T>: Send + Sync
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Reload the persisted collection. A backing location that does not
    /// exist yet is an empty collection, not an error.
    async fn load(&self) -> Result<Vec<T>, PersistenceError>;

    /// Durably write the full collection.
    async fn save(&self, items: &[T]) -> Result<(), PersistenceError>;
}

/// JSON file adapter: one pretty-printed JSON array per collection.
///
/// Atomic save: writes `<file>.tmp` then renames over `<file>`, so a crash
/// mid-write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl<T> PersistenceAdapter<T> for JsonFileAdapter
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    async fn save(&self, items: &[T]) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(items).map_err(|e| PersistenceError::Write {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        })?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
        }

        // Atomic write: tmp file + rename
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| PersistenceError::Write {
                path: tmp_path.clone(),
                source: e,
            })?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(PersistenceError::Write {
                path: self.path.clone(),
                source: e,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::store::Document;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: "A".to_string(),
            description: "d".to_string(),
            code: "c1".to_string(),
            price: 10.0,
            status: true,
            stock: 5,
            category: "x".to_string(),
            thumbnails: vec![],
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("products.json"));
        let items: Vec<Product> = adapter.load().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("products.json"));
        let items = vec![product("p1"), product("p2")];
        adapter.save(&items).await.unwrap();

        let loaded: Vec<Product> = adapter.load().await.unwrap();
        assert_eq!(loaded, items);
        assert_eq!(loaded[0].id(), "p1");
    }

    #[tokio::test]
    async fn interrupted_save_leaves_previous_state_readable() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("products.json"));
        adapter.save(&[product("p1")]).await.unwrap();

        // Simulate a crash after the tmp file was written but before the
        // rename: a stale half-written tmp file next to the real one.
        tokio::fs::write(dir.path().join("products.json.tmp"), b"[{\"id\": \"tru")
            .await
            .unwrap();

        let loaded: Vec<Product> = adapter.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "p1");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let adapter = JsonFileAdapter::new(path);
        let result: Result<Vec<Product>, _> = adapter.load().await;
        assert!(matches!(result, Err(PersistenceError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("nested/data/products.json"));
        adapter.save(&[product("p1")]).await.unwrap();
        let loaded: Vec<Product> = adapter.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
