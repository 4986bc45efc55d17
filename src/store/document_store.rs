//! Concurrent document store for one collection.
//!
//! # 并发模型
//!
//! 每个集合一个 `tokio::sync::RwLock`：变更 (create/update/delete/modify)
//! 持有写锁直到持久化完成，读操作持有读锁。读与读并发，读与变更互斥，
//! 外部永远观察不到半应用状态。
//!
//! # 持久化语义
//!
//! 每次变更先改内存，再整集合落盘；落盘失败时回滚内存到变更前状态并返回
//! [`StoreError::Persistence`]，保证内存与磁盘不会静默分叉。

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use super::document::Document;
use super::error::{PersistenceError, StoreError};
use super::persistence::PersistenceAdapter;

/// In-process owner of one entity collection and its persistence.
///
/// Callers receive clones of entities, never handles into internal state.
pub struct DocumentStore<T: Document> {
    items: RwLock<Vec<T>>,
    adapter: Arc<dyn PersistenceAdapter<T>>,
}

impl<T: Document> DocumentStore<T> {
    /// Open the store, loading the persisted collection. A missing backing
    /// location starts the store empty.
    pub async fn open(adapter: Arc<dyn PersistenceAdapter<T>>) -> Result<Self, PersistenceError> {
        let items = adapter.load().await?;
        tracing::debug!(
            collection = T::COLLECTION,
            count = items.len(),
            "document store loaded"
        );
        Ok(Self {
            items: RwLock::new(items),
            adapter,
        })
    }

    /// All entities in insertion order, capped at `limit` from the front.
    pub async fn list(&self, limit: Option<usize>) -> Vec<T> {
        let items = self.items.read().await;
        match limit {
            Some(n) => items.iter().take(n).cloned().collect(),
            None => items.clone(),
        }
    }

    /// Exact match on identifier.
    pub async fn get(&self, id: &str) -> Result<T, StoreError> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
    }

    /// Validate the payload, assign a fresh id, append and flush.
    ///
    /// Ids are random UUID v4 tokens: unique under concurrent creates, unlike
    /// the wall-clock timestamps they replace.
    pub async fn create(&self, create: T::Create) -> Result<T, StoreError> {
        create.validate()?;

        let mut items = self.items.write().await;
        let entity = T::from_create(Uuid::new_v4().to_string(), create);
        items.push(entity.clone());

        if let Err(e) = self.adapter.save(&items).await {
            items.pop();
            return Err(StoreError::Persistence(e));
        }

        tracing::debug!(collection = T::COLLECTION, id = entity.id(), "created");
        Ok(entity)
    }

    /// Merge the given fields into the existing entity and flush. The
    /// identifier is immutable; update payloads cannot carry one.
    pub async fn update(&self, id: &str, update: T::Update) -> Result<T, StoreError> {
        update.validate()?;

        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;

        let previous = items[index].clone();
        items[index].merge(update);

        if let Err(e) = self.adapter.save(&items).await {
            items[index] = previous;
            return Err(StoreError::Persistence(e));
        }

        tracing::debug!(collection = T::COLLECTION, id, "updated");
        Ok(items[index].clone())
    }

    /// Remove the entity and flush.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;

        let removed = items.remove(index);

        if let Err(e) = self.adapter.save(&items).await {
            items.insert(index, removed);
            return Err(StoreError::Persistence(e));
        }

        tracing::debug!(collection = T::COLLECTION, id, "deleted");
        Ok(())
    }

    /// Atomic read-modify-write under the exclusive section.
    ///
    /// The closure runs on the stored entity while the write lock is held, so
    /// concurrent `modify` calls never lose increments. The id is restored
    /// after the closure runs.
    pub async fn modify<F>(&self, id: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T) + Send,
    {
        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;

        let previous = items[index].clone();
        f(&mut items[index]);
        items[index].set_id(previous.id().to_string());

        if let Err(e) = self.adapter.save(&items).await {
            items[index] = previous;
            return Err(StoreError::Persistence(e));
        }

        Ok(items[index].clone())
    }

    fn position(items: &[T], id: &str) -> Result<usize, StoreError> {
        items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
    }
}

impl<T: Document> std::fmt::Debug for DocumentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("collection", &T::COLLECTION)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::models::{Product, ProductCreate, ProductUpdate};
    use crate::store::JsonFileAdapter;

    fn sample_create() -> ProductCreate {
        ProductCreate {
            title: Some("A".to_string()),
            description: Some("d".to_string()),
            code: Some("c1".to_string()),
            price: Some(10.0),
            status: None,
            stock: Some(5),
            category: Some("x".to_string()),
            thumbnails: None,
        }
    }

    async fn open_store(dir: &tempfile::TempDir) -> DocumentStore<Product> {
        let adapter = Arc::new(JsonFileAdapter::new(dir.path().join("products.json")));
        DocumentStore::open(adapter).await.unwrap()
    }

    /// Adapter whose save fails on demand, for rollback tests.
    struct FailingAdapter {
        fail: AtomicBool,
    }

    impl FailingAdapter {
        fn new() -> Self {
            Self {
                fail: AtomicBool::new(false),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl PersistenceAdapter<Product> for FailingAdapter {
        async fn load(&self) -> Result<Vec<Product>, PersistenceError> {
            Ok(Vec::new())
        }

        async fn save(&self, _items: &[Product]) -> Result<(), PersistenceError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(PersistenceError::Write {
                    path: "unwritable".into(),
                    source: std::io::Error::other("disk full"),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let created = store.create(sample_create()).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(created.status);
        assert!(created.thumbnails.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let result = store.create(ProductCreate::default()).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.list(None).await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_assign_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(open_store(&dir).await);

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(sample_create()).await.unwrap().id })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            assert!(ids.insert(task.await.unwrap()));
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.list(None).await.len(), 32);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let first = store.create(sample_create()).await.unwrap();
        let second = store.create(sample_create()).await.unwrap();
        store.create(sample_create()).await.unwrap();

        let limited = store.list(Some(2)).await;
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, first.id);
        assert_eq!(limited[1].id, second.id);

        assert!(store.list(Some(0)).await.is_empty());
        assert_eq!(store.list(Some(100)).await.len(), 3);
    }

    #[tokio::test]
    async fn update_merges_and_keeps_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let created = store.create(sample_create()).await.unwrap();
        let updated = store
            .update(
                &created.id,
                ProductUpdate {
                    price: Some(99.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 99.5);
        assert_eq!(updated.title, created.title);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let created = store.create(sample_create()).await.unwrap();
        store.delete(&created.id).await.unwrap();

        let result = store.get(&created.id).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        assert!(matches!(
            store.get("nope").await,
            Err(StoreError::NotFound { collection: "product", .. })
        ));
        assert!(store.delete("nope").await.is_err());
        assert!(
            store
                .update("nope", ProductUpdate::default())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn survives_restart_by_reloading_file() {
        let dir = tempfile::tempdir().unwrap();
        let created = {
            let store = open_store(&dir).await;
            store.create(sample_create()).await.unwrap()
        };

        let reopened = open_store(&dir).await;
        let fetched = reopened.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn failed_flush_rolls_back_create() {
        let adapter = Arc::new(FailingAdapter::new());
        let store = DocumentStore::<Product>::open(adapter.clone()).await.unwrap();

        adapter.set_failing(true);
        let result = store.create(sample_create()).await;
        assert!(matches!(result, Err(StoreError::Persistence(_))));
        assert!(store.list(None).await.is_empty());

        // The failure is fatal to that operation only.
        adapter.set_failing(false);
        store.create(sample_create()).await.unwrap();
        assert_eq!(store.list(None).await.len(), 1);
    }

    #[tokio::test]
    async fn failed_flush_rolls_back_update_and_delete() {
        let adapter = Arc::new(FailingAdapter::new());
        let store = DocumentStore::<Product>::open(adapter.clone()).await.unwrap();
        let created = store.create(sample_create()).await.unwrap();

        adapter.set_failing(true);

        let update = store
            .update(
                &created.id,
                ProductUpdate {
                    title: Some("changed".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(update.is_err());
        assert_eq!(store.get(&created.id).await.unwrap().title, "A");

        assert!(store.delete(&created.id).await.is_err());
        assert_eq!(store.list(None).await.len(), 1);
    }

    #[tokio::test]
    async fn modify_cannot_change_the_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let created = store.create(sample_create()).await.unwrap();

        let modified = store
            .modify(&created.id, |product| {
                product.id = "forged".to_string();
                product.stock = 1;
            })
            .await
            .unwrap();

        assert_eq!(modified.id, created.id);
        assert_eq!(modified.stock, 1);
    }
}
