//! In-process book store used by tests

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{BookStore, StoreError, StoreResult};
use crate::models::{BookDocument, BookId, BookPayload};

/// Keeps documents in insertion order, like a fresh MongoDB collection.
#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<IndexMap<ObjectId, BookDocument>>,
    failing: AtomicBool,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every call fails with `StoreError::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find(&self, limit: i64) -> StoreResult<Vec<BookDocument>> {
        self.check()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.books.read().await.values().take(limit).cloned().collect())
    }

    async fn find_one(&self, id: &BookId) -> StoreResult<Option<BookDocument>> {
        self.check()?;
        Ok(self.books.read().await.get(id.as_object_id()).cloned())
    }

    async fn insert_one(&self, payload: &BookPayload) -> StoreResult<BookId> {
        self.check()?;
        let oid = ObjectId::new();
        self.books
            .write()
            .await
            .insert(oid, BookDocument::new(oid, payload));
        Ok(BookId::from(oid))
    }

    async fn find_one_and_update(
        &self,
        id: &BookId,
        payload: &BookPayload,
    ) -> StoreResult<Option<BookDocument>> {
        self.check()?;
        let mut books = self.books.write().await;
        Ok(books.get_mut(id.as_object_id()).map(|document| {
            *document = BookDocument::new(document.id, payload);
            document.clone()
        }))
    }

    async fn delete_one(&self, id: &BookId) -> StoreResult<bool> {
        self.check()?;
        Ok(self.books.write().await.shift_remove(id.as_object_id()).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}
