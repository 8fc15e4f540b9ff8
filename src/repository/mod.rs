//! Repository layer: the book store abstraction and its backends

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BookDocument, BookId, BookPayload};

pub use memory::InMemoryBookStore;
pub use mongo::MongoBookStore;

/// Faults raised by a book store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Store did not return an ObjectId for the inserted document")]
    MissingInsertedId,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the catalog performs against the book collection.
///
/// Each call is a single round trip; implementations must be safe to share
/// between concurrently running requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Up to `limit` documents in store order
    async fn find(&self, limit: i64) -> StoreResult<Vec<BookDocument>>;

    async fn find_one(&self, id: &BookId) -> StoreResult<Option<BookDocument>>;

    /// Persist a new document; the store assigns its identifier
    async fn insert_one(&self, payload: &BookPayload) -> StoreResult<BookId>;

    /// Overwrite all fields of a document, returning its post-update state
    async fn find_one_and_update(
        &self,
        id: &BookId,
        payload: &BookPayload,
    ) -> StoreResult<Option<BookDocument>>;

    /// Returns whether a document was removed
    async fn delete_one(&self, id: &BookId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Store handle shared across the process
pub type SharedBookStore = Arc<dyn BookStore>;
