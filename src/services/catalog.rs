//! Book catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId, BookPayload},
    repository::{SharedBookStore, StoreError},
};

/// Maximum number of records returned by `list`
pub const LIST_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct CatalogService {
    store: SharedBookStore,
}

impl CatalogService {
    pub fn new(store: SharedBookStore) -> Self {
        Self { store }
    }

    /// List books in store order, capped at `LIST_LIMIT`
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let documents = self
            .store
            .find(LIST_LIMIT)
            .await
            .map_err(|e| store_fault("listing books", e))?;
        Ok(documents.into_iter().map(Book::from).collect())
    }

    /// Get a book by its string identifier
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let id: BookId = id.parse()?;
        self.store
            .find_one(&id)
            .await
            .map_err(|e| store_fault(&format!("reading book {}", id), e))?
            .map(Book::from)
            .ok_or_else(|| not_found(&id))
    }

    /// Insert a book, then read it back to confirm it was persisted.
    ///
    /// Returns the new identifier along with the submitted fields.
    pub async fn create(&self, payload: BookPayload) -> AppResult<(BookId, BookPayload)> {
        payload.validate().map_err(|e| AppError::Validation(e.to_string()))?;

        let id = self
            .store
            .insert_one(&payload)
            .await
            .map_err(|e| store_fault("creating book", e))?;

        let confirmed = self
            .store
            .find_one(&id)
            .await
            .map_err(|e| store_fault(&format!("reading back book {}", id), e))?;
        if confirmed.is_none() {
            return Err(AppError::Internal(format!(
                "Book {} was inserted but could not be read back",
                id
            )));
        }

        tracing::info!("Created book {}", id);
        Ok((id, payload))
    }

    /// Replace all fields of an existing book
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        let id: BookId = id.parse()?;
        payload.validate().map_err(|e| AppError::Validation(e.to_string()))?;

        let updated = self
            .store
            .find_one_and_update(&id, &payload)
            .await
            .map_err(|e| store_fault(&format!("updating book {}", id), e))?
            .ok_or_else(|| not_found(&id))?;

        tracing::info!("Updated book {}", id);
        Ok(Book::from(updated))
    }

    /// Delete a book
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id: BookId = id.parse()?;
        let deleted = self
            .store
            .delete_one(&id)
            .await
            .map_err(|e| store_fault(&format!("deleting book {}", id), e))?;
        if !deleted {
            return Err(not_found(&id));
        }
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| store_fault("pinging book store", e))
    }
}

/// Log a store fault with its context; the response carries no detail
fn store_fault(action: &str, e: StoreError) -> AppError {
    tracing::error!("Error {}: {}", action, e);
    AppError::Store(e)
}

fn not_found(id: &BookId) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
