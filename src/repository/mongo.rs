//! MongoDB-backed book store

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection, Database,
};

use super::{BookStore, StoreError, StoreResult};
use crate::{
    config::DatabaseConfig,
    models::{BookDocument, BookId, BookPayload},
};

/// Book collection handle. The driver pools connections internally.
#[derive(Clone)]
pub struct MongoBookStore {
    database: Database,
    books: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connect using the configured URL, database and collection names
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        let books = database.collection::<BookDocument>(&config.collection);

        tracing::debug!("Using collection {}.{}", config.name, config.collection);

        Ok(Self { database, books })
    }

    fn by_id(id: &BookId) -> Document {
        doc! { "_id": *id.as_object_id() }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, limit: i64) -> StoreResult<Vec<BookDocument>> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.books.find(None, options).await?;
        let books: Vec<BookDocument> = cursor.try_collect().await?;
        Ok(books)
    }

    async fn find_one(&self, id: &BookId) -> StoreResult<Option<BookDocument>> {
        Ok(self.books.find_one(Self::by_id(id), None).await?)
    }

    async fn insert_one(&self, payload: &BookPayload) -> StoreResult<BookId> {
        let result = self
            .books
            .clone_with_type::<Document>()
            .insert_one(payload.to_document(), None)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(BookId::from)
            .ok_or(StoreError::MissingInsertedId)
    }

    async fn find_one_and_update(
        &self,
        id: &BookId,
        payload: &BookPayload,
    ) -> StoreResult<Option<BookDocument>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .books
            .find_one_and_update(Self::by_id(id), doc! { "$set": payload.to_document() }, options)
            .await?)
    }

    async fn delete_one(&self, id: &BookId) -> StoreResult<bool> {
        let result = self.books.delete_one(Self::by_id(id), None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
