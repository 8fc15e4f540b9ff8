//! Book model: wire shapes, storage shape and the mappings between them.
//!
//! Clients see identifiers as 24-character hex strings; the store keeps
//! them as BSON `ObjectId`s.

use std::fmt;
use std::str::FromStr;

use bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Store-native book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BookId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::InvalidId(format!("Invalid book id: {}", s)))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Book fields as submitted on create and update (full replacement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    /// May be empty
    pub summary: String,
}

impl BookPayload {
    /// Storage field set, used as the inserted document and as the `$set` of an update.
    pub fn to_document(&self) -> Document {
        doc! {
            "title": self.title.as_str(),
            "author": self.author.as_str(),
            "summary": self.summary.as_str(),
        }
    }
}

/// Book record as returned by get, list and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Store-assigned identifier (24 hex characters)
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
}

/// Persisted book document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub summary: String,
}

impl BookDocument {
    pub fn new(id: ObjectId, payload: &BookPayload) -> Self {
        Self {
            id,
            title: payload.title.clone(),
            author: payload.author.clone(),
            summary: payload.summary.clone(),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            title: document.title,
            author: document.author,
            summary: document.summary,
        }
    }
}

/// Confirmation returned by delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}
