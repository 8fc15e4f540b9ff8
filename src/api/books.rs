//! Book endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookPayload, DeleteResponse},
};

use super::JsonBody;

/// List books (at most 100, store order)
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<Book>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID (24 hex characters)")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found or malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_by_id(&id).await?;
    Ok(Json(book))
}

/// Create a book.
///
/// The body echoes the submitted fields; the new ID is in the `Location` header.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookPayload,
            headers(("location" = String, description = "Path of the created book"))),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BookPayload>)> {
    let (id, book) = state.services.catalog.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/books/{}", id))],
        Json(book),
    ))
}

/// Replace all fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID (24 hex characters)")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found or malformed ID", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update(&id, payload).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID (24 hex characters)")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "Book not found or malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.catalog.delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Book has been deleted".to_string(),
    }))
}
