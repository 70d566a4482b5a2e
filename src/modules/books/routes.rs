//! HTTP handlers for the books module. Handlers stay thin: extract, call
//! the store, map `CatalogError` into the shared `AppError` taxonomy.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use folio_http::error::AppResult;

use super::models::{Book, BookFilter, BookRequest};
use super::store::CatalogStore;

/// List the whole catalog, or the subset matching the query filters.
pub async fn list_books(
    State(store): State<Arc<CatalogStore>>,
    Query(filter): Query<BookFilter>,
) -> Json<Vec<Book>> {
    let books = if filter.is_empty() {
        store.list_all()
    } else {
        store.search(&filter)
    };
    Json(books)
}

/// Fetch a single book by id.
pub async fn get_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> AppResult<Json<Book>> {
    let book = store.get_by_id(id)?;
    Ok(Json(book))
}

/// Fetch the first book whose title matches case-insensitively.
pub async fn get_book_by_title(
    State(store): State<Arc<CatalogStore>>,
    Path(title): Path<String>,
) -> AppResult<Json<Book>> {
    let book = store.get_by_title(&title)?;
    Ok(Json(book))
}

/// Create a book; the store assigns the id.
pub async fn create_book(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<BookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = store.create(request)?;
    tracing::info!(id = created.id, title = %created.title, "book created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace every field of an existing book.
pub async fn update_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
    Json(request): Json<BookRequest>,
) -> AppResult<StatusCode> {
    store.update(id, request)?;
    tracing::info!(id, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a book by id.
pub async fn delete_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    store.delete(id)?;
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
