//! Handlers for the in-memory book list.

use hyper::{body::Bytes, Request, Response};

use storefront_core::models::Book;

use super::request_utils::{
    json_response, map_store_error, parse_id_param, parse_json_body, MatchitParams,
};
use super::response::{ok_response, success_response};
use crate::router::{AppState, RouterError};

/// Lists every book in insertion order.
///
/// # Endpoint
/// `GET /books`
pub async fn list_books(
    _req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let books = state.books.list().map_err(map_store_error)?;
    json_response(200, &ok_response(books))
}

/// Appends a book.
///
/// # Endpoint
/// `POST /books`
///
/// # Request Body
/// ```json
/// {"title": "T", "author": "A", "read": false}
/// ```
///
/// # Response
/// - **201 Created**: the stored book with its assigned `id`
///
/// # Errors
/// - **400 Bad Request**: body is not a valid book
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8000/books \
///   -H "Content-Type: application/json" \
///   -d '{"title": "T", "author": "A", "read": false}'
/// ```
pub async fn create_book(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let book: Book = parse_json_body(req.body())?;
    let stored = state.books.create(book).map_err(map_store_error)?;
    tracing::info!("Added book {}", stored.id);
    json_response(201, &success_response(201, "Book added !", stored))
}

/// Replaces a book in place.
///
/// # Endpoint
/// `PUT /books/{id}`
///
/// # Errors
/// - **400 Bad Request**: invalid id or body
/// - **404 Not Found**: no book with this id
pub async fn update_book(
    req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id_param(&params)?;
    let book: Book = parse_json_body(req.body())?;
    let stored = state.books.update(id, book).map_err(map_store_error)?;
    tracing::info!("Edited book {}", id);
    json_response(200, &success_response(200, "Book edited !", stored))
}

/// Removes a book and returns it.
///
/// # Endpoint
/// `DELETE /books/{id}`
///
/// # Errors
/// - **400 Bad Request**: invalid id
/// - **404 Not Found**: no book with this id
pub async fn delete_book(
    _req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id_param(&params)?;
    let removed = state.books.remove(id).map_err(map_store_error)?;
    tracing::info!("Removed book {}", id);
    json_response(200, &success_response(200, "Book removed !", removed))
}
