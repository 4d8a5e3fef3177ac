//! Book API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    pagination::{PaginationQuery, Pagination},
};

use super::ApiResponse;

/// Create a book; the referenced author must exist
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 404, description = "Referenced author not found", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already exists", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<ApiResponse<Book>> {
    data.validate()?;
    let book = state.services.books.create(&data).await?;
    Ok(ApiResponse::created(book))
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PaginationQuery, BookQuery),
    responses(
        (status = 200, description = "Paginated book list")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    pagination: Pagination,
    Query(query): Query<BookQuery>,
) -> AppResult<ApiResponse<crate::pagination::Paginated<Book>>> {
    let page = state.services.books.find_all(&pagination, &query).await?;
    Ok(ApiResponse::ok(page))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Book>> {
    let book = state.services.books.find_one(id).await?;
    Ok(ApiResponse::ok(book))
}

/// Update a book; a changed author reference is re-verified
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book or referenced author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<ApiResponse<Book>> {
    data.validate()?;
    let book = state.services.books.update(id, &data).await?;
    Ok(ApiResponse::ok(book))
}

/// Soft-delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
