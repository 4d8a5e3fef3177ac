//! Author API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    pagination::{PaginationQuery, Pagination},
};

use super::ApiResponse;

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<ApiResponse<Author>> {
    data.validate()?;
    let author = state.services.authors.create(&data).await?;
    Ok(ApiResponse::created(author))
}

/// List authors with name filters and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PaginationQuery, AuthorQuery),
    responses(
        (status = 200, description = "Paginated author list")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    pagination: Pagination,
    Query(query): Query<AuthorQuery>,
) -> AppResult<ApiResponse<crate::pagination::Paginated<Author>>> {
    let page = state.services.authors.find_all(&pagination, &query).await?;
    Ok(ApiResponse::ok(page))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Author>> {
    let author = state.services.authors.find_one(id).await?;
    Ok(ApiResponse::ok(author))
}

/// Update an author; only provided fields change
#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<ApiResponse<Author>> {
    data.validate()?;
    let author = state.services.authors.update(id, &data).await?;
    Ok(ApiResponse::ok(author))
}

/// Soft-delete an author and its books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
