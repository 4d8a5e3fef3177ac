//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;

/// Book record. `author` is loaded separately and embedded in responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub published_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(custom(
        function = "crate::models::validation::validate_isbn13",
        message = "isbn must be a valid ISBN-13 format (e.g., 978-3-16-148410-0)"
    ))]
    pub isbn: String,
    /// Publication date (YYYY-MM-DD)
    #[validate(custom(
        function = "crate::models::validation::validate_iso_date",
        message = "publishedDate must be a valid ISO 8601 date string (YYYY-MM-DD)"
    ))]
    pub published_date: Option<String>,
    #[validate(length(max = 100, message = "genre must not exceed 100 characters"))]
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "authorId must be a positive integer"))]
    pub author_id: i32,
}

/// Update book request; only provided fields are written
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(custom(
        function = "crate::models::validation::validate_isbn13",
        message = "isbn must be a valid ISBN-13 format (e.g., 978-3-16-148410-0)"
    ))]
    pub isbn: Option<String>,
    #[validate(custom(
        function = "crate::models::validation::validate_iso_date",
        message = "publishedDate must be a valid ISO 8601 date string (YYYY-MM-DD)"
    ))]
    pub published_date: Option<String>,
    #[validate(length(max = 100, message = "genre must not exceed 100 characters"))]
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "authorId must be a positive integer"))]
    pub author_id: Option<i32>,
}

/// Book list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    /// Case-insensitive partial match on title
    pub title: Option<String>,
    /// Case-insensitive partial match on ISBN
    pub isbn: Option<String>,
    /// Exact match on the owning author
    pub author_id: Option<i32>,
}
