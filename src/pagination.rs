//! Pagination parameter resolution and the paginated list envelope

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;

/// Largest page slice a single request may fetch
const MAX_LIMIT: i64 = 100;

/// Resolved pagination descriptor consumed by list operations
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub size: i64,
    pub offset: i64,
}

/// Raw `page`/`limit` query values as they arrive on the wire
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl Pagination {
    /// Resolve raw query values into a pagination descriptor.
    ///
    /// Missing or empty values default to page 0 / limit 10. Non-numeric or
    /// negative values are rejected, as is a limit above [`MAX_LIMIT`].
    pub fn resolve(query: PaginationQuery) -> Result<Self, AppError> {
        let page = parse_param(query.page, 0)?;
        let limit = parse_param(query.limit, 10)?;

        // do not allow to fetch large slices of the dataset
        if limit > MAX_LIMIT {
            return Err(AppError::Validation(
                "Invalid pagination params: Max limit is 100".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit,
            size: limit,
            offset: page * limit,
        })
    }

    /// Whether more rows exist beyond this page
    pub fn has_next(&self, total: i64) -> bool {
        total > (self.page + 1) * self.limit
    }
}

fn parse_param(value: Option<String>, default: i64) -> Result<i64, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| AppError::Validation("Invalid pagination params".to_string())),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Validation("Invalid pagination params".to_string()))?;
        Self::resolve(query)
    }
}

/// Paginated list envelope returned by every list endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub item: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub has_next_page: bool,
}

impl<T> Paginated<T> {
    pub fn new(item: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            item,
            total,
            page: pagination.page,
            limit: pagination.limit,
            has_next_page: pagination.has_next(total),
        }
    }
}
