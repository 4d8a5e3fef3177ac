//! Authors repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    pagination::Pagination,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert an author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let birth_date = data
            .birth_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, bio, birth_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.bio)
        .bind(birth_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// List live authors with optional name filters and pagination.
    /// Name filters are OR-combined when both are present.
    pub async fn list(
        &self,
        query: &AuthorQuery,
        pagination: &Pagination,
    ) -> AppResult<(Vec<Author>, i64)> {
        let mut filters = Vec::new();
        let mut idx = 1;

        if query.first_name.is_some() {
            filters.push(format!("first_name ILIKE ${}", idx));
            idx += 1;
        }
        if query.last_name.is_some() {
            filters.push(format!("last_name ILIKE ${}", idx));
        }

        let where_clause = if filters.is_empty() {
            "WHERE deleted_at IS NULL".to_string()
        } else {
            format!("WHERE deleted_at IS NULL AND ({})", filters.join(" OR "))
        };

        let first_name = query.first_name.as_ref().map(|v| format!("%{}%", v));
        let last_name = query.last_name.as_ref().map(|v| format!("%{}%", v));

        // Count total
        let count_q = format!("SELECT COUNT(*) FROM authors {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref fnm) = first_name { count_builder = count_builder.bind(fnm); }
        if let Some(ref lnm) = last_name { count_builder = count_builder.bind(lnm); }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch rows
        let select_q = format!(
            "SELECT * FROM authors {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, pagination.limit, pagination.offset
        );
        let mut builder = sqlx::query_as::<_, Author>(&select_q);
        if let Some(ref fnm) = first_name { builder = builder.bind(fnm); }
        if let Some(ref lnm) = last_name { builder = builder.bind(lnm); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Get a live author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with ID {} not found", id)))
    }

    /// Update an author, writing only the provided fields
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.first_name, "first_name");
        add_f!(data.last_name, "last_name");
        add_f!(data.bio, "bio");
        add_f!(data.birth_date, "birth_date");

        let query = format!(
            "UPDATE authors SET {} WHERE id = {} AND deleted_at IS NULL RETURNING *",
            sets.join(", "),
            id
        );

        let birth_date = data
            .birth_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        let mut builder = sqlx::query_as::<_, Author>(&query).bind(now);

        macro_rules! bind_f {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_f!(data.first_name);
        bind_f!(data.last_name);
        bind_f!(data.bio);
        if data.birth_date.is_some() { builder = builder.bind(birth_date); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with ID {} not found", id)))
    }

    /// Soft-delete an author and cascade to its books, in one transaction
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE authors SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFoundWhileDeleting(
                "Author not found during delete operation".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE books SET deleted_at = $1, updated_at = $1 WHERE author_id = $2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
