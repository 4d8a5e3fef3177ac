//! Books repository

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::Author,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    pagination::Pagination,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a book. The unique ISBN constraint is enforced by the
    /// database; a violation surfaces as a mapped conflict.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let published_date = data
            .published_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, isbn, published_date, genre, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.isbn)
        .bind(published_date)
        .bind(&data.genre)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// List live books with optional filters and pagination, authors
    /// embedded. Filters are AND-combined.
    pub async fn list(
        &self,
        query: &BookQuery,
        pagination: &Pagination,
    ) -> AppResult<(Vec<Book>, i64)> {
        let mut conditions = vec!["deleted_at IS NULL".to_string()];
        let mut idx = 1;

        if query.title.is_some() {
            conditions.push(format!("title ILIKE ${}", idx));
            idx += 1;
        }
        if query.isbn.is_some() {
            conditions.push(format!("isbn ILIKE ${}", idx));
            idx += 1;
        }
        if query.author_id.is_some() {
            conditions.push(format!("author_id = ${}", idx));
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let title = query.title.as_ref().map(|v| format!("%{}%", v));
        let isbn = query.isbn.as_ref().map(|v| format!("%{}%", v));

        // Count total
        let count_q = format!("SELECT COUNT(*) FROM books {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref t) = title { count_builder = count_builder.bind(t); }
        if let Some(ref i) = isbn { count_builder = count_builder.bind(i); }
        if let Some(a) = query.author_id { count_builder = count_builder.bind(a); }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch rows
        let select_q = format!(
            "SELECT * FROM books {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, pagination.limit, pagination.offset
        );
        let mut builder = sqlx::query_as::<_, Book>(&select_q);
        if let Some(ref t) = title { builder = builder.bind(t); }
        if let Some(ref i) = isbn { builder = builder.bind(i); }
        if let Some(a) = query.author_id { builder = builder.bind(a); }

        let rows = builder.fetch_all(&self.pool).await?;
        let rows = self.attach_authors(rows).await?;
        Ok((rows, total))
    }

    /// Get a live book by ID, author embedded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;

        let mut books = self.attach_authors(vec![book]).await?;
        Ok(books.remove(0))
    }

    /// Update a book, writing only the provided fields
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.title, "title");
        add_f!(data.isbn, "isbn");
        add_f!(data.published_date, "published_date");
        add_f!(data.genre, "genre");
        add_f!(data.author_id, "author_id");

        let query = format!(
            "UPDATE books SET {} WHERE id = {} AND deleted_at IS NULL RETURNING *",
            sets.join(", "),
            id
        );

        let published_date = data
            .published_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(now);

        macro_rules! bind_f {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_f!(data.title);
        bind_f!(data.isbn);
        if data.published_date.is_some() { builder = builder.bind(published_date); }
        bind_f!(data.genre);
        if let Some(author_id) = data.author_id { builder = builder.bind(author_id); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))
    }

    /// Soft-delete a book
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFoundWhileDeleting(
                "Book not found during delete operation".to_string(),
            ));
        }
        Ok(())
    }

    /// Embed the owning author into each book
    async fn attach_authors(&self, mut books: Vec<Book>) -> AppResult<Vec<Book>> {
        if books.is_empty() {
            return Ok(books);
        }

        let mut ids: Vec<i32> = books.iter().map(|b| b.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;
        let by_id: HashMap<i32, Author> = authors.into_iter().map(|a| (a.id, a)).collect();

        for book in &mut books {
            book.author = by_id.get(&book.author_id).cloned();
        }
        Ok(books)
    }
}
