//! Books service

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    pagination::{Paginated, Pagination},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book. The referenced author must exist and be live.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        // Verify author exists
        self.repository.authors.get_by_id(data.author_id).await?;

        let book = self.repository.books.create(data).await?;

        // Return with author information
        self.repository.books.get_by_id(book.id).await
    }

    pub async fn find_all(
        &self,
        pagination: &Pagination,
        query: &BookQuery,
    ) -> AppResult<Paginated<Book>> {
        let (books, total) = self.repository.books.list(query, pagination).await?;
        Ok(Paginated::new(books, total, pagination))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Update a book; a changed author reference is re-verified
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;

        // If the author reference is being updated, verify the new author exists
        if let Some(author_id) = data.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }

        self.repository.books.update(id, data).await?;
        self.repository.books.get_by_id(id).await
    }

    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.repository.books.soft_delete(id).await
    }
}
