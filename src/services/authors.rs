//! Authors service

use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    pagination::{Paginated, Pagination},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(data).await
    }

    pub async fn find_all(
        &self,
        pagination: &Pagination,
        query: &AuthorQuery,
    ) -> AppResult<Paginated<Author>> {
        let (authors, total) = self.repository.authors.list(query, pagination).await?;
        Ok(Paginated::new(authors, total, pagination))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, data).await
    }

    /// Soft-delete an author; its books are cascade soft-deleted
    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.repository.authors.soft_delete(id).await
    }
}
