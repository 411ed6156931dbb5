use crate::{
    author::repository::AuthorRepositoryArc,
    book::repository::BookRepositoryArc,
    error::CatalogResult,
    model::{
        author::{AuthorId, AuthorModel},
        book::BookModel,
    },
};

#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
    book_repository: BookRepositoryArc,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc, book_repository: BookRepositoryArc) -> Self {
        AuthorQueryManager {
            author_repository,
            book_repository,
        }
    }

    pub async fn query_single(&self, id: &AuthorId) -> CatalogResult<Option<AuthorModel>> {
        Ok(self.author_repository.select(id).await?.map(Into::into))
    }

    pub async fn query_list(&self) -> CatalogResult<Vec<AuthorModel>> {
        Ok(self
            .author_repository
            .select_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Books written by `author`, in store order.
    pub async fn query_books(&self, author: &AuthorModel) -> CatalogResult<Vec<BookModel>> {
        Ok(self
            .book_repository
            .select_by_author(&author.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
