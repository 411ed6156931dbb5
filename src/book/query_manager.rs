use crate::{
    author::repository::AuthorRepositoryArc,
    book::repository::BookRepositoryArc,
    error::CatalogResult,
    model::{
        author::AuthorModel,
        book::{BookId, BookModel},
    },
};

#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
    author_repository: AuthorRepositoryArc,
}

impl BookQueryManager {
    pub fn new(book_repository: BookRepositoryArc, author_repository: AuthorRepositoryArc) -> Self {
        BookQueryManager {
            book_repository,
            author_repository,
        }
    }

    pub async fn query_single(&self, id: &BookId) -> CatalogResult<Option<BookModel>> {
        Ok(self.book_repository.select(id).await?.map(Into::into))
    }

    pub async fn query_list(&self) -> CatalogResult<Vec<BookModel>> {
        Ok(self
            .book_repository
            .select_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Author of `book`.
    ///
    /// `None` only if the author was deleted under the permissive delete policy.
    pub async fn query_author(&self, book: &BookModel) -> CatalogResult<Option<AuthorModel>> {
        Ok(self
            .author_repository
            .select(&book.author_id)
            .await?
            .map(Into::into))
    }
}
