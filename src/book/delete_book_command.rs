use tracing::info;

use crate::{
    book::repository::BookRepositoryArc,
    error::{CatalogError, CatalogResult},
    model::book::{BookId, BookModel},
};

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    book_repository: BookRepositoryArc,
}

impl DeleteBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    /// Removes a book and returns its last state.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &BookId) -> CatalogResult<BookModel> {
        let book = self
            .book_repository
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::BookNotFound { id: id.clone() })?;

        info!(book_id = %id, "Deleted book");

        Ok(book.into())
    }
}
