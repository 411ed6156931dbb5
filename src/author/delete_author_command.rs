use tracing::{info, warn};

use crate::{
    author::repository::AuthorRepositoryArc,
    book::repository::BookRepositoryArc,
    config::AuthorDeletePolicy,
    error::{CatalogError, CatalogResult},
    model::{
        author::{AuthorId, AuthorModel},
        book::BookModel,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteAuthorCommand {
    author_repository: AuthorRepositoryArc,
    book_repository: BookRepositoryArc,
    policy: AuthorDeletePolicy,
}

#[derive(Debug, Clone)]
pub struct DeleteAuthorCommandOutput {
    /// The author as it was before removal
    pub author: AuthorModel,
    /// Books removed along with the author, only under [`AuthorDeletePolicy::Cascade`]
    pub deleted_books: Vec<BookModel>,
}

impl DeleteAuthorCommand {
    pub fn new(
        author_repository: AuthorRepositoryArc,
        book_repository: BookRepositoryArc,
        policy: AuthorDeletePolicy,
    ) -> Self {
        DeleteAuthorCommand {
            author_repository,
            book_repository,
            policy,
        }
    }

    /// Removes an author, handling its books according to the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AuthorNotFound`] if the author does not exist and
    /// [`CatalogError::AuthorHasBooks`] if the policy is
    /// [`AuthorDeletePolicy::Restrict`] and the author still has books.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &AuthorId) -> CatalogResult<DeleteAuthorCommandOutput> {
        let not_found = || CatalogError::AuthorNotFound { id: id.clone() };

        if self.author_repository.select(id).await?.is_none() {
            return Err(not_found());
        }

        let deleted_books = match self.policy {
            AuthorDeletePolicy::Restrict => {
                let book_count = self.book_repository.select_by_author(id).await?.len();
                if book_count > 0 {
                    warn!(author_id = %id, book_count, "Refusing to delete author with books");
                    return Err(CatalogError::AuthorHasBooks {
                        id: id.clone(),
                        book_count,
                    });
                }
                Vec::new()
            }
            AuthorDeletePolicy::Cascade => self.book_repository.delete_by_author(id).await?,
            AuthorDeletePolicy::Permissive => {
                let book_count = self.book_repository.select_by_author(id).await?.len();
                if book_count > 0 {
                    warn!(author_id = %id, book_count, "Deleting author leaves dangling books");
                }
                Vec::new()
            }
        };

        let author = self.author_repository.delete(id).await?.ok_or_else(not_found)?;

        info!(
            author_id = %id,
            deleted_books = deleted_books.len(),
            "Deleted author"
        );

        Ok(DeleteAuthorCommandOutput {
            author: author.into(),
            deleted_books: deleted_books.into_iter().map(Into::into).collect(),
        })
    }
}
