use tracing::{info, warn};

use crate::{
    book::repository::{BookRecordUpdate, BookRepositoryArc},
    error::{CatalogError, CatalogResult},
    model::book::{BookId, BookModel},
};

#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug)]
pub struct UpdateBookCommandInput<'a> {
    pub id: &'a BookId,
    pub title: &'a str,
}

#[derive(Debug)]
pub struct UpdateBookCommandOutput {
    pub book: BookModel,
}

impl UpdateBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    /// Retitles a book.
    ///
    /// Like author renames, a book cannot be retitled to the title it already has.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: UpdateBookCommandInput<'_>,
    ) -> CatalogResult<UpdateBookCommandOutput> {
        let not_found = || CatalogError::BookNotFound {
            id: input.id.clone(),
        };

        let mut book: BookModel = self
            .book_repository
            .select(input.id)
            .await?
            .ok_or_else(not_found)?
            .into();

        let title = input.title;
        if title.trim().is_empty() {
            return Err(CatalogError::InvalidTitle);
        }

        if self.book_repository.select_by_title(title).await?.is_some() {
            warn!(book_id = %input.id, title = %title, "Book title already taken");
            return Err(CatalogError::DuplicateTitle {
                title: title.to_string(),
            });
        }

        let update = BookRecordUpdate {
            id: input.id,
            title: Some(title),
        };
        if !self.book_repository.update(update).await? {
            return Err(not_found());
        }
        book.title = title.to_string();

        info!(book_id = %input.id, title = %title, "Retitled book");

        Ok(UpdateBookCommandOutput { book })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::repository::{BookRecordOwned, memory::MemoryBookRepository};

    #[tokio::test]
    async fn it_works() {
        let book_repository: BookRepositoryArc =
            Arc::new(MemoryBookRepository::with_data(vec![BookRecordOwned {
                id: "1".into(),
                title: "T".into(),
                author_id: "1".into(),
            }]));
        let command = UpdateBookCommand::new(book_repository.clone());
        let id = BookId::new(1);

        let output = command
            .execute(UpdateBookCommandInput {
                id: &id,
                title: "U",
            })
            .await
            .unwrap();
        assert_eq!(output.book.title, "U");
        assert_eq!(
            book_repository.select(&id).await.unwrap().unwrap().title,
            "U"
        );

        assert_eq!(
            command
                .execute(UpdateBookCommandInput {
                    id: &id,
                    title: "U",
                })
                .await
                .unwrap_err(),
            CatalogError::DuplicateTitle { title: "U".into() }
        );

        let missing = BookId::new(2);
        assert_eq!(
            command
                .execute(UpdateBookCommandInput {
                    id: &missing,
                    title: "V",
                })
                .await
                .unwrap_err(),
            CatalogError::BookNotFound { id: missing }
        );

        assert_eq!(
            command
                .execute(UpdateBookCommandInput {
                    id: &id,
                    title: "  ",
                })
                .await
                .unwrap_err(),
            CatalogError::InvalidTitle
        );
        let output = command
            .execute(UpdateBookCommandInput {
                id: &id,
                title: " U ",
            })
            .await
            .unwrap();
        assert_eq!(output.book.title, " U ");
    }
}
