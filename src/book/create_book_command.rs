use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    author::repository::AuthorRepositoryArc,
    book::repository::{BookRecordInsert, BookRepositoryArc},
    error::{CatalogError, CatalogResult},
    id::IdGenerator,
    model::{
        author::AuthorId,
        book::{BookId, BookModel},
    },
};

#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    id_generator: Arc<Mutex<IdGenerator>>,
    book_repository: BookRepositoryArc,
    author_repository: AuthorRepositoryArc,
}

#[derive(Debug)]
pub struct CreateBookCommandInput<'a> {
    pub title: &'a str,
    pub author_id: &'a AuthorId,
}

#[derive(Debug)]
pub struct CreateBookCommandOutput {
    pub book: BookModel,
}

impl CreateBookCommand {
    pub fn new(
        id_generator: Arc<Mutex<IdGenerator>>,
        book_repository: BookRepositoryArc,
        author_repository: AuthorRepositoryArc,
    ) -> Self {
        Self {
            id_generator,
            book_repository,
            author_repository,
        }
    }

    /// Adds a book for an existing author.
    ///
    /// The title is checked before the author, so a duplicate title wins over a
    /// missing author.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreateBookCommandInput<'_>,
    ) -> CatalogResult<CreateBookCommandOutput> {
        let title = input.title;
        if title.trim().is_empty() {
            return Err(CatalogError::InvalidTitle);
        }

        if self.book_repository.select_by_title(title).await?.is_some() {
            warn!(title = %title, "Book title already taken");
            return Err(CatalogError::DuplicateTitle {
                title: title.to_string(),
            });
        }

        if self.author_repository.select(input.author_id).await?.is_none() {
            warn!(author_id = %input.author_id, "Book author does not exist");
            return Err(CatalogError::AuthorNotFound {
                id: input.author_id.clone(),
            });
        }

        let id = self
            .id_generator
            .lock()
            .await
            .generate()
            .map(BookId::new)
            .ok_or(CatalogError::IdsExhausted { kind: "book" })?;

        self.book_repository
            .insert(BookRecordInsert {
                id: id.clone(),
                title: title.to_string(),
                author_id: input.author_id.clone(),
            })
            .await?;

        let book_record = self
            .book_repository
            .select(&id)
            .await?
            .ok_or_else(|| CatalogError::BookNotFound { id: id.clone() })?;

        info!(book_id = %id, author_id = %input.author_id, "Successfully created book");

        Ok(CreateBookCommandOutput {
            book: book_record.into(),
        })
    }
}
