use std::sync::Arc;

use itertools::Itertools;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::{
    author::{
        create_author_command::{CreateAuthorCommand, CreateAuthorCommandInput},
        delete_author_command::DeleteAuthorCommand,
        query_manager::AuthorQueryManager,
        repository::{AuthorRepositoryArc, memory::MemoryAuthorRepository},
        update_author_command::{UpdateAuthorCommand, UpdateAuthorCommandInput},
    },
    book::{
        create_book_command::{CreateBookCommand, CreateBookCommandInput},
        delete_book_command::DeleteBookCommand,
        query_manager::BookQueryManager,
        repository::{BookRepositoryArc, memory::MemoryBookRepository},
        update_book_command::{UpdateBookCommand, UpdateBookCommandInput},
    },
    config::{AuthorDeletePolicy, CatalogConfig},
    error::{CatalogError, CatalogResult},
    id::IdGenerator,
    model::{
        author::{AuthorId, AuthorModel},
        book::{BookId, BookModel},
    },
    seed,
};

/// The catalog of authors and books.
///
/// Owns both collections and is the only way to read or change them. Every
/// write holds the store lock exclusively across its checks and mutations,
/// and every read holds it shared, so readers never observe a write halfway
/// through. Concurrent callers can share one store behind an `Arc`.
#[derive(Debug)]
pub struct CatalogStore {
    lock: RwLock<()>,
    author_query_manager: AuthorQueryManager,
    book_query_manager: BookQueryManager,
    create_author_command: CreateAuthorCommand,
    update_author_command: UpdateAuthorCommand,
    delete_author_command: DeleteAuthorCommand,
    create_book_command: CreateBookCommand,
    update_book_command: UpdateBookCommand,
    delete_book_command: DeleteBookCommand,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new(policy: AuthorDeletePolicy) -> Self {
        Self::with_repositories(
            Arc::new(MemoryAuthorRepository::new()),
            Arc::new(MemoryBookRepository::new()),
            IdGenerator::new(),
            IdGenerator::new(),
            policy,
        )
    }

    /// Creates a catalog holding the sample authors and books.
    pub fn seeded(policy: AuthorDeletePolicy) -> Self {
        let authors = seed::authors();
        let books = seed::books();
        let author_id_generator =
            IdGenerator::continuing(authors.iter().map(|author| author.id.as_str()));
        let book_id_generator = IdGenerator::continuing(books.iter().map(|book| book.id.as_str()));

        Self::with_repositories(
            Arc::new(MemoryAuthorRepository::with_data(authors)),
            Arc::new(MemoryBookRepository::with_data(books)),
            author_id_generator,
            book_id_generator,
            policy,
        )
    }

    /// Creates a catalog as described by the configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        if config.seed {
            Self::seeded(config.author_delete_policy)
        } else {
            Self::new(config.author_delete_policy)
        }
    }

    /// Creates a catalog with initial data.
    ///
    /// New ids continue after the highest numeric id of each kind.
    ///
    /// # Errors
    ///
    /// Fails if the data breaks a catalog invariant: an id used twice within
    /// one kind, a blank name or title, repeated author names or book titles,
    /// or a book whose author is not in `authors`.
    pub fn with_data(
        authors: Vec<AuthorModel>,
        books: Vec<BookModel>,
        policy: AuthorDeletePolicy,
    ) -> CatalogResult<Self> {
        if let Some(author) = authors.iter().duplicates_by(|author| &author.id).next() {
            return Err(CatalogError::DuplicateId {
                kind: "author",
                id: author.id.to_string(),
            });
        }
        if let Some(book) = books.iter().duplicates_by(|book| &book.id).next() {
            return Err(CatalogError::DuplicateId {
                kind: "book",
                id: book.id.to_string(),
            });
        }
        if authors.iter().any(|author| author.name.trim().is_empty()) {
            return Err(CatalogError::InvalidName);
        }
        if books.iter().any(|book| book.title.trim().is_empty()) {
            return Err(CatalogError::InvalidTitle);
        }
        if let Some(author) = authors.iter().duplicates_by(|author| &author.name).next() {
            return Err(CatalogError::DuplicateName {
                name: author.name.clone(),
            });
        }
        if let Some(book) = books.iter().duplicates_by(|book| &book.title).next() {
            return Err(CatalogError::DuplicateTitle {
                title: book.title.clone(),
            });
        }
        if let Some(book) = books
            .iter()
            .find(|book| !authors.iter().any(|author| author.id == book.author_id))
        {
            return Err(CatalogError::AuthorNotFound {
                id: book.author_id.clone(),
            });
        }

        let author_id_generator =
            IdGenerator::continuing(authors.iter().map(|author| author.id.as_str()));
        let book_id_generator = IdGenerator::continuing(books.iter().map(|book| book.id.as_str()));

        Ok(Self::with_repositories(
            Arc::new(MemoryAuthorRepository::with_data(
                authors.into_iter().map(Into::into).collect(),
            )),
            Arc::new(MemoryBookRepository::with_data(
                books.into_iter().map(Into::into).collect(),
            )),
            author_id_generator,
            book_id_generator,
            policy,
        ))
    }

    /// Creates a catalog on top of existing repositories.
    pub fn with_repositories(
        author_repository: AuthorRepositoryArc,
        book_repository: BookRepositoryArc,
        author_id_generator: IdGenerator,
        book_id_generator: IdGenerator,
        policy: AuthorDeletePolicy,
    ) -> Self {
        let author_id_generator = Arc::new(Mutex::new(author_id_generator));
        let book_id_generator = Arc::new(Mutex::new(book_id_generator));

        CatalogStore {
            lock: RwLock::new(()),
            author_query_manager: AuthorQueryManager::new(
                Arc::clone(&author_repository),
                Arc::clone(&book_repository),
            ),
            book_query_manager: BookQueryManager::new(
                Arc::clone(&book_repository),
                Arc::clone(&author_repository),
            ),
            create_author_command: CreateAuthorCommand::new(
                author_id_generator,
                Arc::clone(&author_repository),
            ),
            update_author_command: UpdateAuthorCommand::new(Arc::clone(&author_repository)),
            delete_author_command: DeleteAuthorCommand::new(
                Arc::clone(&author_repository),
                Arc::clone(&book_repository),
                policy,
            ),
            create_book_command: CreateBookCommand::new(
                book_id_generator,
                Arc::clone(&book_repository),
                author_repository,
            ),
            update_book_command: UpdateBookCommand::new(Arc::clone(&book_repository)),
            delete_book_command: DeleteBookCommand::new(book_repository),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_books(&self) -> CatalogResult<Vec<BookModel>> {
        let _guard = self.lock.read().await;
        self.book_query_manager.query_list().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_authors(&self) -> CatalogResult<Vec<AuthorModel>> {
        let _guard = self.lock.read().await;
        self.author_query_manager.query_list().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_book(&self, id: &BookId) -> CatalogResult<Option<BookModel>> {
        let _guard = self.lock.read().await;
        self.book_query_manager.query_single(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_author(&self, id: &AuthorId) -> CatalogResult<Option<AuthorModel>> {
        let _guard = self.lock.read().await;
        self.author_query_manager.query_single(id).await
    }

    /// Resolves the author a book points at.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_author_of(&self, book: &BookModel) -> CatalogResult<Option<AuthorModel>> {
        let _guard = self.lock.read().await;
        self.book_query_manager.query_author(book).await
    }

    /// Resolves the books written by an author, in store order.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_books_of(&self, author: &AuthorModel) -> CatalogResult<Vec<BookModel>> {
        let _guard = self.lock.read().await;
        self.author_query_manager.query_books(author).await
    }

    /// Adds an author under a fresh id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateName`] if the name is taken,
    /// [`CatalogError::InvalidName`] if it is blank.
    #[tracing::instrument(skip(self))]
    pub async fn create_author(&self, name: &str) -> CatalogResult<AuthorModel> {
        let _guard = self.lock.write().await;
        let output = self
            .create_author_command
            .execute(CreateAuthorCommandInput { name })
            .await?;
        Ok(output.author)
    }

    /// Adds a book for an existing author under a fresh id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateTitle`] if the title is taken,
    /// [`CatalogError::AuthorNotFound`] if the author does not exist,
    /// [`CatalogError::InvalidTitle`] if the title is blank.
    #[tracing::instrument(skip(self))]
    pub async fn create_book(&self, title: &str, author_id: &AuthorId) -> CatalogResult<BookModel> {
        let _guard = self.lock.write().await;
        let output = self
            .create_book_command
            .execute(CreateBookCommandInput { title, author_id })
            .await?;
        Ok(output.book)
    }

    /// Replaces a book's title.
    ///
    /// # Errors
    ///
    /// [`CatalogError::BookNotFound`] if the book does not exist,
    /// [`CatalogError::DuplicateTitle`] if any book, this one included, has `new_title`.
    #[tracing::instrument(skip(self))]
    pub async fn edit_book(&self, id: &BookId, new_title: &str) -> CatalogResult<BookModel> {
        let _guard = self.lock.write().await;
        let output = self
            .update_book_command
            .execute(UpdateBookCommandInput {
                id,
                title: new_title,
            })
            .await?;
        Ok(output.book)
    }

    /// Replaces an author's name.
    ///
    /// # Errors
    ///
    /// [`CatalogError::AuthorNotFound`] if the author does not exist,
    /// [`CatalogError::DuplicateName`] if any author, this one included, has `new_name`.
    #[tracing::instrument(skip(self))]
    pub async fn edit_author(&self, id: &AuthorId, new_name: &str) -> CatalogResult<AuthorModel> {
        let _guard = self.lock.write().await;
        let output = self
            .update_author_command
            .execute(UpdateAuthorCommandInput { id, name: new_name })
            .await?;
        Ok(output.author)
    }

    /// Removes a book, returning its last state.
    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, id: &BookId) -> CatalogResult<BookModel> {
        let _guard = self.lock.write().await;
        self.delete_book_command.execute(id).await
    }

    /// Removes an author, returning its last state.
    ///
    /// Books of the author are handled by the configured [`AuthorDeletePolicy`].
    pub async fn delete_author(&self, id: &AuthorId) -> CatalogResult<AuthorModel> {
        let (author, _) = self.delete_author_with_books(id).await?;
        Ok(author)
    }

    /// Removes an author like [`CatalogStore::delete_author`], also returning
    /// the books removed with it. Only [`AuthorDeletePolicy::Cascade`] removes
    /// books, so the list is empty under the other policies.
    #[tracing::instrument(skip(self))]
    pub async fn delete_author_with_books(
        &self,
        id: &AuthorId,
    ) -> CatalogResult<(AuthorModel, Vec<BookModel>)> {
        let _guard = self.lock.write().await;
        let output = self.delete_author_command.execute(id).await?;
        if !output.deleted_books.is_empty() {
            let book_ids = output.deleted_books.iter().map(|book| &book.id).join(", ");
            info!(author_id = %id, book_ids = %book_ids, "Removed books along with their author");
        }
        Ok((output.author, output.deleted_books))
    }
}
