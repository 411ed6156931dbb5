use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::CatalogResult,
    model::{
        author::AuthorId,
        book::{BookId, BookModel},
    },
};

/// In-memory repository implementation.
pub mod memory;

/// Book record for insertion operations.
#[derive(Debug)]
pub struct BookRecordInsert {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book, unique across the catalog
    pub title: String,
    /// Identifier of the book's author
    pub author_id: AuthorId,
}

/// Complete book record with ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecordOwned {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Identifier of the book's author
    pub author_id: AuthorId,
}

/// Book record for update operations.
///
/// Only provided fields will be updated during the operation.
#[derive(Debug)]
pub struct BookRecordUpdate<'a> {
    /// Unique identifier for the book to update
    pub id: &'a BookId,
    /// New title
    pub title: Option<&'a str>,
}

/// Repository trait for book data operations.
///
/// Implementations keep records in insertion order and return them in that order.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: BookRecordInsert) -> CatalogResult<()>;

    /// Updates an existing book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    async fn update(&self, update: BookRecordUpdate<'_>) -> CatalogResult<bool>;

    /// Removes a book record by ID.
    ///
    /// # Returns
    ///
    /// Returns the removed record, or `None` if not found.
    async fn delete(&self, id: &BookId) -> CatalogResult<Option<BookRecordOwned>>;

    /// Removes every book written by the given author.
    ///
    /// # Returns
    ///
    /// Returns the removed records in store order.
    async fn delete_by_author(&self, author_id: &AuthorId) -> CatalogResult<Vec<BookRecordOwned>>;

    /// Selects a book record by ID.
    async fn select(&self, id: &BookId) -> CatalogResult<Option<BookRecordOwned>>;

    /// Selects the book with exactly the given title.
    async fn select_by_title(&self, title: &str) -> CatalogResult<Option<BookRecordOwned>>;

    /// Selects every book written by the given author.
    async fn select_by_author(&self, author_id: &AuthorId) -> CatalogResult<Vec<BookRecordOwned>>;

    /// Selects all book records.
    async fn select_all(&self) -> CatalogResult<Vec<BookRecordOwned>>;
}

/// Thread-safe shared reference to a book repository.
pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl From<BookModel> for BookRecordOwned {
    fn from(book: BookModel) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author_id: book.author_id,
        }
    }
}

impl From<BookRecordOwned> for BookModel {
    fn from(record: BookRecordOwned) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author_id: record.author_id,
        }
    }
}
