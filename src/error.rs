use thiserror::Error;
use tracing::error;

use crate::model::{author::AuthorId, book::BookId};

/// Catalog operation failures.
///
/// Every variant aborts the operation that raised it without mutating the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("author `{name}` already exists")]
    DuplicateName { name: String },

    #[error("book `{title}` already exists")]
    DuplicateTitle { title: String },

    #[error("author `{id}` not found")]
    AuthorNotFound { id: AuthorId },

    #[error("book `{id}` not found")]
    BookNotFound { id: BookId },

    /// Author still has books and the delete policy forbids orphaning them.
    #[error("author `{id}` still has {book_count} book(s)")]
    AuthorHasBooks { id: AuthorId, book_count: usize },

    #[error("author name must not be empty")]
    InvalidName,

    #[error("book title must not be empty")]
    InvalidTitle,

    /// Initial data holds two records of one kind under the same id.
    #[error("id `{id}` is used by more than one {kind}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("no {kind} ids left to assign")]
    IdsExhausted { kind: &'static str },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Stable error code used in error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::DuplicateTitle { .. } => "DUPLICATE_TITLE",
            Self::AuthorNotFound { .. } => "AUTHOR_NOT_FOUND",
            Self::BookNotFound { .. } => "BOOK_NOT_FOUND",
            Self::AuthorHasBooks { .. } => "AUTHOR_HAS_BOOKS",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::IdsExhausted { .. } => "IDS_EXHAUSTED",
        }
    }
}

/// Application error types.
///
/// Represents all possible errors that can occur while running the catalog service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal application error.
    ///
    /// Configuration, tracing and I/O failures end up here.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Catalog operation error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    std::io::Error,
    serde_json::Error,
    tracing_subscriber::util::TryInitError,
    tracing_subscriber::filter::ParseError,
);

impl AppError {
    /// Logs internal errors, leaving catalog errors to the caller.
    pub fn report(&self) {
        if let AppError::Internal(_) = self {
            error!("internal service error: {}", self);
        }
    }
}
