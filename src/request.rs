//! JSON request dispatching over the catalog operations.
//!
//! Each request names one query or mutation; entity results are expanded one
//! level through the relationship resolvers, so a book carries its author and
//! an author carries its books.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    catalog::CatalogStore,
    error::CatalogResult,
    model::{
        author::{AuthorId, AuthorModel},
        book::{BookId, BookModel},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum CatalogRequest {
    Books,
    Authors,
    Book { id: BookId },
    Author { id: AuthorId },
    CreateBook { title: String, author_id: AuthorId },
    CreateAuthor { name: String },
    EditBook { id: BookId, new_title: String },
    EditAuthor { id: AuthorId, new_name: String },
    DeleteBook { id: BookId },
    DeleteAuthor { id: AuthorId },
}

/// Book with its author resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    #[serde(flatten)]
    pub book: BookModel,
    pub author: Option<AuthorModel>,
}

/// Author with its books resolved.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: AuthorModel,
    pub books: Vec<BookModel>,
}

const INVALID_REQUEST_CODE: &str = "INVALID_REQUEST";

impl CatalogStore {
    /// Parses and runs a single JSON request.
    pub async fn dispatch_line(&self, line: &str) -> Value {
        match serde_json::from_str::<CatalogRequest>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => {
                debug!(error = %err, "Rejected malformed request");
                error_envelope(INVALID_REQUEST_CODE, &err.to_string())
            }
        }
    }

    /// Runs a request and wraps the outcome in a `data` or `error` envelope.
    pub async fn dispatch(&self, request: CatalogRequest) -> Value {
        match self.execute(request).await {
            Ok(data) => json!({ "data": data }),
            Err(err) => error_envelope(err.code(), &err.to_string()),
        }
    }

    async fn execute(&self, request: CatalogRequest) -> CatalogResult<Value> {
        Ok(match request {
            CatalogRequest::Books => {
                let mut views = Vec::new();
                for book in self.list_books().await? {
                    views.push(self.book_view(book).await?);
                }
                json!(views)
            }
            CatalogRequest::Authors => {
                let mut views = Vec::new();
                for author in self.list_authors().await? {
                    views.push(self.author_view(author).await?);
                }
                json!(views)
            }
            CatalogRequest::Book { id } => match self.get_book(&id).await? {
                Some(book) => json!(self.book_view(book).await?),
                None => Value::Null,
            },
            CatalogRequest::Author { id } => match self.get_author(&id).await? {
                Some(author) => json!(self.author_view(author).await?),
                None => Value::Null,
            },
            CatalogRequest::CreateBook { title, author_id } => {
                let book = self.create_book(&title, &author_id).await?;
                json!(self.book_view(book).await?)
            }
            CatalogRequest::CreateAuthor { name } => {
                let author = self.create_author(&name).await?;
                json!(self.author_view(author).await?)
            }
            CatalogRequest::EditBook { id, new_title } => {
                let book = self.edit_book(&id, &new_title).await?;
                json!(self.book_view(book).await?)
            }
            CatalogRequest::EditAuthor { id, new_name } => {
                let author = self.edit_author(&id, &new_name).await?;
                json!(self.author_view(author).await?)
            }
            // Removed records are returned without relations.
            CatalogRequest::DeleteBook { id } => json!(self.delete_book(&id).await?),
            CatalogRequest::DeleteAuthor { id } => json!(self.delete_author(&id).await?),
        })
    }

    async fn book_view(&self, book: BookModel) -> CatalogResult<BookView> {
        let author = self.resolve_author_of(&book).await?;
        Ok(BookView { book, author })
    }

    async fn author_view(&self, author: AuthorModel) -> CatalogResult<AuthorView> {
        let books = self.resolve_books_of(&author).await?;
        Ok(AuthorView { author, books })
    }
}

fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthorDeletePolicy;

    #[test]
    fn parse_requests() {
        assert_eq!(
            serde_json::from_str::<CatalogRequest>(r#"{"operation":"books"}"#).unwrap(),
            CatalogRequest::Books
        );
        assert_eq!(
            serde_json::from_str::<CatalogRequest>(
                r#"{"operation":"createBook","title":"1984","authorId":"3"}"#
            )
            .unwrap(),
            CatalogRequest::CreateBook {
                title: "1984".into(),
                author_id: AuthorId::new(3),
            }
        );
        assert_eq!(
            serde_json::from_str::<CatalogRequest>(
                r#"{"operation":"editAuthor","id":"1","newName":"Robert Galbraith"}"#
            )
            .unwrap(),
            CatalogRequest::EditAuthor {
                id: AuthorId::new(1),
                new_name: "Robert Galbraith".into(),
            }
        );
        assert!(serde_json::from_str::<CatalogRequest>(r#"{"operation":"drop"}"#).is_err());
    }

    #[tokio::test]
    async fn book_with_author() {
        let store = CatalogStore::seeded(AuthorDeletePolicy::Restrict);
        assert_eq!(
            store
                .dispatch(CatalogRequest::Book {
                    id: BookId::new(2)
                })
                .await,
            json!({
                "data": {
                    "id": "2",
                    "title": "The Lord of the Rings",
                    "authorId": "2",
                    "author": { "id": "2", "name": "J.R.R. Tolkien" },
                }
            })
        );
        assert_eq!(
            store
                .dispatch(CatalogRequest::Book {
                    id: BookId::new(9)
                })
                .await,
            json!({ "data": null })
        );
    }

    #[tokio::test]
    async fn author_with_books() {
        let store = CatalogStore::seeded(AuthorDeletePolicy::Restrict);
        assert_eq!(
            store
                .dispatch_line(r#"{"operation":"author","id":"1"}"#)
                .await,
            json!({
                "data": {
                    "id": "1",
                    "name": "J.K. Rowling",
                    "books": [{
                        "id": "1",
                        "title": "Harry Potter and the Sorcerer's Stone",
                        "authorId": "1",
                    }],
                }
            })
        );
    }

    #[tokio::test]
    async fn errors() {
        let store = CatalogStore::seeded(AuthorDeletePolicy::Restrict);
        assert_eq!(
            store
                .dispatch_line(r#"{"operation":"createAuthor","name":"J.K. Rowling"}"#)
                .await,
            json!({
                "error": {
                    "code": "DUPLICATE_NAME",
                    "message": "author `J.K. Rowling` already exists",
                }
            })
        );

        let response = store.dispatch_line("not json").await;
        assert_eq!(response["error"]["code"], INVALID_REQUEST_CODE);
    }
}
