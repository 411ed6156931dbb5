use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRecordUpdate, BookRepository},
    error::CatalogResult,
    model::{author::AuthorId, book::BookId},
};

/// In-memory implementation of the book repository.
#[derive(Debug)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<Vec<BookRecordOwned>>>,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new memory book repository with initial data.
    ///
    /// # Arguments
    ///
    /// * `books` - Initial books to populate the repository with
    pub fn with_data(books: Vec<BookRecordOwned>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> CatalogResult<()> {
        self.books.write().await.push(BookRecordOwned {
            id: record.id,
            title: record.title,
            author_id: record.author_id,
        });
        Ok(())
    }

    async fn update(&self, update: BookRecordUpdate<'_>) -> CatalogResult<bool> {
        let mut books = self.books.write().await;
        if let Some(book) = books.iter_mut().find(|book| &book.id == update.id) {
            if let Some(title) = update.title {
                book.title = title.to_string();
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: &BookId) -> CatalogResult<Option<BookRecordOwned>> {
        let mut books = self.books.write().await;
        let position = books
            .iter()
            .find_position(|book| &book.id == id)
            .map(|(index, _)| index);
        Ok(position.map(|index| books.remove(index)))
    }

    async fn delete_by_author(&self, author_id: &AuthorId) -> CatalogResult<Vec<BookRecordOwned>> {
        let mut books = self.books.write().await;
        let (removed, kept): (Vec<_>, Vec<_>) = books
            .drain(..)
            .partition(|book| &book.author_id == author_id);
        *books = kept;
        Ok(removed)
    }

    async fn select(&self, id: &BookId) -> CatalogResult<Option<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| &book.id == id).cloned())
    }

    async fn select_by_title(&self, title: &str) -> CatalogResult<Option<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.title == title).cloned())
    }

    async fn select_by_author(&self, author_id: &AuthorId) -> CatalogResult<Vec<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|book| &book.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn select_all(&self) -> CatalogResult<Vec<BookRecordOwned>> {
        Ok(self.books.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, author_id: &str) -> BookRecordOwned {
        BookRecordOwned {
            id: id.into(),
            title: title.into(),
            author_id: author_id.into(),
        }
    }

    #[tokio::test]
    async fn select_by_author_keeps_order() {
        let repository = MemoryBookRepository::with_data(vec![
            record("1", "A", "1"),
            record("2", "B", "2"),
            record("3", "C", "1"),
        ]);

        let titles: Vec<_> = repository
            .select_by_author(&AuthorId::new(1))
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, ["A", "C"]);
        assert!(
            repository
                .select_by_author(&AuthorId::new(9))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn delete_by_author() {
        let repository = MemoryBookRepository::with_data(vec![
            record("1", "A", "1"),
            record("2", "B", "2"),
            record("3", "C", "1"),
        ]);

        let removed = repository.delete_by_author(&AuthorId::new(1)).await.unwrap();
        assert_eq!(removed, [record("1", "A", "1"), record("3", "C", "1")]);
        assert_eq!(repository.select_all().await.unwrap(), [record("2", "B", "2")]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repository = MemoryBookRepository::with_data(vec![record("1", "A", "1")]);
        let id = BookId::new(1);

        assert!(
            repository
                .update(BookRecordUpdate {
                    id: &id,
                    title: Some("Z"),
                })
                .await
                .unwrap()
        );
        assert_eq!(
            repository.select_by_title("Z").await.unwrap(),
            Some(record("1", "Z", "1"))
        );
        assert_eq!(repository.select_by_title("A").await.unwrap(), None);

        assert!(repository.delete(&id).await.unwrap().is_some());
        assert_eq!(repository.select(&id).await.unwrap(), None);
    }
}
