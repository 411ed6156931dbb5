use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    author::repository::{
        AuthorRecordInsert, AuthorRecordOwned, AuthorRecordUpdate, AuthorRepository,
    },
    error::CatalogResult,
    model::author::AuthorId,
};

/// In-memory implementation of the author repository.
#[derive(Debug)]
pub struct MemoryAuthorRepository {
    authors: Arc<RwLock<Vec<AuthorRecordOwned>>>,
}

impl Default for MemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthorRepository {
    /// Creates a new empty memory repository.
    pub fn new() -> Self {
        Self {
            authors: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new memory repository with initial data.
    ///
    /// # Arguments
    ///
    /// * `authors` - Initial list of authors to populate the repository, kept in the given order
    pub fn with_data(authors: Vec<AuthorRecordOwned>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(authors)),
        }
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> CatalogResult<()> {
        self.authors.write().await.push(AuthorRecordOwned {
            id: record.id,
            name: record.name,
        });
        Ok(())
    }

    async fn update(&self, update: AuthorRecordUpdate<'_>) -> CatalogResult<bool> {
        let mut authors = self.authors.write().await;
        if let Some(author) = authors.iter_mut().find(|author| &author.id == update.id) {
            if let Some(name) = update.name {
                author.name = name.to_string();
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: &AuthorId) -> CatalogResult<Option<AuthorRecordOwned>> {
        let mut authors = self.authors.write().await;
        let position = authors
            .iter()
            .find_position(|author| &author.id == id)
            .map(|(index, _)| index);
        Ok(position.map(|index| authors.remove(index)))
    }

    async fn select(&self, id: &AuthorId) -> CatalogResult<Option<AuthorRecordOwned>> {
        let authors = self.authors.read().await;
        Ok(authors.iter().find(|author| &author.id == id).cloned())
    }

    async fn select_by_name(&self, name: &str) -> CatalogResult<Option<AuthorRecordOwned>> {
        let authors = self.authors.read().await;
        Ok(authors.iter().find(|author| author.name == name).cloned())
    }

    async fn select_all(&self) -> CatalogResult<Vec<AuthorRecordOwned>> {
        Ok(self.authors.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> AuthorRecordOwned {
        AuthorRecordOwned {
            id: id.into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let repository = MemoryAuthorRepository::with_data(vec![record("2", "B")]);
        repository
            .insert(AuthorRecordInsert {
                id: "1".into(),
                name: "A".into(),
            })
            .await
            .unwrap();

        let names: Vec<_> = repository
            .select_all()
            .await
            .unwrap()
            .into_iter()
            .map(|author| author.name)
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repository = MemoryAuthorRepository::with_data(vec![record("1", "A"), record("2", "B")]);
        let id = AuthorId::new(1);

        assert!(
            repository
                .update(AuthorRecordUpdate {
                    id: &id,
                    name: Some("C"),
                })
                .await
                .unwrap()
        );
        assert_eq!(
            repository.select_by_name("C").await.unwrap(),
            Some(record("1", "C"))
        );

        assert_eq!(repository.delete(&id).await.unwrap(), Some(record("1", "C")));
        assert_eq!(repository.delete(&id).await.unwrap(), None);
        assert!(
            !repository
                .update(AuthorRecordUpdate {
                    id: &id,
                    name: Some("D"),
                })
                .await
                .unwrap()
        );
        assert_eq!(repository.select_all().await.unwrap(), [record("2", "B")]);
    }
}
