use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::CatalogResult,
    model::author::{AuthorId, AuthorModel},
};

pub mod memory;

#[derive(Debug)]
pub struct AuthorRecordInsert {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecordOwned {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug)]
pub struct AuthorRecordUpdate<'a> {
    pub id: &'a AuthorId,
    pub name: Option<&'a str>,
}

/// Author storage.
///
/// Implementations keep records in insertion order.
#[async_trait]
pub trait AuthorRepository: Debug {
    async fn insert(&self, record: AuthorRecordInsert) -> CatalogResult<()>;
    /// Returns `false` if no author has the given id.
    async fn update(&self, update: AuthorRecordUpdate<'_>) -> CatalogResult<bool>;
    /// Removes and returns the author, if present.
    async fn delete(&self, id: &AuthorId) -> CatalogResult<Option<AuthorRecordOwned>>;
    async fn select(&self, id: &AuthorId) -> CatalogResult<Option<AuthorRecordOwned>>;
    async fn select_by_name(&self, name: &str) -> CatalogResult<Option<AuthorRecordOwned>>;
    async fn select_all(&self) -> CatalogResult<Vec<AuthorRecordOwned>>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;

impl From<AuthorModel> for AuthorRecordOwned {
    fn from(author: AuthorModel) -> Self {
        AuthorRecordOwned {
            id: author.id,
            name: author.name,
        }
    }
}

impl From<AuthorRecordOwned> for AuthorModel {
    fn from(record: AuthorRecordOwned) -> Self {
        AuthorModel {
            id: record.id,
            name: record.name,
        }
    }
}
