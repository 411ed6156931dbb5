use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    author::repository::{AuthorRecordInsert, AuthorRepositoryArc},
    error::{CatalogError, CatalogResult},
    id::IdGenerator,
    model::author::{AuthorId, AuthorModel},
};

/// Command for creating new authors.
///
/// Rejects empty and already taken names, then appends the author under a fresh id.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    id_generator: Arc<Mutex<IdGenerator>>,
    author_repository: AuthorRepositoryArc,
}

/// Input data for creating an author.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandInput<'a> {
    /// Author name, stored exactly as given
    pub name: &'a str,
}

/// Output data from author creation.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandOutput {
    /// The created author model
    pub author: AuthorModel,
}

impl CreateAuthorCommand {
    /// Creates a new `CreateAuthorCommand`.
    ///
    /// # Arguments
    ///
    /// * `id_generator` - Generator for author ids
    /// * `author_repository` - Repository holding author data
    pub fn new(
        id_generator: Arc<Mutex<IdGenerator>>,
        author_repository: AuthorRepositoryArc,
    ) -> Self {
        Self {
            id_generator,
            author_repository,
        }
    }

    /// Executes the author creation command.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidName`] for an empty name and
    /// [`CatalogError::DuplicateName`] if an author already has the name.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreateAuthorCommandInput<'_>,
    ) -> CatalogResult<CreateAuthorCommandOutput> {
        info!(name = %input.name, "Creating author");

        let name = input.name;
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidName);
        }

        if self.author_repository.select_by_name(name).await?.is_some() {
            warn!(name = %name, "Author name already taken");
            return Err(CatalogError::DuplicateName {
                name: name.to_string(),
            });
        }

        let id = self
            .id_generator
            .lock()
            .await
            .generate()
            .map(AuthorId::new)
            .ok_or(CatalogError::IdsExhausted { kind: "author" })?;

        self.author_repository
            .insert(AuthorRecordInsert {
                id: id.clone(),
                name: name.to_string(),
            })
            .await?;

        let author_record = self
            .author_repository
            .select(&id)
            .await?
            .ok_or_else(|| CatalogError::AuthorNotFound { id: id.clone() })?;

        info!(author_id = %id, "Successfully created author");

        Ok(CreateAuthorCommandOutput {
            author: author_record.into(),
        })
    }
}
