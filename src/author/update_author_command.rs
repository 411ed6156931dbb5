use tracing::{info, warn};

use crate::{
    author::repository::{AuthorRecordUpdate, AuthorRepositoryArc},
    error::{CatalogError, CatalogResult},
    model::author::{AuthorId, AuthorModel},
};

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommandInput<'a> {
    pub id: &'a AuthorId,
    pub name: &'a str,
}

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommandOutput {
    pub author: AuthorModel,
}

impl UpdateAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        UpdateAuthorCommand { author_repository }
    }

    /// Renames an author.
    ///
    /// The uniqueness check covers every author, the edited one included, so
    /// renaming an author to its current name fails with
    /// [`CatalogError::DuplicateName`].
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: UpdateAuthorCommandInput<'_>,
    ) -> CatalogResult<UpdateAuthorCommandOutput> {
        let mut updated_author: AuthorModel = self
            .author_repository
            .select(input.id)
            .await?
            .ok_or_else(|| CatalogError::AuthorNotFound {
                id: input.id.clone(),
            })?
            .into();

        let name = input.name;
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidName);
        }

        if self.author_repository.select_by_name(name).await?.is_some() {
            warn!(author_id = %input.id, name = %name, "Author name already taken");
            return Err(CatalogError::DuplicateName {
                name: name.to_string(),
            });
        }

        let record = AuthorRecordUpdate {
            id: input.id,
            name: Some(name),
        };
        if !self.author_repository.update(record).await? {
            return Err(CatalogError::AuthorNotFound {
                id: input.id.clone(),
            });
        }
        updated_author.name = name.to_string();

        info!(author_id = %input.id, name = %name, "Renamed author");

        Ok(UpdateAuthorCommandOutput {
            author: updated_author,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::author::repository::{AuthorRecordOwned, memory::MemoryAuthorRepository};

    fn command() -> UpdateAuthorCommand {
        UpdateAuthorCommand::new(Arc::new(MemoryAuthorRepository::with_data(vec![
            AuthorRecordOwned {
                id: "1".into(),
                name: "A".into(),
            },
            AuthorRecordOwned {
                id: "2".into(),
                name: "B".into(),
            },
        ])))
    }

    #[tokio::test]
    async fn it_works() {
        let command = command();
        let id = AuthorId::new(1);
        let output = command
            .execute(UpdateAuthorCommandInput { id: &id, name: "C" })
            .await
            .unwrap();
        assert_eq!(
            output.author,
            AuthorModel {
                id: id.clone(),
                name: "C".into()
            }
        );

        // Only the exact value collides.
        let output = command
            .execute(UpdateAuthorCommandInput { id: &id, name: "B " })
            .await
            .unwrap();
        assert_eq!(output.author.name, "B ");
    }

    #[tokio::test]
    async fn errors() {
        let command = command();
        let id = AuthorId::new(1);
        assert_eq!(
            command
                .execute(UpdateAuthorCommandInput { id: &id, name: "B" })
                .await
                .unwrap_err(),
            CatalogError::DuplicateName { name: "B".into() }
        );
        assert_eq!(
            command
                .execute(UpdateAuthorCommandInput { id: &id, name: "A" })
                .await
                .unwrap_err(),
            CatalogError::DuplicateName { name: "A".into() }
        );
        assert_eq!(
            command
                .execute(UpdateAuthorCommandInput { id: &id, name: "" })
                .await
                .unwrap_err(),
            CatalogError::InvalidName
        );
        assert_eq!(
            command
                .execute(UpdateAuthorCommandInput { id: &id, name: " \t" })
                .await
                .unwrap_err(),
            CatalogError::InvalidName
        );

        let missing = AuthorId::new(9);
        assert_eq!(
            command
                .execute(UpdateAuthorCommandInput {
                    id: &missing,
                    name: "Z"
                })
                .await
                .unwrap_err(),
            CatalogError::AuthorNotFound { id: missing }
        );
    }
}
