//! Driving port for category mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalog::Category;

/// Input for creating a category.
///
/// A missing `parent_id` creates a root category; a present one creates a
/// subcategory under that root. The referenced parent must itself be a root
/// category, otherwise the operation fails with `excessive_depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    /// Display name; must be unique across all categories.
    pub name: String,
    /// Identifier of the parent root category, when creating a subcategory.
    pub parent_id: Option<Uuid>,
}

/// Driving port for category mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    /// Validate and persist a new category.
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category, Error>;

    /// Archive a category, leaving its references intact.
    async fn archive(&self, id: Uuid) -> Result<(), Error>;
}

/// Fixture implementation echoing requests back as root categories.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryCommand;

#[async_trait]
impl CategoryCommand for FixtureCategoryCommand {
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category, Error> {
        Category::new_root(request.name)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn archive(&self, _id: Uuid) -> Result<(), Error> {
        Ok(())
    }
}
