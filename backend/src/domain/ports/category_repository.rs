//! Port for category persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::Category;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
        /// The backing unique constraint on the name fired.
        DuplicateName { name: String } =>
            "category name already exists: {name}",
    }
}

/// Port for category storage and retrieval.
///
/// The category name is unique across both hierarchy tiers. Adapters must
/// back that invariant with a database unique constraint and surface its
/// violation as [`CategoryRepositoryError::DuplicateName`]; the service's
/// pre-check exists only for a friendlier common case and loses races.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch a category of either tier by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Fetch the active category with exactly this name, if any.
    async fn find_active_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Persist a new category.
    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError>;

    /// Archive a category; returns `false` when no such category exists.
    async fn archive(&self, id: Uuid) -> Result<bool, CategoryRepositoryError>;

    /// All active categories across both tiers, unordered.
    async fn list_active(&self) -> Result<Vec<Category>, CategoryRepositoryError>;
}

/// Fixture implementation for wiring without a real database.
///
/// Lookups return `None`, listings are empty, and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryRepository;

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(None)
    }

    async fn find_active_by_name(
        &self,
        _name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _category: &Category) -> Result<(), CategoryRepositoryError> {
        Ok(())
    }

    async fn archive(&self, _id: Uuid) -> Result<bool, CategoryRepositoryError> {
        Ok(true)
    }

    async fn list_active(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(Vec::new())
    }
}
