//! Driving port for category reads.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::Error;

/// A subcategory entry within a tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChild {
    /// Identifier of the subcategory.
    pub id: Uuid,
    /// Display name of the subcategory.
    pub name: String,
}

/// A root category with its direct children, as listed by [`CategoryQuery::tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    /// Identifier of the root category.
    pub id: Uuid,
    /// Display name of the root category.
    pub name: String,
    /// Whether the root has no active children.
    pub is_leaf: bool,
    /// Active subcategories sorted by name.
    pub children: Vec<CategoryChild>,
}

/// Driving port for category reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// Active root categories sorted by name, each with its active children
    /// sorted by name.
    async fn tree(&self) -> Result<Vec<CategoryTreeNode>, Error>;

    /// Direct active children of a root category, sorted by name.
    async fn children(&self, root_id: Uuid) -> Result<Vec<CategoryChild>, Error>;
}

/// Fixture implementation returning an empty catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryQuery;

#[async_trait]
impl CategoryQuery for FixtureCategoryQuery {
    async fn tree(&self) -> Result<Vec<CategoryTreeNode>, Error> {
        Ok(Vec::new())
    }

    async fn children(&self, _root_id: Uuid) -> Result<Vec<CategoryChild>, Error> {
        Ok(Vec::new())
    }
}
