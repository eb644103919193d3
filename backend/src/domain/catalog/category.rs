//! Category hierarchy entities.
//!
//! The catalog uses a strictly two-level hierarchy: root categories and one
//! layer of subcategories beneath them. Rather than a self-referencing tree
//! with a runtime depth check, the hierarchy is expressed as two distinct
//! shapes: a [`Subcategory`] carries a reference to its root, and nothing can
//! carry a reference to a subcategory, so a third level is unrepresentable.

use serde::Serialize;
use uuid::Uuid;

use super::validation::{CatalogValidationError, validate_text};
use crate::domain::Lifecycle;

/// Top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCategory {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name, unique across all categories.
    pub name: String,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

/// Second-level category attached to a [`RootCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name, unique across all categories.
    pub name: String,
    /// Identifier of the owning root category.
    pub root_id: Uuid,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

/// Either tier of the category hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Category {
    /// A top-level category.
    Root(RootCategory),
    /// A category nested under a root.
    Sub(Subcategory),
}

impl Category {
    /// Validate and build a new active root category.
    pub fn new_root(name: impl Into<String>) -> Result<Self, CatalogValidationError> {
        Ok(Self::Root(RootCategory {
            id: Uuid::new_v4(),
            name: validate_text(name, "name")?,
            lifecycle: Lifecycle::Active,
        }))
    }

    /// Validate and build a new active subcategory under `root_id`.
    pub fn new_sub(name: impl Into<String>, root_id: Uuid) -> Result<Self, CatalogValidationError> {
        Ok(Self::Sub(Subcategory {
            id: Uuid::new_v4(),
            name: validate_text(name, "name")?,
            root_id,
            lifecycle: Lifecycle::Active,
        }))
    }

    /// Unique identifier of the category.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Root(root) => root.id,
            Self::Sub(sub) => sub.id,
        }
    }

    /// Display name of the category.
    pub fn name(&self) -> &str {
        match self {
            Self::Root(root) => root.name.as_str(),
            Self::Sub(sub) => sub.name.as_str(),
        }
    }

    /// Lifecycle state of the category.
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            Self::Root(root) => root.lifecycle,
            Self::Sub(sub) => sub.lifecycle,
        }
    }

    /// Identifier of the owning root, when this is a subcategory.
    pub fn root_id(&self) -> Option<Uuid> {
        match self {
            Self::Root(_) => None,
            Self::Sub(sub) => Some(sub.root_id),
        }
    }

    /// Whether this category sits at the top level.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root(_))
    }
}
