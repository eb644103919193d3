//! Course aggregate root.

use serde::Serialize;
use uuid::Uuid;

use super::validation::{CatalogValidationError, validate_body, validate_text};
use crate::domain::Lifecycle;

/// Course price in minor currency units (cents).
///
/// Prices are stored as integers to keep arithmetic exact; the invariant is
/// simply non-negativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Validate and wrap an amount of minor units.
    pub fn from_minor_units(minor_units: i64) -> Result<Self, CatalogValidationError> {
        if minor_units < 0 {
            return Err(CatalogValidationError::Negative { field: "price" });
        }
        Ok(Self(minor_units))
    }

    /// Amount in minor units.
    pub fn minor_units(self) -> i64 {
        self.0
    }
}

/// A course owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier.
    pub id: Uuid,
    /// Course title, unique among active courses.
    pub title: String,
    /// Detailed course description.
    pub description: String,
    /// Non-negative price.
    pub price: Price,
    /// Identifier of the owning category.
    pub category_id: Uuid,
    /// Whether students may enroll.
    pub is_published: bool,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

impl Course {
    /// Validate and build a new course.
    ///
    /// New courses start published, matching the catalog's default of making
    /// courses available as soon as they are created.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        category_id: Uuid,
    ) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: validate_text(title, "title")?,
            description: validate_body(description, "description")?,
            price,
            category_id,
            is_published: true,
            lifecycle: Lifecycle::Active,
        })
    }

    /// Whether the course can accept enrollments.
    pub fn is_available(&self) -> bool {
        self.is_published && self.lifecycle.is_active()
    }
}
