//! Entity lifecycle state.
//!
//! Domain entities are never physically deleted. Instead every entity carries
//! a [`Lifecycle`] that is either `Active` or `Archived`. Archived entities
//! drop out of active listings while their references stay intact, so
//! archiving a category leaves its subcategories and courses resolvable.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Two-state lifecycle replacing a pair of independent boolean flags.
///
/// Representing the state as a single enum makes the contradictory
/// `active + archived` combination unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// The entity participates in listings and business operations.
    #[default]
    Active,
    /// The entity is retired; it is excluded from active listings.
    Archived,
}

impl Lifecycle {
    /// Whether the entity should appear in active listings.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Stable lowercase label, also used as the persisted representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
