//! User identity and student entities.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::Lifecycle;
use crate::domain::credentials::PasswordDigest;

/// Validation failures for identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// The email address is empty or structurally invalid.
    #[error("email address is not valid")]
    InvalidEmail,
    /// A name field is empty once trimmed.
    #[error("{field} must not be empty")]
    EmptyName {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A normalised email address.
///
/// Normalisation trims surrounding whitespace and lowercases the domain
/// part; the local part keeps its case. Uniqueness checks and lookups always
/// operate on the normalised form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalise a raw email address.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        let trimmed = raw.as_ref().trim();
        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(IdentityValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(IdentityValidationError::InvalidEmail);
        }
        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    /// The normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim a personal name and title-case each whitespace-separated word.
pub fn title_case_name(
    raw: &str,
    field: &'static str,
) -> Result<String, IdentityValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentityValidationError::EmptyName { field });
    }
    let cased = trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(cased)
}

/// A user identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique identifier.
    pub id: Uuid,
    /// Normalised email address, unique among active users.
    pub email: EmailAddress,
    /// Given name, title-cased.
    pub first_name: String,
    /// Family name, title-cased.
    pub last_name: String,
    /// Salted digest of the account password.
    pub password_digest: PasswordDigest,
    /// Whether the user may perform staff-only operations.
    pub is_staff: bool,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

impl UserAccount {
    /// Build a new active, non-staff account for a student.
    pub fn new_student(
        email: EmailAddress,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_digest: PasswordDigest,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            first_name: first_name.into(),
            last_name: last_name.into(),
            password_digest,
            is_staff: false,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Space-joined personal name for display.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student record, one-to-one with a [`UserAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the linked user account.
    pub user_id: Uuid,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

impl Student {
    /// Build a new active student linked to `user_id`.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            lifecycle: Lifecycle::Active,
        }
    }
}

/// A student joined with its user identity, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    /// The student record.
    pub student: Student,
    /// The linked user identity.
    pub user: UserAccount,
}
