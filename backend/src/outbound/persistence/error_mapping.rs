//! Shared classification of Diesel errors.
//!
//! Each repository maps the classified failure onto its own port error so
//! unique-constraint violations surface as the domain's duplicate kinds.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Storage failure classes relevant to the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DbFailure {
    /// A unique constraint or index fired.
    UniqueViolation,
    /// The connection to the database broke.
    Connection(String),
    /// Any other query failure.
    Other(String),
}

/// Classify a Diesel error, logging its shape at debug level.
pub(super) fn classify(error: &DieselError) -> DbFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => DbFailure::UniqueViolation,
                DatabaseErrorKind::ClosedConnection => {
                    DbFailure::Connection("database connection closed".to_owned())
                }
                _ => DbFailure::Other("database error".to_owned()),
            }
        }
        DieselError::NotFound => DbFailure::Other("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            DbFailure::Other("database error".to_owned())
        }
    }
}
