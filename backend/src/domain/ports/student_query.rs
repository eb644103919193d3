//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::identity::StudentProfile;

/// Driving port for student reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// All non-archived students with their user identities.
    async fn list(&self) -> Result<Vec<StudentProfile>, Error>;
}

/// Fixture implementation returning no students.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentQuery;

#[async_trait]
impl StudentQuery for FixtureStudentQuery {
    async fn list(&self) -> Result<Vec<StudentProfile>, Error> {
        Ok(Vec::new())
    }
}
