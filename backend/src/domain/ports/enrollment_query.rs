//! Driving port for enrollment reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::enrollment::StudentEnrollment;

/// Driving port for enrollment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// All non-archived enrollments.
    async fn list(&self) -> Result<Vec<StudentEnrollment>, Error>;
}

/// Fixture implementation returning no enrollments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentQuery;

#[async_trait]
impl EnrollmentQuery for FixtureEnrollmentQuery {
    async fn list(&self) -> Result<Vec<StudentEnrollment>, Error> {
        Ok(Vec::new())
    }
}
