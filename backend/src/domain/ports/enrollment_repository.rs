//! Port for enrollment persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enrollment::StudentEnrollment;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
        /// The unique constraint on the (student, course) pair fired.
        DuplicatePair { student_id: Uuid, course_id: Uuid } =>
            "student {student_id} is already enrolled in course {course_id}",
    }
}

/// Port for enrollment storage.
///
/// The (student, course) pair is unique among non-archived enrollments and
/// must be backed by a database unique constraint: the service's existence
/// pre-check alone is a race under concurrent requests. Adapters surface the
/// constraint violation as [`EnrollmentRepositoryError::DuplicatePair`], and
/// assign `enrolled_at` at commit time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert an enrollment, returning the persisted record with its
    /// commit-time `enrolled_at`.
    async fn insert(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<StudentEnrollment, EnrollmentRepositoryError>;

    /// Whether a non-archived enrollment exists for the pair.
    async fn exists_active(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// All non-archived enrollments, unordered.
    async fn list_active(&self) -> Result<Vec<StudentEnrollment>, EnrollmentRepositoryError>;
}

/// Fixture implementation for wiring without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn insert(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<StudentEnrollment, EnrollmentRepositoryError> {
        Ok(StudentEnrollment {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            enrolled_at: chrono::Utc::now(),
            lifecycle: crate::domain::Lifecycle::Active,
        })
    }

    async fn exists_active(
        &self,
        _student_id: Uuid,
        _course_id: Uuid,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(false)
    }

    async fn list_active(&self) -> Result<Vec<StudentEnrollment>, EnrollmentRepositoryError> {
        Ok(Vec::new())
    }
}
