//! Driving port for enrollment mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::enrollment::StudentEnrollment;

/// Input for enrolling a student in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollRequest {
    /// Identifier of the student to enroll.
    pub student_id: Uuid,
    /// Identifier of the course to enroll in.
    pub course_id: Uuid,
}

/// Driving port for enrollment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll a student in a published, active course.
    ///
    /// Fails with `course_not_available` when the course is unpublished or
    /// archived, and with `duplicate_enrollment` when a non-archived
    /// enrollment for the pair already exists.
    async fn enroll(&self, request: EnrollRequest) -> Result<StudentEnrollment, Error>;
}

/// Fixture implementation accepting every enrollment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentCommand;

#[async_trait]
impl EnrollmentCommand for FixtureEnrollmentCommand {
    async fn enroll(&self, request: EnrollRequest) -> Result<StudentEnrollment, Error> {
        Ok(StudentEnrollment {
            id: Uuid::new_v4(),
            student_id: request.student_id,
            course_id: request.course_id,
            enrolled_at: chrono::Utc::now(),
            lifecycle: crate::domain::Lifecycle::Active,
        })
    }
}
