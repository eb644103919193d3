//! Enrollment entity linking students and courses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::Lifecycle;

/// An enrollment of a student in a course.
///
/// Exactly one non-archived enrollment may exist per (student, course) pair;
/// the pair is backed by a unique constraint in the store. `enrolled_at` is
/// assigned by the store at commit time and is never client-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollment {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the enrolled student.
    pub student_id: Uuid,
    /// Identifier of the course enrolled in.
    pub course_id: Uuid,
    /// Commit-time timestamp of the enrollment.
    pub enrolled_at: DateTime<Utc>,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}
