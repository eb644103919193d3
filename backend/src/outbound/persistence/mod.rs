//! PostgreSQL persistence adapters.
//!
//! Each `Diesel*Repository` implements one driven port on top of a shared
//! async connection pool. Row structs live in [`models`], table definitions
//! in [`schema`], and Diesel error classification in `error_mapping`.

mod diesel_category_repository;
mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_student_repository;
mod error_mapping;
pub mod models;
pub mod pool;
pub mod schema;

use tracing::warn;
use uuid::Uuid;

use crate::domain::Lifecycle;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{DbPool, PoolError, PoolSettings};

/// Decode a persisted lifecycle label, defaulting unknown values to active.
///
/// Unknown labels indicate drift between code and schema; they are logged
/// rather than turned into request failures.
pub(crate) fn lifecycle_from_label(label: &str, entity: &str, id: Uuid) -> Lifecycle {
    match label {
        "archived" => Lifecycle::Archived,
        "active" => Lifecycle::Active,
        other => {
            warn!(value = other, entity, %id, "unrecognised lifecycle label, defaulting to active");
            Lifecycle::Active
        }
    }
}
