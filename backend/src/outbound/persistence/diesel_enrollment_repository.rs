//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Lifecycle;
use crate::domain::enrollment::StudentEnrollment;
use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};

use super::error_mapping::{DbFailure, classify};
use super::lifecycle_from_label;
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::enrollments;

/// Diesel-backed implementation of the `EnrollmentRepository` port.
///
/// The insert relies on two database-side guarantees: the partial unique
/// index on active (student, course) pairs decides concurrent duplicates,
/// and the `enrolled_at` column default stamps the commit time. The insert
/// returns the stored row so callers observe exactly what was persisted.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EnrollmentRepositoryError::connection(message)
        }
    }
}

fn map_insert_error(
    error: &diesel::result::Error,
    student_id: Uuid,
    course_id: Uuid,
) -> EnrollmentRepositoryError {
    match classify(error) {
        DbFailure::UniqueViolation => {
            EnrollmentRepositoryError::duplicate_pair(student_id, course_id)
        }
        DbFailure::Connection(message) => EnrollmentRepositoryError::connection(message),
        DbFailure::Other(message) => EnrollmentRepositoryError::query(message),
    }
}

fn map_read_error(error: &diesel::result::Error) -> EnrollmentRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => EnrollmentRepositoryError::connection(message),
        DbFailure::UniqueViolation | DbFailure::Other(_) => {
            EnrollmentRepositoryError::query("database error")
        }
    }
}

fn row_to_enrollment(row: EnrollmentRow) -> StudentEnrollment {
    StudentEnrollment {
        id: row.id,
        student_id: row.student_id,
        course_id: row.course_id,
        enrolled_at: row.enrolled_at,
        lifecycle: lifecycle_from_label(&row.lifecycle, "enrollment", row.id),
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<StudentEnrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEnrollmentRow {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            lifecycle: Lifecycle::Active.as_str(),
        };

        let row: EnrollmentRow = diesel::insert_into(enrollments::table)
            .values(&new_row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(&err, student_id, course_id))?;

        Ok(row_to_enrollment(row))
    }

    async fn exists_active(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            enrollments::table
                .filter(enrollments::student_id.eq(student_id))
                .filter(enrollments::course_id.eq(course_id))
                .filter(enrollments::lifecycle.eq(Lifecycle::Active.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_read_error(&err))
    }

    async fn list_active(&self) -> Result<Vec<StudentEnrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::lifecycle.eq(Lifecycle::Active.as_str()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        Ok(rows.into_iter().map(row_to_enrollment).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violations_map_to_duplicate_pair() {
        let student_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );

        assert_eq!(
            map_insert_error(&err, student_id, course_id),
            EnrollmentRepositoryError::duplicate_pair(student_id, course_id)
        );
    }

    #[rstest]
    fn read_errors_never_surface_as_duplicates() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert!(matches!(
            map_read_error(&err),
            EnrollmentRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn rows_round_trip_to_the_domain() {
        let row = EnrollmentRow {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            enrolled_at: Utc::now(),
            lifecycle: "active".to_owned(),
        };
        let enrollment = row_to_enrollment(row.clone());
        assert_eq!(enrollment.id, row.id);
        assert_eq!(enrollment.enrolled_at, row.enrolled_at);
        assert!(enrollment.lifecycle.is_active());
    }
}
