//! PostgreSQL-backed `StudentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::Lifecycle;
use crate::domain::credentials::PasswordDigest;
use crate::domain::identity::{EmailAddress, Student, StudentProfile, UserAccount};
use crate::domain::ports::{StudentRepository, StudentRepositoryError};

use super::error_mapping::{DbFailure, classify};
use super::lifecycle_from_label;
use super::models::{NewStudentRow, NewUserRow, StudentRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{students, users};

/// Diesel-backed implementation of the `StudentRepository` port.
///
/// User and student rows are written in one transaction; the partial unique
/// index on active emails backs the duplicate-email invariant.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StudentRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: &diesel::result::Error, email: &str) -> StudentRepositoryError {
    match classify(error) {
        DbFailure::UniqueViolation => StudentRepositoryError::duplicate_email(email),
        DbFailure::Connection(message) => StudentRepositoryError::connection(message),
        DbFailure::Other(message) => StudentRepositoryError::query(message),
    }
}

fn map_read_error(error: &diesel::result::Error) -> StudentRepositoryError {
    map_diesel_error(error, "")
}

fn row_to_user(row: UserRow) -> Result<UserAccount, StudentRepositoryError> {
    let email = EmailAddress::parse(&row.email)
        .map_err(|err| StudentRepositoryError::query(format!("corrupt email column: {err}")))?;
    Ok(UserAccount {
        id: row.id,
        email,
        first_name: row.first_name,
        last_name: row.last_name,
        password_digest: PasswordDigest::from_stored(row.password_digest),
        is_staff: row.is_staff,
        lifecycle: lifecycle_from_label(&row.lifecycle, "user", row.id),
    })
}

fn row_to_student(row: StudentRow) -> Student {
    Student {
        id: row.id,
        user_id: row.user_id,
        lifecycle: lifecycle_from_label(&row.lifecycle, "student", row.id),
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn create(
        &self,
        user: &UserAccount,
        student: &Student,
    ) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_row = NewUserRow {
            id: user.id,
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            password_digest: user.password_digest.as_str(),
            is_staff: user.is_staff,
            lifecycle: user.lifecycle.as_str(),
        };
        let student_row = NewStudentRow {
            id: student.id,
            user_id: student.user_id,
            lifecycle: student.lifecycle.as_str(),
        };

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(students::table)
                    .values(&student_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(&err, user.email.as_str()))
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // `active` sorts before `archived`, so an active row wins when both
        // carry the address.
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .order(users::lifecycle.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        row.map(row_to_user).transpose()
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .filter(students::id.eq(id))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        Ok(row.map(row_to_student))
    }

    async fn list_active(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(StudentRow, UserRow)> = students::table
            .inner_join(users::table)
            .filter(students::lifecycle.eq(Lifecycle::Active.as_str()))
            .select((StudentRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        rows.into_iter()
            .map(|(student_row, user_row)| {
                Ok(StudentProfile {
                    student: row_to_student(student_row),
                    user: row_to_user(user_row)?,
                })
            })
            .collect()
    }
}
