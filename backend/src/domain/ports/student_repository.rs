//! Port for user-identity and student persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::identity::{Student, StudentProfile, UserAccount};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// The partial unique index on active emails fired.
        DuplicateEmail { email: String } =>
            "an active user with this email already exists: {email}",
    }
}

/// Port for student and user-identity storage.
///
/// Registration writes the user and student rows in a single transaction;
/// adapters must not leave a user without its student record. Email
/// uniqueness is scoped to non-archived users and backed by a partial unique
/// index, surfaced as [`StudentRepositoryError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a new user and its student record atomically.
    async fn create(
        &self,
        user: &UserAccount,
        student: &Student,
    ) -> Result<(), StudentRepositoryError>;

    /// Fetch the user with this normalised email.
    ///
    /// Prefers an active row when both an active and an archived user carry
    /// the address; callers decide how archived accounts are treated.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, StudentRepositoryError>;

    /// Fetch a student by id.
    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StudentRepositoryError>;

    /// All non-archived students joined with their user identities.
    async fn list_active(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError>;
}

/// Fixture implementation for wiring without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentRepository;

#[async_trait]
impl StudentRepository for FixtureStudentRepository {
    async fn create(
        &self,
        _user: &UserAccount,
        _student: &Student,
    ) -> Result<(), StudentRepositoryError> {
        Ok(())
    }

    async fn find_user_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<UserAccount>, StudentRepositoryError> {
        Ok(None)
    }

    async fn find_student(&self, _id: Uuid) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(None)
    }

    async fn list_active(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_lookups_return_none() {
        let repo = FixtureStudentRepository;
        assert!(
            repo.find_user_by_email("ada@example.com")
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(repo.find_student(Uuid::new_v4()).await.expect("lookup").is_none());
    }

    #[test]
    fn duplicate_email_error_mentions_the_address() {
        let err = StudentRepositoryError::duplicate_email("ada@example.com");
        assert!(err.to_string().contains("ada@example.com"));
    }
}
