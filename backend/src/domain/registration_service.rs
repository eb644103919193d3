//! Student registration and login service.
//!
//! Registration persists the user identity and student record first, then
//! dispatches the credential notification as a separate step. A failed
//! dispatch never rolls the registration back; it is logged and reported in
//! the outcome so staff can resend manually.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::credentials::{IssuedPassword, PasswordDigest};
use crate::domain::identity::{
    EmailAddress, IdentityValidationError, Student, StudentProfile, UserAccount, title_case_name,
};
use crate::domain::ports::{
    AuthenticatedUser, LoginService, Notifier, RegisterStudentRequest, RegistrationOutcome,
    StudentCommand, StudentQuery, StudentRepository, StudentRepositoryError,
};
use crate::domain::{Error, Lifecycle};

/// Subject line of the credential notification.
const CREDENTIALS_SUBJECT: &str = "Your Student Account";

/// Student registration service implementing the driving ports.
#[derive(Clone)]
pub struct RegistrationService<S, N> {
    students: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> RegistrationService<S, N> {
    /// Create a new service with the given repository and notifier.
    pub fn new(students: Arc<S>, notifier: Arc<N>) -> Self {
        Self { students, notifier }
    }
}

fn map_repo_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => duplicate_email_error(&email),
    }
}

fn duplicate_email_error(email: &str) -> Error {
    Error::duplicate_email("a user with this email already exists").with_details(json!({
        "field": "email",
        "value": email,
    }))
}

fn identity_error(err: &IdentityValidationError) -> Error {
    let field = match err {
        IdentityValidationError::InvalidEmail => "email",
        IdentityValidationError::EmptyName { field } => field,
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn credentials_body(first_name: &str, password: &str) -> String {
    format!(
        "Hello, {first_name}! Your account has been created. \
         You can now log in with your email address and the following password:\n\n\
         Password: {password}\n\n\
         Please change your password after logging in."
    )
}

#[async_trait]
impl<S, N> StudentCommand for RegistrationService<S, N>
where
    S: StudentRepository,
    N: Notifier,
{
    async fn register(
        &self,
        request: RegisterStudentRequest,
    ) -> Result<RegistrationOutcome, Error> {
        let email = EmailAddress::parse(&request.email).map_err(|err| identity_error(&err))?;
        let first_name =
            title_case_name(&request.first_name, "firstName").map_err(|err| identity_error(&err))?;
        let last_name =
            title_case_name(&request.last_name, "lastName").map_err(|err| identity_error(&err))?;

        // Friendly pre-check; the partial unique index decides under races.
        if self
            .students
            .find_user_by_email(email.as_str())
            .await
            .map_err(map_repo_error)?
            .is_some_and(|existing| existing.lifecycle.is_active())
        {
            return Err(duplicate_email_error(email.as_str()));
        }

        let password = IssuedPassword::generate();
        let user = UserAccount::new_student(
            email,
            first_name,
            last_name,
            PasswordDigest::derive(password.reveal()),
        );
        let student = Student::new(user.id);

        self.students
            .create(&user, &student)
            .await
            .map_err(map_repo_error)?;

        // Registration is committed; dispatch is best-effort from here.
        let body = credentials_body(&user.first_name, password.reveal());
        let credentials_sent = match self
            .notifier
            .send(user.email.as_str(), CREDENTIALS_SUBJECT, &body)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, email = %user.email, "credential notification failed");
                false
            }
        };

        Ok(RegistrationOutcome {
            profile: StudentProfile { student, user },
            credentials_sent,
        })
    }
}

#[async_trait]
impl<S, N> StudentQuery for RegistrationService<S, N>
where
    S: StudentRepository,
    N: Notifier,
{
    async fn list(&self) -> Result<Vec<StudentProfile>, Error> {
        self.students.list_active().await.map_err(map_repo_error)
    }
}

#[async_trait]
impl<S, N> LoginService for RegistrationService<S, N>
where
    S: StudentRepository,
    N: Notifier,
{
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, Error> {
        let invalid = || Error::unauthorized("invalid credentials");

        let normalized = EmailAddress::parse(email).map_err(|_| invalid())?;
        let user = self
            .students
            .find_user_by_email(normalized.as_str())
            .await
            .map_err(map_repo_error)?
            .ok_or_else(invalid)?;

        if user.lifecycle == Lifecycle::Archived || !user.password_digest.matches(password) {
            return Err(invalid());
        }

        Ok(AuthenticatedUser {
            user_id: user.id,
            display_name: user.display_name(),
            is_staff: user.is_staff,
        })
    }
}
