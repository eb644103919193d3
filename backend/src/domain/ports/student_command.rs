//! Driving port for student registration.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::identity::StudentProfile;

/// Input for registering a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStudentRequest {
    /// Email address; unique among active users after normalisation.
    pub email: String,
    /// Given name; title-cased before persistence.
    pub first_name: String,
    /// Family name; title-cased before persistence.
    pub last_name: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// The persisted student with its user identity.
    pub profile: StudentProfile,
    /// Whether the credential notification was dispatched successfully.
    ///
    /// Registration is persisted first; a failed dispatch is reported here
    /// rather than rolling the student back.
    pub credentials_sent: bool,
}

/// Driving port for student registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Create a user with a generated password, its student record, and
    /// dispatch the credential notification.
    async fn register(
        &self,
        request: RegisterStudentRequest,
    ) -> Result<RegistrationOutcome, Error>;
}

/// Fixture implementation materialising registrations without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentCommand;

#[async_trait]
impl StudentCommand for FixtureStudentCommand {
    async fn register(
        &self,
        request: RegisterStudentRequest,
    ) -> Result<RegistrationOutcome, Error> {
        use crate::domain::credentials::PasswordDigest;
        use crate::domain::identity::{EmailAddress, Student, UserAccount, title_case_name};

        let email = EmailAddress::parse(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let first_name = title_case_name(&request.first_name, "firstName")
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let last_name = title_case_name(&request.last_name, "lastName")
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = UserAccount::new_student(
            email,
            first_name,
            last_name,
            PasswordDigest::derive("fixture"),
        );
        let student = Student::new(user.id);
        Ok(RegistrationOutcome {
            profile: StudentProfile { student, user },
            credentials_sent: true,
        })
    }
}
