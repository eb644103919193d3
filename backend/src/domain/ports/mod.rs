//! Domain ports.
//!
//! Driving ports (command/query traits) are implemented by the domain
//! services and consumed by inbound adapters; driven ports (repositories and
//! the notifier) are implemented by outbound adapters. Every port ships a
//! `Fixture*` implementation for wiring and handler tests, and a mockall
//! mock under `cfg(test)`.

mod macros;

pub mod category_command;
pub mod category_query;
pub mod category_repository;
pub mod course_command;
pub mod course_query;
pub mod course_repository;
pub mod enrollment_command;
pub mod enrollment_query;
pub mod enrollment_repository;
pub mod login_service;
pub mod notifier;
pub mod student_command;
pub mod student_query;
pub mod student_repository;

pub use category_command::{CategoryCommand, CreateCategoryRequest, FixtureCategoryCommand};
pub use category_query::{CategoryChild, CategoryQuery, CategoryTreeNode, FixtureCategoryQuery};
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, FixtureCategoryRepository,
};
pub use course_command::{
    AttachContentRequest, CourseCommand, CreateCourseRequest, CreateQuizRequest,
    FixtureCourseCommand,
};
pub use course_query::{CourseQuery, FixtureCourseQuery};
pub use course_repository::{
    CourseContent, CourseRepository, CourseRepositoryError, FixtureCourseRepository,
};
pub use enrollment_command::{EnrollRequest, EnrollmentCommand, FixtureEnrollmentCommand};
pub use enrollment_query::{EnrollmentQuery, FixtureEnrollmentQuery};
pub use enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError, FixtureEnrollmentRepository,
};
pub use login_service::{AuthenticatedUser, FixtureLoginService, LoginService};
pub use notifier::{FixtureNotifier, Notifier, NotifierError};
pub use student_command::{
    FixtureStudentCommand, RegisterStudentRequest, RegistrationOutcome, StudentCommand,
};
pub use student_query::{FixtureStudentQuery, StudentQuery};
pub use student_repository::{
    FixtureStudentRepository, StudentRepository, StudentRepositoryError,
};

#[cfg(test)]
pub use category_command::MockCategoryCommand;
#[cfg(test)]
pub use category_query::MockCategoryQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use course_command::MockCourseCommand;
#[cfg(test)]
pub use course_query::MockCourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use notifier::MockNotifier;
#[cfg(test)]
pub use student_command::MockStudentCommand;
#[cfg(test)]
pub use student_query::MockStudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
