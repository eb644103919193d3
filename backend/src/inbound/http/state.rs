//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, CourseCommand, CourseQuery, EnrollmentCommand,
    EnrollmentQuery, LoginService, StudentCommand, StudentQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential verification.
    pub login: Arc<dyn LoginService>,
    /// Category mutations.
    pub categories: Arc<dyn CategoryCommand>,
    /// Category reads.
    pub categories_query: Arc<dyn CategoryQuery>,
    /// Course mutations.
    pub courses: Arc<dyn CourseCommand>,
    /// Course reads.
    pub courses_query: Arc<dyn CourseQuery>,
    /// Student registration.
    pub students: Arc<dyn StudentCommand>,
    /// Student reads.
    pub students_query: Arc<dyn StudentQuery>,
    /// Enrollment mutations.
    pub enrollments: Arc<dyn EnrollmentCommand>,
    /// Enrollment reads.
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification.
    pub login: Arc<dyn LoginService>,
    /// Category mutations.
    pub categories: Arc<dyn CategoryCommand>,
    /// Category reads.
    pub categories_query: Arc<dyn CategoryQuery>,
    /// Course mutations.
    pub courses: Arc<dyn CourseCommand>,
    /// Course reads.
    pub courses_query: Arc<dyn CourseQuery>,
    /// Student registration.
    pub students: Arc<dyn StudentCommand>,
    /// Student reads.
    pub students_query: Arc<dyn StudentQuery>,
    /// Enrollment mutations.
    pub enrollments: Arc<dyn EnrollmentCommand>,
    /// Enrollment reads.
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            categories,
            categories_query,
            courses,
            courses_query,
            students,
            students_query,
            enrollments,
            enrollments_query,
        } = ports;
        Self {
            login,
            categories,
            categories_query,
            courses,
            courses_query,
            students,
            students_query,
            enrollments,
            enrollments_query,
        }
    }

    /// State wired entirely with fixture ports, for tests and dry runs.
    pub fn fixtures() -> Self {
        use crate::domain::ports::{
            FixtureCategoryCommand, FixtureCategoryQuery, FixtureCourseCommand,
            FixtureCourseQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery,
            FixtureLoginService, FixtureStudentCommand, FixtureStudentQuery,
        };

        Self::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            categories: Arc::new(FixtureCategoryCommand),
            categories_query: Arc::new(FixtureCategoryQuery),
            courses: Arc::new(FixtureCourseCommand),
            courses_query: Arc::new(FixtureCourseQuery),
            students: Arc::new(FixtureStudentCommand),
            students_query: Arc::new(FixtureStudentQuery),
            enrollments: Arc::new(FixtureEnrollmentCommand),
            enrollments_query: Arc::new(FixtureEnrollmentQuery),
        })
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
