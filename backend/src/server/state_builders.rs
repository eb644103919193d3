//! Assembly of the HTTP state from configuration.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{
    CategoryService, CourseService, EnrollmentService, RegistrationService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::notify::LogNotifier;
use crate::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselCourseRepository, DieselEnrollmentRepository,
    DieselStudentRepository,
};

use super::ServerConfig;

/// Wire the domain services onto database-backed adapters.
fn database_state(pool: &DbPool) -> HttpState {
    let categories_repo = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let courses_repo = Arc::new(DieselCourseRepository::new(pool.clone()));
    let students_repo = Arc::new(DieselStudentRepository::new(pool.clone()));
    let enrollments_repo = Arc::new(DieselEnrollmentRepository::new(pool.clone()));
    let notifier = Arc::new(LogNotifier);

    let category_service = Arc::new(CategoryService::new(categories_repo.clone()));
    let course_service = Arc::new(CourseService::new(
        courses_repo.clone(),
        categories_repo,
    ));
    let registration_service = Arc::new(RegistrationService::new(students_repo.clone(), notifier));
    let enrollment_service = Arc::new(EnrollmentService::new(
        enrollments_repo,
        courses_repo,
        students_repo,
    ));

    HttpState::new(HttpStatePorts {
        login: registration_service.clone(),
        categories: category_service.clone(),
        categories_query: category_service,
        courses: course_service.clone(),
        courses_query: course_service,
        students: registration_service.clone(),
        students_query: registration_service,
        enrollments: enrollment_service.clone(),
        enrollments_query: enrollment_service,
    })
}

/// Build the HTTP state for the configured environment.
///
/// A configured pool selects the Diesel adapters; otherwise every port falls
/// back to its fixture so the server still boots for smoke tests.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = config
        .db_pool
        .as_ref()
        .map_or_else(HttpState::fixtures, database_state);
    web::Data::new(state)
}
