//! OpenAPI document assembled from the annotated handlers.

use utoipa::OpenApi;

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::categories::{
    CategoryChildResponse, CategoryRequest, CategoryResponse, CategoryTreeNodeResponse,
};
use crate::inbound::http::courses::{
    ContentItemRequest, ContentItemResponse, CourseContentResponse, CourseRequest,
    CourseResponse, QuizAnswerRequest, QuizAnswerResponse, QuizQuestionRequest,
    QuizQuestionResponse, QuizRequest, QuizResponse,
};
use crate::inbound::http::enrollments::{EnrollmentRequest, EnrollmentResponse};
use crate::inbound::http::students::{RegistrationResponse, StudentRequest, StudentResponse};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::list_category_children,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::archive_category,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course_content,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::publish_course,
        crate::inbound::http::courses::unpublish_course,
        crate::inbound::http::courses::add_course_video,
        crate::inbound::http::courses::add_course_document,
        crate::inbound::http::courses::add_course_quiz,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::register_student,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::enroll_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        LoginResponse,
        CategoryRequest,
        CategoryResponse,
        CategoryTreeNodeResponse,
        CategoryChildResponse,
        CourseRequest,
        CourseResponse,
        ContentItemRequest,
        ContentItemResponse,
        QuizRequest,
        QuizQuestionRequest,
        QuizAnswerRequest,
        QuizResponse,
        QuizQuestionResponse,
        QuizAnswerResponse,
        CourseContentResponse,
        StudentRequest,
        StudentResponse,
        RegistrationResponse,
        EnrollmentRequest,
        EnrollmentResponse,
    )),
    tags(
        (name = "users", description = "Authentication"),
        (name = "categories", description = "Two-level category hierarchy"),
        (name = "courses", description = "Courses, content items, and quizzes"),
        (name = "students", description = "Student registration"),
        (name = "enrollments", description = "Enrollment tracking"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_the_catalog_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/categories"));
        assert!(doc.paths.paths.contains_key("/api/v1/enrollments"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
