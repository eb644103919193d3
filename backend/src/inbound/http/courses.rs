//! Course HTTP handlers.
//!
//! ```text
//! GET  /api/v1/courses
//! POST /api/v1/courses
//! GET  /api/v1/courses/{id}/content
//! POST /api/v1/courses/{id}/publish
//! POST /api/v1/courses/{id}/unpublish
//! POST /api/v1/courses/{id}/videos
//! POST /api/v1/courses/{id}/documents
//! POST /api/v1/courses/{id}/quizzes
//! ```
//!
//! Listings are public; mutations require a staff session. Content uploads
//! carry only the declared file name and size; blob storage is handled by a
//! separate collaborator.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalog::{
    Course, CourseDocument, CourseVideo, QuestionDraft, QuizDraft, QuizWithQuestions,
};
use crate::domain::ports::{
    AttachContentRequest, CourseContent, CreateCourseRequest, CreateQuizRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for creating a course.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    /// Course title, unique among active courses.
    pub title: Option<String>,
    /// Detailed course description.
    pub description: Option<String>,
    /// Non-negative price in minor currency units.
    pub price_minor_units: Option<i64>,
    /// Identifier of the owning category.
    pub category_id: Option<Uuid>,
}

/// Response payload for a course.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Identifier of the course.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Detailed course description.
    pub description: String,
    /// Price in minor currency units.
    pub price_minor_units: i64,
    /// Identifier of the owning category.
    pub category_id: String,
    /// Whether students may enroll.
    pub is_published: bool,
    /// Lifecycle label.
    pub lifecycle: String,
}

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            price_minor_units: value.price.minor_units(),
            category_id: value.category_id.to_string(),
            is_published: value.is_published,
            lifecycle: value.lifecycle.to_string(),
        }
    }
}

/// Request payload for attaching a video or document.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemRequest {
    /// Display title of the content item.
    pub title: Option<String>,
    /// Declared file name, extension included.
    pub file_name: Option<String>,
    /// Declared file size in bytes.
    pub file_size: Option<i64>,
    /// Explicit display position; defaults to 0.
    pub order: Option<i32>,
}

/// Response payload for a content item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemResponse {
    /// Identifier of the content item.
    pub id: String,
    /// Identifier of the owning course.
    pub course_id: String,
    /// Display title.
    pub title: String,
    /// Declared file name.
    pub file_name: String,
    /// Declared file size in bytes.
    pub file_size: i64,
    /// Display position.
    pub order: i32,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<CourseVideo> for ContentItemResponse {
    fn from(value: CourseVideo) -> Self {
        Self {
            id: value.id.to_string(),
            course_id: value.course_id.to_string(),
            title: value.title,
            file_name: value.file_name,
            file_size: value.file_size,
            order: value.order,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

impl From<CourseDocument> for ContentItemResponse {
    fn from(value: CourseDocument) -> Self {
        Self {
            id: value.id.to_string(),
            course_id: value.course_id.to_string(),
            title: value.title,
            file_name: value.file_name,
            file_size: value.file_size,
            order: value.order,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a quiz.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    /// Quiz title.
    pub title: Option<String>,
    /// Questions with their answer options.
    #[serde(default)]
    pub questions: Vec<QuizQuestionRequest>,
}

/// A question within a quiz request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionRequest {
    /// Question body.
    pub text: String,
    /// Answer options.
    #[serde(default)]
    pub answers: Vec<QuizAnswerRequest>,
}

/// An answer option within a quiz request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswerRequest {
    /// Answer option text.
    pub text: String,
    /// Whether this option is the correct one.
    #[serde(default)]
    pub is_correct: bool,
}

/// Response payload for a quiz with its containment chain.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    /// Identifier of the quiz.
    pub id: String,
    /// Identifier of the owning course.
    pub course_id: String,
    /// Quiz title.
    pub title: String,
    /// Questions with their answers.
    pub questions: Vec<QuizQuestionResponse>,
}

/// A question within a quiz response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionResponse {
    /// Identifier of the question.
    pub id: String,
    /// Question body.
    pub text: String,
    /// Answer options.
    pub answers: Vec<QuizAnswerResponse>,
}

/// An answer option within a quiz response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswerResponse {
    /// Identifier of the answer.
    pub id: String,
    /// Answer option text.
    pub text: String,
    /// Whether this option is the correct one.
    pub is_correct: bool,
}

impl From<QuizWithQuestions> for QuizResponse {
    fn from(value: QuizWithQuestions) -> Self {
        Self {
            id: value.quiz.id.to_string(),
            course_id: value.quiz.course_id.to_string(),
            title: value.quiz.title,
            questions: value
                .questions
                .into_iter()
                .map(|entry| QuizQuestionResponse {
                    id: entry.question.id.to_string(),
                    text: entry.question.text,
                    answers: entry
                        .answers
                        .into_iter()
                        .map(|answer| QuizAnswerResponse {
                            id: answer.id.to_string(),
                            text: answer.text,
                            is_correct: answer.is_correct,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Response payload for a course's content in display order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseContentResponse {
    /// Videos in display order.
    pub videos: Vec<ContentItemResponse>,
    /// Documents in display order.
    pub documents: Vec<ContentItemResponse>,
    /// Quizzes with their containment chains.
    pub quizzes: Vec<QuizResponse>,
}

impl From<CourseContent> for CourseContentResponse {
    fn from(value: CourseContent) -> Self {
        Self {
            videos: value.videos.into_iter().map(Into::into).collect(),
            documents: value.documents.into_iter().map(Into::into).collect(),
            quizzes: value.quizzes.into_iter().map(Into::into).collect(),
        }
    }
}

fn quiz_draft(payload: QuizRequest) -> Result<QuizDraft, Error> {
    let title = require_field(payload.title, "title")?;
    Ok(QuizDraft {
        title,
        questions: payload
            .questions
            .into_iter()
            .map(|question| QuestionDraft {
                text: question.text,
                answers: question
                    .answers
                    .into_iter()
                    .map(|answer| crate::domain::catalog::AnswerDraft {
                        text: answer.text,
                        is_correct: answer.is_correct,
                    })
                    .collect(),
            })
            .collect(),
    })
}

fn attach_request(course_id: Uuid, payload: ContentItemRequest) -> Result<AttachContentRequest, Error> {
    Ok(AttachContentRequest {
        course_id,
        title: require_field(payload.title, "title")?,
        file_name: require_field(payload.file_name, "fileName")?,
        file_size: require_field(payload.file_size, "fileSize")?,
        order: payload.order,
    })
}

/// List active courses.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Active courses", body = [CourseResponse]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state.courses_query.list().await?;
    Ok(web::Json(courses.into_iter().map(Into::into).collect()))
}

/// Fetch a course's content in display order.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/content",
    params(("id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course content", body = CourseContentResponse),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourseContent"
)]
#[get("/courses/{id}/content")]
pub async fn get_course_content(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CourseContentResponse>> {
    let content = state.courses_query.content(path.into_inner()).await?;
    Ok(web::Json(content.into()))
}

/// Create a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Category not found", body = Error),
        (status = 409, description = "Duplicate title", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let payload = payload.into_inner();

    let course = state
        .courses
        .create(CreateCourseRequest {
            title: require_field(payload.title, "title")?,
            description: require_field(payload.description, "description")?,
            price_minor_units: require_field(payload.price_minor_units, "priceMinorUnits")?,
            category_id: require_field(payload.category_id, "categoryId")?,
        })
        .await?;

    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Publish a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/publish",
    params(("id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course published"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "publishCourse"
)]
#[post("/courses/{id}/publish")]
pub async fn publish_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    state.courses.set_published(path.into_inner(), true).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Unpublish a course (staff only). Existing enrollments stay intact.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/unpublish",
    params(("id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course unpublished"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "unpublishCourse"
)]
#[post("/courses/{id}/unpublish")]
pub async fn unpublish_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    state.courses.set_published(path.into_inner(), false).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attach a video to a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/videos",
    params(("id" = Uuid, Path, description = "Course identifier")),
    request_body = ContentItemRequest,
    responses(
        (status = 201, description = "Video attached", body = ContentItemResponse),
        (status = 400, description = "Invalid upload", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "addCourseVideo"
)]
#[post("/courses/{id}/videos")]
pub async fn add_course_video(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<ContentItemRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let request = attach_request(path.into_inner(), payload.into_inner())?;
    let video = state.courses.add_video(request).await?;
    Ok(HttpResponse::Created().json(ContentItemResponse::from(video)))
}

/// Attach a document to a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/documents",
    params(("id" = Uuid, Path, description = "Course identifier")),
    request_body = ContentItemRequest,
    responses(
        (status = 201, description = "Document attached", body = ContentItemResponse),
        (status = 400, description = "Invalid upload", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "addCourseDocument"
)]
#[post("/courses/{id}/documents")]
pub async fn add_course_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<ContentItemRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let request = attach_request(path.into_inner(), payload.into_inner())?;
    let document = state.courses.add_document(request).await?;
    Ok(HttpResponse::Created().json(ContentItemResponse::from(document)))
}

/// Create a quiz under a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/quizzes",
    params(("id" = Uuid, Path, description = "Course identifier")),
    request_body = QuizRequest,
    responses(
        (status = 201, description = "Quiz created", body = QuizResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["courses"],
    operation_id = "addCourseQuiz"
)]
#[post("/courses/{id}/quizzes")]
pub async fn add_course_quiz(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<QuizRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let draft = quiz_draft(payload.into_inner())?;
    let quiz = state
        .courses
        .add_quiz(CreateQuizRequest {
            course_id: path.into_inner(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(QuizResponse::from(quiz)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureLoginService, MockCourseCommand};
    use crate::inbound::http::users::login;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    const MIB: i64 = 1024 * 1024;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(list_courses)
                    .service(get_course_content)
                    .service(create_course)
                    .service(publish_course)
                    .service(unpublish_course)
                    .service(add_course_video)
                    .service(add_course_document)
                    .service(add_course_quiz),
            )
    }

    async fn staff_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let login_req = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": FixtureLoginService::EMAIL,
                "password": FixtureLoginService::PASSWORD,
            }))
            .to_request();
        let login_res = actix_test::call_service(app, login_req).await;
        assert!(login_res.status().is_success());
        login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn listing_is_public() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/courses").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn staff_can_create_a_course() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;
        let cookie = staff_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .cookie(cookie)
                .set_json(json!({
                    "title": "Intro",
                    "description": "An introductory course.",
                    "priceMinorUnits": 4900,
                    "categoryId": Uuid::new_v4(),
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["title"], "Intro");
        assert_eq!(body["isPublished"], true);
    }

    #[actix_web::test]
    async fn create_without_session_is_unauthorised() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .set_json(json!({
                    "title": "Intro",
                    "description": "d",
                    "priceMinorUnits": 0,
                    "categoryId": Uuid::new_v4(),
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_body_fields_are_bad_requests() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;
        let cookie = staff_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .cookie(cookie)
                .set_json(json!({ "title": "Intro" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn invalid_uploads_surface_as_bad_requests() {
        let mut command = MockCourseCommand::new();
        command
            .expect_add_video()
            .times(1)
            .return_once(|_| Err(Error::invalid_upload("only .mp4 files are allowed")));
        let mut state = HttpState::fixtures();
        state.courses = Arc::new(command);
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = staff_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/videos", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({
                    "title": "Lesson 1",
                    "fileName": "lesson.mov",
                    "fileSize": MIB,
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_upload");
    }

    #[actix_web::test]
    async fn quiz_creation_round_trips_the_chain() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;
        let cookie = staff_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/quizzes", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({
                    "title": "Basics",
                    "questions": [{
                        "text": "What is 2 + 2?",
                        "answers": [
                            { "text": "4", "isCorrect": true },
                            { "text": "5" }
                        ]
                    }]
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["questions"][0]["answers"][0]["isCorrect"], true);
        assert_eq!(body["questions"][0]["answers"][1]["isCorrect"], false);
    }

    #[actix_web::test]
    async fn unpublish_returns_no_content() {
        let app = actix_test::init_service(test_app(HttpState::fixtures())).await;
        let cookie = staff_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/unpublish", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
