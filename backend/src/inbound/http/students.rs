//! Student HTTP handlers.
//!
//! ```text
//! GET  /api/v1/students
//! POST /api/v1/students
//! ```
//!
//! Registration is staff-only: it creates the user identity with a generated
//! password, the student record, and dispatches the credential notification.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::identity::StudentProfile;
use crate::domain::ports::RegisterStudentRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for registering a student.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    /// Email address, unique among active users.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

/// Response payload for a student with its user identity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Identifier of the student.
    pub id: String,
    /// Normalised email address.
    pub email: String,
    /// Given name, title-cased.
    pub first_name: String,
    /// Family name, title-cased.
    pub last_name: String,
}

impl From<StudentProfile> for StudentResponse {
    fn from(value: StudentProfile) -> Self {
        Self {
            id: value.student.id.to_string(),
            email: value.user.email.to_string(),
            first_name: value.user.first_name,
            last_name: value.user.last_name,
        }
    }
}

/// Response payload for a completed registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// The registered student.
    pub student: StudentResponse,
    /// Whether the credential notification was dispatched.
    pub credentials_sent: bool,
}

/// List non-archived students.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students", body = [StudentResponse]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students_query.list().await?;
    Ok(web::Json(students.into_iter().map(Into::into).collect()))
}

/// Register a student (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student registered", body = RegistrationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 409, description = "Duplicate email", body = Error)
    ),
    tags = ["students"],
    operation_id = "registerStudent"
)]
#[post("/students")]
pub async fn register_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StudentRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let payload = payload.into_inner();

    let outcome = state
        .students
        .register(RegisterStudentRequest {
            email: require_field(payload.email, "email")?,
            first_name: require_field(payload.first_name, "firstName")?,
            last_name: require_field(payload.last_name, "lastName")?,
        })
        .await?;

    Ok(HttpResponse::Created().json(RegistrationResponse {
        student: outcome.profile.into(),
        credentials_sent: outcome.credentials_sent,
    }))
}
