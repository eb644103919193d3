//! Enrollment HTTP handlers.
//!
//! ```text
//! GET  /api/v1/enrollments
//! POST /api/v1/enrollments
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::enrollment::StudentEnrollment;
use crate::domain::ports::EnrollRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for enrolling a student.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    /// Identifier of the student to enroll.
    pub student_id: Option<Uuid>,
    /// Identifier of the course to enroll in.
    pub course_id: Option<Uuid>,
}

/// Response payload for an enrollment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// Identifier of the enrollment.
    pub id: String,
    /// Identifier of the enrolled student.
    pub student_id: String,
    /// Identifier of the enrolled course.
    pub course_id: String,
    /// Commit-time enrollment timestamp (RFC 3339).
    pub enrolled_at: String,
}

impl From<StudentEnrollment> for EnrollmentResponse {
    fn from(value: StudentEnrollment) -> Self {
        Self {
            id: value.id.to_string(),
            student_id: value.student_id.to_string(),
            course_id: value.course_id.to_string(),
            enrolled_at: value.enrolled_at.to_rfc3339(),
        }
    }
}

/// List non-archived enrollments.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    responses(
        (status = 200, description = "Enrollments", body = [EnrollmentResponse]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EnrollmentResponse>>> {
    let enrollments = state.enrollments_query.list().await?;
    Ok(web::Json(enrollments.into_iter().map(Into::into).collect()))
}

/// Enroll a student in a course (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    request_body = EnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Student or course not found", body = Error),
        (status = 409, description = "Duplicate enrollment or unavailable course", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "enrollStudent"
)]
#[post("/enrollments")]
pub async fn enroll_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EnrollmentRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let payload = payload.into_inner();

    let enrollment = state
        .enrollments
        .enroll(EnrollRequest {
            student_id: require_field(payload.student_id, "studentId")?,
            course_id: require_field(payload.course_id, "courseId")?,
        })
        .await?;

    Ok(HttpResponse::Created().json(EnrollmentResponse::from(enrollment)))
}
