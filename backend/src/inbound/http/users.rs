//! Login handler.
//!
//! ```text
//! POST /api/v1/login
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Login request payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    pub email: Option<String>,
    /// Account password.
    pub password: Option<String>,
}

/// Login response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Identifier of the authenticated user.
    pub user_id: String,
    /// Display name of the authenticated user.
    pub display_name: String,
    /// Whether the user may perform staff-only operations.
    pub is_staff: bool,
}

/// Verify credentials and establish a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let payload = payload.into_inner();
    let email = require_field(payload.email, "email")?;
    let password = require_field(payload.password, "password")?;

    let user = state.login.authenticate(&email, &password).await?;
    session.persist_login(&user)?;

    Ok(web::Json(LoginResponse {
        user_id: user.user_id.to_string(),
        display_name: user.display_name,
        is_staff: user.is_staff,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureLoginService;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::json;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixtures()))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(web::scope("/api/v1").service(login))
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": FixtureLoginService::EMAIL,
                "password": FixtureLoginService::PASSWORD,
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );

        let body: LoginResponse = actix_test::read_body_json(response).await;
        assert!(body.is_staff);
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": FixtureLoginService::EMAIL,
                "password": "wrong",
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_fields_are_bad_requests() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": FixtureLoginService::EMAIL }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
