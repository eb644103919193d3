//! Driving port for credential verification.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;

/// Identity facts established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identifier of the authenticated user.
    pub user_id: Uuid,
    /// Space-joined personal name for display.
    pub display_name: String,
    /// Whether the user may perform staff-only operations.
    pub is_staff: bool,
}

/// Driving port for credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify `password` against the stored digest for `email`.
    ///
    /// Fails with `unauthorized` for unknown addresses, archived accounts,
    /// and wrong passwords alike; the message never says which.
    async fn authenticate(&self, email: &str, password: &str)
    -> Result<AuthenticatedUser, Error>;
}

/// Fixture login accepting a single staff identity.
///
/// `admin@example.com` / `password` authenticates as staff; everything else
/// is rejected. Only for wiring and handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Email accepted by the fixture.
    pub const EMAIL: &'static str = "admin@example.com";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, Error> {
        if email == Self::EMAIL && password == Self::PASSWORD {
            Ok(AuthenticatedUser {
                user_id: Uuid::new_v4(),
                display_name: "Fixture Admin".to_owned(),
                is_staff: true,
            })
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_accepts_only_its_credentials() {
        let service = FixtureLoginService;
        let user = service
            .authenticate(FixtureLoginService::EMAIL, FixtureLoginService::PASSWORD)
            .await
            .expect("fixture credentials accepted");
        assert!(user.is_staff);

        let err = service
            .authenticate(FixtureLoginService::EMAIL, "wrong")
            .await
            .expect_err("wrong password rejected");
        assert_eq!(err.code, crate::domain::ErrorCode::Unauthorized);
    }
}
