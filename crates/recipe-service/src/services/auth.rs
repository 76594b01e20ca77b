//! Authentication service
//!
//! Handles token login, logout and per-request token authentication.

use recipe_cache::AuthSessionData;
use recipe_common::auth::verify_password;
use recipe_common::AppError;
use recipe_core::Id;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{LoginRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity resolved from a valid auth token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub user_id: Id,
    pub session_id: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password, opening a new session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let session_id = Uuid::new_v4().to_string();
        self.ctx
            .session_store()
            .create(&session_id, &AuthSessionData::new(user.id))
            .await?;

        let auth_token = self.ctx.jwt_service().issue(user.id, &session_id)?;

        info!(user_id = %user.id, "User logged in");
        Ok(TokenResponse { auth_token })
    }

    /// Revoke the session behind the current token
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, user_id: Id, session_id: &str) -> ServiceResult<()> {
        let revoked = self.ctx.session_store().revoke(session_id).await?;
        if !revoked {
            warn!(user_id = %user_id, "Logout for an already revoked session");
        }

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Validate a token and its live session
    ///
    /// A token whose session was revoked or expired is rejected even if its
    /// signature and `exp` are still valid.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Authenticated> {
        let claims = self.ctx.jwt_service().decode_token(token)?;
        let user_id = claims.user_id()?;

        let session = self
            .ctx
            .session_store()
            .get(claims.session_id())
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token rejected: session revoked or expired");
                ServiceError::App(AppError::InvalidToken)
            })?;

        if session.user_id != user_id {
            warn!(user_id = %user_id, "Token rejected: session belongs to another user");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        Ok(Authenticated {
            user_id,
            session_id: claims.session_id().to_string(),
        })
    }
}
