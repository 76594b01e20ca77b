//! Authentication extractor
//!
//! Validates the bearer token and its Redis session through `AuthService`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};
use recipe_core::Id;
use recipe_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Id,
    /// Session the token belongs to; logout revokes it
    pub session_id: String,
}

impl AuthUser {
    async fn from_bearer(state: &AppState, bearer: &Bearer) -> Result<Self, ApiError> {
        let authenticated = AuthService::new(state.service_context())
            .authenticate(bearer.token())
            .await?;

        Ok(Self {
            user_id: authenticated.user_id,
            session_id: authenticated.session_id,
        })
    }
}

fn header_rejection(rejection: &TypedHeaderRejection) -> ApiError {
    if rejection.is_missing() {
        ApiError::MissingAuth
    } else {
        tracing::warn!(error = %rejection, "Malformed authorization header");
        ApiError::InvalidToken
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| header_rejection(&e))?;

        let app_state = AppState::from_ref(state);
        AuthUser::from_bearer(&app_state, &bearer).await
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// Id of the requester, if any
    pub fn user_id(&self) -> Option<Id> {
        self.0.as_ref().map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let app_state = AppState::from_ref(state);
                let auth = AuthUser::from_bearer(&app_state, &bearer).await?;
                Ok(OptionalAuthUser(Some(auth)))
            }
            Err(e) if e.is_missing() => Ok(OptionalAuthUser(None)),
            Err(e) => Err(header_rejection(&e)),
        }
    }
}
