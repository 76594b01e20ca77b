//! User service
//!
//! Handles registration, profiles and password changes.

use recipe_common::auth::{hash_password, validate_password_strength, verify_password};
use recipe_core::entities::{NewUser, User};
use recipe_core::traits::{Page, PageRequest};
use recipe_core::{DomainError, Id};
use tracing::{info, instrument, warn};

use crate::dto::{RegisterRequest, RegisteredUserResponse, SetPasswordRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Render a user for the requester, resolving `is_subscribed`
pub(crate) async fn user_view(
    ctx: &ServiceContext,
    viewer: Option<Id>,
    user: &User,
) -> ServiceResult<UserResponse> {
    let is_subscribed = match viewer {
        Some(viewer_id) if viewer_id != user.id => {
            ctx.follow_repo().exists(viewer_id, user.id).await?
        }
        _ => false,
    };
    Ok(UserResponse::new(user, is_subscribed))
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisteredUserResponse> {
        validate_password_strength(&request.password, &request.username, &request.email)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let new_user = NewUser {
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
        };
        // A concurrent registration that slips past the checks hits the
        // unique indexes and maps to the same conflict errors
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        Ok(RegisteredUserResponse::from(&user))
    }

    /// List users in id order
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        viewer: Option<Id>,
        page: PageRequest,
    ) -> ServiceResult<Page<UserResponse>> {
        let users = self.ctx.user_repo().list(page).await?;

        let mut items = Vec::with_capacity(users.items.len());
        for user in &users.items {
            items.push(user_view(self.ctx, viewer, user).await?);
        }
        Ok(Page::new(items, users.total))
    }

    /// Get one user
    #[instrument(skip(self))]
    pub async fn get_user(&self, viewer: Option<Id>, user_id: Id) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        user_view(self.ctx, viewer, &user).await
    }

    /// Get the authenticated user
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Id) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::new(&user, false))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Id) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Change the password after checking the current one
    #[instrument(skip(self, request))]
    pub async fn set_password(&self, user_id: Id, request: SetPasswordRequest) -> ServiceResult<()> {
        let user = self.get_user_entity(user_id).await?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(&request.current_password, &current_hash)? {
            warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(DomainError::IncorrectPassword.into());
        }

        validate_password_strength(&request.new_password, &user.username, &user.email)?;

        let new_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{test_context, InMemoryStore};
    use crate::services::{ServiceError, SubscriptionService};

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_duplicates() {
        let store = InMemoryStore::new();
        let ctx = test_context(&store);
        let service = UserService::new(&ctx);

        let created = service
            .register(register_request("ada", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(created.username, "ada");

        let err = service
            .register(register_request("other", "ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::EmailAlreadyExists)));
        assert_eq!(err.status_code(), 400);

        let err = service
            .register(register_request("ada", "new@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::UsernameAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let store = InMemoryStore::new();
        let ctx = test_context(&store);

        let mut request = register_request("ada", "ada@example.com");
        request.password = "12345678".to_string();
        let err = UserService::new(&ctx).register(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_set_password_checks_current() {
        let store = InMemoryStore::new();
        let ctx = test_context(&store);
        let hash = hash_password("old-password").unwrap();
        let user = store.insert_user("ada", &hash);
        let service = UserService::new(&ctx);

        let err = service
            .set_password(
                user.id,
                SetPasswordRequest {
                    current_password: "wrong-password".to_string(),
                    new_password: "brand-new-pass".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::IncorrectPassword)));
        assert_eq!(err.status_code(), 400);

        service
            .set_password(
                user.id,
                SetPasswordRequest {
                    current_password: "old-password".to_string(),
                    new_password: "brand-new-pass".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = ctx.user_repo().get_password_hash(user.id).await.unwrap().unwrap();
        assert!(verify_password("brand-new-pass", &stored).unwrap());
    }

    #[tokio::test]
    async fn test_is_subscribed_follows_viewer() {
        let store = InMemoryStore::new();
        let ctx = test_context(&store);
        let reader = store.insert_user("reader", "x");
        let author = store.insert_user("author", "x");
        SubscriptionService::new(&ctx)
            .subscribe(reader.id, author.id, None)
            .await
            .unwrap();

        let service = UserService::new(&ctx);
        assert!(service.get_user(Some(reader.id), author.id).await.unwrap().is_subscribed);
        assert!(!service.get_user(None, author.id).await.unwrap().is_subscribed);
        assert!(!service.get_user(Some(author.id), reader.id).await.unwrap().is_subscribed);

        let err = service.get_user(None, Id::new(999)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
