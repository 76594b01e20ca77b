//! Subscription service
//!
//! Following authors and listing followed authors with recipe previews.

use recipe_core::entities::{Follow, User};
use recipe_core::traits::{Page, PageRequest};
use recipe_core::{DomainError, Id};
use tracing::{info, instrument};

use crate::dto::{ShortRecipeResponse, SubscriptionResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authors the user follows
    #[instrument(skip(self))]
    pub async fn list_subscriptions(
        &self,
        user_id: Id,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<Page<SubscriptionResponse>> {
        let authors = self.ctx.follow_repo().list_authors(user_id, page).await?;

        let mut items = Vec::with_capacity(authors.items.len());
        for author in &authors.items {
            items.push(self.subscription_view(author, recipes_limit).await?);
        }
        Ok(Page::new(items, authors.total))
    }

    /// Follow an author
    ///
    /// # Errors
    /// - `UserNotFound` if the author does not exist
    /// - `CannotSubscribeToSelf` when following oneself
    /// - `AlreadySubscribed` if the follow already exists
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        user_id: Id,
        author_id: Id,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<SubscriptionResponse> {
        let author = self.find_author(author_id).await?;

        let follow = Follow::new(user_id, author.id)?;
        if self.ctx.follow_repo().exists(user_id, author.id).await? {
            return Err(DomainError::AlreadySubscribed(author.id).into());
        }
        self.ctx.follow_repo().create(&follow).await?;

        info!(user_id = %user_id, author_id = %author.id, "Subscribed to author");
        self.subscription_view(&author, recipes_limit).await
    }

    /// Stop following an author
    ///
    /// # Errors
    /// - `UserNotFound` if the author does not exist
    /// - `NotSubscribed` if there is no such follow
    #[instrument(skip(self))]
    pub async fn unsubscribe(&self, user_id: Id, author_id: Id) -> ServiceResult<()> {
        let author = self.find_author(author_id).await?;

        if !self.ctx.follow_repo().exists(user_id, author.id).await? {
            return Err(DomainError::NotSubscribed(author.id).into());
        }
        // Lost a race with a concurrent unsubscribe
        if !self.ctx.follow_repo().delete(user_id, author.id).await? {
            return Err(DomainError::NotSubscribed(author.id).into());
        }

        info!(user_id = %user_id, author_id = %author.id, "Unsubscribed from author");
        Ok(())
    }

    async fn find_author(&self, author_id: Id) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(author_id).into())
    }

    /// Followed author as seen by their follower
    async fn subscription_view(
        &self,
        author: &User,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<SubscriptionResponse> {
        let recipes = self
            .ctx
            .recipe_repo()
            .find_by_author(author.id, recipes_limit.map(i64::from))
            .await?;
        let recipes_count = self.ctx.recipe_repo().count_by_author(author.id).await?;

        let storage = self.ctx.image_storage();
        Ok(SubscriptionResponse {
            user: UserResponse::new(author, true),
            recipes: recipes
                .iter()
                .map(|r| ShortRecipeResponse::new(r, storage.url(&r.image)))
                .collect(),
            recipes_count,
        })
    }
}
