//! Tag service

use recipe_core::{DomainError, Id};
use tracing::instrument;

use crate::dto::TagResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Read-only tag lookups
pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All tags ordered by name
    #[instrument(skip(self))]
    pub async fn list_tags(&self) -> ServiceResult<Vec<TagResponse>> {
        let tags = self.ctx.tag_repo().list_all().await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tag(&self, tag_id: Id) -> ServiceResult<TagResponse> {
        self.ctx
            .tag_repo()
            .find_by_id(tag_id)
            .await?
            .map(TagResponse::from)
            .ok_or_else(|| DomainError::TagNotFound(tag_id).into())
    }
}
