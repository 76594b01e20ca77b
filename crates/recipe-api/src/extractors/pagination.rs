//! Pagination extractor
//!
//! Extracts page-number pagination from the query string and remembers the
//! request path so `next`/`previous` links can be rebuilt.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    Json,
};
use recipe_common::AppError;
use recipe_core::{Page, PageRequest};
use recipe_service::dto::PaginatedResponse;
use serde::Deserialize;

use crate::response::{ApiError, ApiResult};

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Validated pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination {
    pub request: PageRequest,
    path: String,
    query: Option<String>,
}

impl Pagination {
    pub fn new(params: PaginationParams, path: impl Into<String>, query: Option<String>) -> Self {
        Self {
            request: PageRequest::new(params.page, params.limit),
            path: path.into(),
            query,
        }
    }

    /// Number of the last page; an empty collection still has page 1
    fn last_page(&self, total: i64) -> i64 {
        let limit = i64::from(self.request.limit);
        ((total + limit - 1) / limit).max(1)
    }

    /// Link to another page with every other query parameter kept
    fn link(&self, page: i64) -> String {
        let mut pairs: Vec<&str> = self
            .query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("page"))
            .collect();
        let page = format!("page={page}");
        pairs.push(&page);

        format!("{}?{}", self.path, pairs.join("&"))
    }

    /// Wrap one page of results in the paginated envelope
    ///
    /// # Errors
    /// `InvalidPage` when the requested page lies past the last one.
    pub fn respond<T>(&self, page: Page<T>) -> ApiResult<Json<PaginatedResponse<T>>> {
        let current = i64::from(self.request.page);
        let last = self.last_page(page.total);
        if current > last {
            return Err(ApiError::App(AppError::InvalidPage));
        }

        let next = (current < last).then(|| self.link(current + 1));
        let previous = (current > 1).then(|| self.link(current - 1));

        Ok(Json(PaginatedResponse::new(page.items, page.total, next, previous)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Pagination::new(
            params,
            parts.uri.path(),
            parts.uri.query().map(str::to_string),
        ))
    }
}
