//! Article service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::ArticleRepository;
use crate::models::{Article, ListParams, PagedResult};

/// Read-side article service for the public surface
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// Get a published article by ID
    pub async fn get(&self, id: i64) -> Result<Option<Article>> {
        self.repo.get_published(id).await
    }

    /// List published articles in a category, newest first
    pub async fn list_by_category(
        &self,
        category_id: i64,
        params: ListParams,
    ) -> Result<PagedResult<Article>> {
        let (articles, total) = self
            .repo
            .list_published_by_category(category_id, &params)
            .await?;
        Ok(PagedResult::new(articles, total, &params))
    }
}
