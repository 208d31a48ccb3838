//! Article repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{Article, ArticleStatus, ListParams};

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Get a published article by ID
    async fn get_published(&self, id: i64) -> Result<Option<Article>>;

    /// List published articles in a category, newest first.
    ///
    /// Returns the requested page of articles and the total count of
    /// published articles in the category.
    async fn list_published_by_category(
        &self,
        category_id: i64,
        params: &ListParams,
    ) -> Result<(Vec<Article>, i64)>;
}

pub struct SqlxArticleRepository {
    pool: SqlitePool,
}

impl SqlxArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

const ARTICLE_COLUMNS: &str = "id, slug, title, content, author_id, author_name, category_id, status, published_at, created_at, updated_at";

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn get_published(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM articles WHERE id = ? AND status = 'published'",
            ARTICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get article")?;
        row.map(|r| row_to_article(&r)).transpose()
    }

    async fn list_published_by_category(
        &self,
        category_id: i64,
        params: &ListParams,
    ) -> Result<(Vec<Article>, i64)> {
        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS count FROM articles WHERE category_id = ? AND status = 'published'",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count articles")?
        .get("count");

        let rows = sqlx::query(&format!(
            "SELECT {} FROM articles WHERE category_id = ? AND status = 'published' \
             ORDER BY published_at DESC, id DESC LIMIT ? OFFSET ?",
            ARTICLE_COLUMNS
        ))
        .bind(category_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list articles")?;

        let articles = rows.iter().map(row_to_article).collect::<Result<_>>()?;
        Ok((articles, total))
    }
}

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
    let status_str: String = row.get("status");
    Ok(Article {
        id: row.get("id"),
        slug: row.get("slug"),
        title: row.get("title"),
        content: row.get("content"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        category_id: row.get("category_id"),
        status: ArticleStatus::parse(&status_str).unwrap_or_default(),
        published_at: row.get("published_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
