//! Page repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::models::{Page, PageStatus};

#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Get a published page by its unique alias
    async fn get_published_by_alias(&self, alias: &str) -> Result<Option<Page>>;
}

pub struct SqlxPageRepository {
    pool: SqlitePool,
}

impl SqlxPageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn PageRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PageRepository for SqlxPageRepository {
    async fn get_published_by_alias(&self, alias: &str) -> Result<Option<Page>> {
        let row = sqlx::query(
            "SELECT id, alias, title, content, status, created_at, updated_at \
             FROM pages WHERE alias = ? AND status = 'published'",
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get page")?;

        Ok(row.map(|r| {
            let status_str: String = r.get("status");
            Page {
                id: r.get("id"),
                alias: r.get("alias"),
                title: r.get("title"),
                content: r.get("content"),
                status: PageStatus::from_str(&status_str).unwrap_or_default(),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            }
        }))
    }
}
