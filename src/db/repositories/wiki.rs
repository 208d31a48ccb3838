//! Wiki repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{Wiki, WikiPage};

#[async_trait]
pub trait WikiRepository: Send + Sync {
    /// Get a wiki root by ID
    async fn get_wiki(&self, id: i64) -> Result<Option<Wiki>>;

    /// Get a single wiki page by ID
    async fn get_page(&self, id: i64) -> Result<Option<WikiPage>>;

    /// List every page of a wiki, ordered for tree assembly
    async fn list_pages(&self, wiki_id: i64) -> Result<Vec<WikiPage>>;
}

pub struct SqlxWikiRepository {
    pool: SqlitePool,
}

impl SqlxWikiRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn WikiRepository> {
        Arc::new(Self::new(pool))
    }
}

const PAGE_COLUMNS: &str =
    "id, wiki_id, parent_id, title, content, display_order, created_at, updated_at";

#[async_trait]
impl WikiRepository for SqlxWikiRepository {
    async fn get_wiki(&self, id: i64) -> Result<Option<Wiki>> {
        let row = sqlx::query(
            "SELECT id, name, description, content, created_at, updated_at FROM wikis WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get wiki")?;

        Ok(row.map(|r| Wiki {
            id: r.get("id"),
            name: r.get("name"),
            description: r.get("description"),
            content: r.get("content"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    async fn get_page(&self, id: i64) -> Result<Option<WikiPage>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM wiki_pages WHERE id = ?",
            PAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get wiki page")?;
        Ok(row.map(|r| row_to_page(&r)))
    }

    async fn list_pages(&self, wiki_id: i64) -> Result<Vec<WikiPage>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM wiki_pages WHERE wiki_id = ? ORDER BY display_order, id",
            PAGE_COLUMNS
        ))
        .bind(wiki_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list wiki pages")?;
        Ok(rows.iter().map(row_to_page).collect())
    }
}

fn row_to_page(row: &sqlx::sqlite::SqliteRow) -> WikiPage {
    WikiPage {
        id: row.get("id"),
        wiki_id: row.get("wiki_id"),
        parent_id: row.get("parent_id"),
        title: row.get("title"),
        content: row.get("content"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
