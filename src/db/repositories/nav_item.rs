//! Navigation item repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::NavItem;

#[async_trait]
pub trait NavItemRepository: Send + Sync {
    /// List visible navigation entries in display order
    async fn list_visible(&self) -> Result<Vec<NavItem>>;
}

pub struct SqlxNavItemRepository {
    pool: SqlitePool,
}

impl SqlxNavItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn NavItemRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NavItemRepository for SqlxNavItemRepository {
    async fn list_visible(&self) -> Result<Vec<NavItem>> {
        let rows = sqlx::query(
            "SELECT id, title, url, open_new_tab, sort_order, visible \
             FROM nav_items WHERE visible = 1 ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list navigation items")?;

        Ok(rows
            .iter()
            .map(|r| NavItem {
                id: r.get("id"),
                title: r.get("title"),
                url: r.get("url"),
                open_new_tab: r.get("open_new_tab"),
                sort_order: r.get("sort_order"),
                visible: r.get("visible"),
            })
            .collect())
    }
}
