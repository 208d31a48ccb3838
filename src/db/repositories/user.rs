//! User repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::models::{User, UserRole, UserStatus};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;
}

pub struct SqlxUserRepository {
    pool: SqlitePool,
}

impl SqlxUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, role, status, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user")?;

        Ok(row.map(|r| {
            let role_str: String = r.get("role");
            let status_str: String = r.get("status");
            User {
                id: r.get("id"),
                username: r.get("username"),
                email: r.get("email"),
                role: UserRole::from_str(&role_str).unwrap_or_default(),
                status: UserStatus::from_str(&status_str).unwrap_or_default(),
                created_at: r.get("created_at"),
            }
        }))
    }
}
