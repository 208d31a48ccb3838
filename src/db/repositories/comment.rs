//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{Comment, CommentRefType, CreateCommentInput};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment and return it with its assigned ID
    async fn create(&self, input: CreateCommentInput) -> Result<Comment>;

    /// List comments on one reference, oldest first
    async fn list_by_ref(&self, ref_type: CommentRefType, ref_id: i64) -> Result<Vec<Comment>>;
}

pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: CreateCommentInput) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (ref_type, ref_id, user_id, username, user_image, content, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(input.ref_type.as_str())
        .bind(input.ref_id)
        .bind(input.user_id)
        .bind(&input.username)
        .bind(&input.user_image)
        .bind(&input.content)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            ref_type: input.ref_type,
            ref_id: input.ref_id,
            user_id: input.user_id,
            username: input.username,
            user_image: input.user_image,
            content: input.content,
            created_at: now,
        })
    }

    async fn list_by_ref(&self, ref_type: CommentRefType, ref_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, ref_type, ref_id, user_id, username, user_image, content, created_at \
             FROM comments WHERE ref_type = ? AND ref_id = ? ORDER BY created_at, id",
        )
        .bind(ref_type.as_str())
        .bind(ref_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        rows.iter()
            .map(|r| {
                let ref_type_str: String = r.get("ref_type");
                let ref_type = CommentRefType::parse(&ref_type_str)
                    .ok_or_else(|| anyhow::anyhow!("Unknown comment ref type: {}", ref_type_str))?;
                Ok(Comment {
                    id: r.get("id"),
                    ref_type,
                    ref_id: r.get("ref_id"),
                    user_id: r.get("user_id"),
                    username: r.get("username"),
                    user_image: r.get("user_image"),
                    content: r.get("content"),
                    created_at: r.get("created_at"),
                })
            })
            .collect()
    }
}
