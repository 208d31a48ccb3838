//! Comment service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::CommentRepository;
use crate::models::{Comment, CommentRefType, CreateCommentInput, User};

pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Create a comment by `user` on the given reference.
    ///
    /// Callers are responsible for authorization and for resolving the
    /// reference before calling; this method only performs the write.
    pub async fn create(
        &self,
        ref_type: CommentRefType,
        ref_id: i64,
        user: &User,
        content: String,
    ) -> Result<Comment> {
        let input = CreateCommentInput::from_user(ref_type, ref_id, user, content);
        self.repo.create(input).await
    }

    /// List the comment thread on one reference, oldest first
    pub async fn list_for(&self, ref_type: CommentRefType, ref_id: i64) -> Result<Vec<Comment>> {
        self.repo.list_by_ref(ref_type, ref_id).await
    }
}
