//! Category service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::CategoryRepository;
use crate::models::Category;

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Category>> {
        self.repo.get_by_id(id).await
    }
}
