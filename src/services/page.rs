//! Page service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::PageRepository;
use crate::models::Page;

pub struct PageService {
    repo: Arc<dyn PageRepository>,
}

impl PageService {
    pub fn new(repo: Arc<dyn PageRepository>) -> Self {
        Self { repo }
    }

    /// Look up a published page by its unique alias
    pub async fn get_by_alias(&self, alias: &str) -> Result<Option<Page>> {
        self.repo.get_published_by_alias(alias).await
    }
}
