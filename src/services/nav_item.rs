//! Navigation service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::NavItemRepository;
use crate::models::NavItem;

pub struct NavService {
    repo: Arc<dyn NavItemRepository>,
}

impl NavService {
    pub fn new(repo: Arc<dyn NavItemRepository>) -> Self {
        Self { repo }
    }

    /// The visible navigation entries, in display order
    pub async fn get_navigations(&self) -> Result<Vec<NavItem>> {
        self.repo.list_visible().await
    }
}
