//! Wiki service
//!
//! Lookup of wiki roots and pages, and assembly of the ordered page
//! tree shown as a table of contents on wiki views.

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::WikiRepository;
use crate::models::{build_page_tree, Wiki, WikiPage, WikiPageNode};

pub struct WikiService {
    repo: Arc<dyn WikiRepository>,
}

impl WikiService {
    pub fn new(repo: Arc<dyn WikiRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_wiki(&self, id: i64) -> Result<Option<Wiki>> {
        self.repo.get_wiki(id).await
    }

    pub async fn get_page(&self, id: i64) -> Result<Option<WikiPage>> {
        self.repo.get_page(id).await
    }

    /// Build the ordered page tree of a wiki
    pub async fn get_tree(&self, wiki_id: i64) -> Result<Vec<WikiPageNode>> {
        let pages = self.repo.list_pages(wiki_id).await?;
        Ok(build_page_tree(pages))
    }
}
