//! Article model
//!
//! This module provides:
//! - `Article` entity representing a published piece of writing
//! - `ArticleStatus` enum for publication states
//! - Pagination types (`ListParams`, `PagedResult`, `PageInfo`) used by
//!   list queries and category listing pages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// URL-friendly slug
    pub slug: String,
    /// Article title
    pub title: String,
    /// Markdown content
    pub content: String,
    /// Author user ID
    pub author_id: i64,
    /// Author display name snapshot
    pub author_name: String,
    /// Category ID
    pub category_id: i64,
    /// Publication status
    pub status: ArticleStatus,
    /// Publication timestamp
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Article publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Draft - not visible to public
    Draft,
    /// Published - visible to public
    Published,
    /// Archived - hidden but not deleted
    Archived,
}

impl Default for ArticleStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ArticleStatus::Draft),
            "published" => Some(ArticleStatus::Published),
            "archived" => Some(ArticleStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters, clamping to sane bounds
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        ((self.page.saturating_sub(1)) * self.per_page) as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total as u32) + self.per_page - 1) / self.per_page
    }

    /// Summarize the pagination state for view models
    pub fn page_info(&self) -> PageInfo {
        let total_pages = self.total_pages();
        PageInfo {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

/// Pagination summary placed into view models under the `page` key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_offset() {
        assert_eq!(ListParams::new(1, 10).offset(), 0);
        assert_eq!(ListParams::new(2, 10).offset(), 10);
        assert_eq!(ListParams::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_list_params_clamped() {
        let params = ListParams::new(0, 0);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 1);
        assert_eq!(ListParams::new(1, 1000).per_page, 100);
    }

    #[test]
    fn test_page_info() {
        let params = ListParams::new(2, 10);
        let result = PagedResult::new(vec![0u8; 10], 30, &params);
        let info = result.page_info();
        assert_eq!(info.page, 2);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let params = ListParams::new(1, 10);
        assert_eq!(PagedResult::new(Vec::<u8>::new(), 31, &params).total_pages(), 4);
        assert_eq!(PagedResult::new(Vec::<u8>::new(), 30, &params).total_pages(), 3);
        assert_eq!(PagedResult::new(Vec::<u8>::new(), 0, &params).total_pages(), 0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ArticleStatus::parse("Published"), Some(ArticleStatus::Published));
        assert_eq!(ArticleStatus::parse("deleted"), None);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Offset never overlaps the previous page and limit matches per_page.
        #[test]
        fn offset_is_consistent(page in 1u32..1000, per_page in 1u32..100) {
            let params = ListParams::new(page, per_page);
            prop_assert_eq!(params.offset(), ((page - 1) * per_page) as i64);
            prop_assert_eq!(params.limit(), per_page as i64);
        }

        /// total_pages is the smallest page count that covers every item.
        #[test]
        fn total_pages_covers_total(total in 0i64..10_000, per_page in 1u32..100) {
            let params = ListParams::new(1, per_page);
            let result = PagedResult::new(Vec::<u8>::new(), total, &params);
            let pages = result.total_pages() as i64;
            prop_assert!(pages * per_page as i64 >= total);
            if pages > 0 {
                prop_assert!(((pages - 1) * per_page as i64) < total);
            }
        }
    }
}
