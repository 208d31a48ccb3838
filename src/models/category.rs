//! Category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity grouping articles on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// URL-friendly slug
    pub slug: String,
    /// Category name
    pub name: String,
    /// Category description
    pub description: Option<String>,
    /// Sort order in listings
    pub sort_order: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
