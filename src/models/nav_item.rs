//! Navigation item model

use serde::{Deserialize, Serialize};

/// An entry in the site navigation bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub id: i64,
    /// Display label
    pub title: String,
    /// Link target (site-relative path or full URL)
    pub url: String,
    pub open_new_tab: bool,
    pub sort_order: i32,
    pub visible: bool,
}

impl NavItem {
    pub fn new(title: String, url: String) -> Self {
        Self {
            id: 0,
            title,
            url,
            open_new_tab: false,
            sort_order: 0,
            visible: true,
        }
    }
}
