//! Settings service
//!
//! Loads the website settings bundle, merging stored values over
//! compiled-in defaults so a freshly installed site renders sensibly
//! with an empty settings table.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::SettingsRepository;

/// Known setting keys
pub mod keys {
    pub const SITE_NAME: &str = "site_name";
    pub const SITE_DESCRIPTION: &str = "site_description";
    pub const SITE_KEYWORDS: &str = "site_keywords";
    pub const CUSTOM_HEADER: &str = "custom_header";
    pub const CUSTOM_FOOTER: &str = "custom_footer";
    pub const ARTICLES_PER_PAGE: &str = "articles_per_page";
}

/// Website settings bundle handed to every theme render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteSettings {
    pub name: String,
    pub description: String,
    pub keywords: String,
    pub custom_header: String,
    pub custom_footer: String,
    pub articles_per_page: u32,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            name: "My Website".to_string(),
            description: "Powered by quillpress".to_string(),
            keywords: String::new(),
            custom_header: String::new(),
            custom_footer: String::new(),
            articles_per_page: 10,
        }
    }
}

/// Settings service errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(String),
}

/// Settings service for the website settings bundle
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Get the website settings with defaults merged in
    pub async fn get_website_settings(&self) -> Result<WebsiteSettings, SettingsError> {
        let wanted = &[
            keys::SITE_NAME,
            keys::SITE_DESCRIPTION,
            keys::SITE_KEYWORDS,
            keys::CUSTOM_HEADER,
            keys::CUSTOM_FOOTER,
            keys::ARTICLES_PER_PAGE,
        ];

        let stored = self
            .repo
            .get_many(wanted)
            .await
            .map_err(|e| SettingsError::Load(e.to_string()))?;

        let defaults = WebsiteSettings::default();

        Ok(WebsiteSettings {
            name: stored
                .get(keys::SITE_NAME)
                .cloned()
                .unwrap_or(defaults.name),
            description: stored
                .get(keys::SITE_DESCRIPTION)
                .cloned()
                .unwrap_or(defaults.description),
            keywords: stored
                .get(keys::SITE_KEYWORDS)
                .cloned()
                .unwrap_or(defaults.keywords),
            custom_header: stored
                .get(keys::CUSTOM_HEADER)
                .cloned()
                .unwrap_or(defaults.custom_header),
            custom_footer: stored
                .get(keys::CUSTOM_FOOTER)
                .cloned()
                .unwrap_or(defaults.custom_footer),
            articles_per_page: stored
                .get(keys::ARTICLES_PER_PAGE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.articles_per_page),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeSettingsRepo {
        stored: HashMap<String, String>,
    }

    #[async_trait]
    impl SettingsRepository for FakeSettingsRepo {
        async fn get_many(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
            Ok(keys
                .iter()
                .filter_map(|k| self.stored.get(*k).map(|v| (k.to_string(), v.clone())))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_empty_table_yields_defaults() {
        let service = SettingsService::new(Arc::new(FakeSettingsRepo {
            stored: HashMap::new(),
        }));
        let settings = service.get_website_settings().await.unwrap();
        assert_eq!(settings.name, "My Website");
        assert_eq!(settings.articles_per_page, 10);
    }

    #[tokio::test]
    async fn test_stored_values_override_defaults() {
        let mut stored = HashMap::new();
        stored.insert(keys::SITE_NAME.to_string(), "Example".to_string());
        stored.insert(keys::ARTICLES_PER_PAGE.to_string(), "25".to_string());

        let service = SettingsService::new(Arc::new(FakeSettingsRepo { stored }));
        let settings = service.get_website_settings().await.unwrap();
        assert_eq!(settings.name, "Example");
        assert_eq!(settings.articles_per_page, 25);
        // Untouched keys still default
        assert_eq!(settings.description, "Powered by quillpress");
    }

    #[tokio::test]
    async fn test_unparseable_page_size_falls_back() {
        let mut stored = HashMap::new();
        stored.insert(keys::ARTICLES_PER_PAGE.to_string(), "lots".to_string());

        let service = SettingsService::new(Arc::new(FakeSettingsRepo { stored }));
        let settings = service.get_website_settings().await.unwrap();
        assert_eq!(settings.articles_per_page, 10);
    }
}
