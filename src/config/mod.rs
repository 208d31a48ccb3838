//! Configuration management
//!
//! This module handles loading and parsing configuration for quillpress.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. The
//! `oauth2` table maps provider names (github, google, ...) to client
//! credentials; the list of provider names is derived once at startup
//! and injected into the router state as an immutable value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// OAuth2 sign-in providers, keyed by provider name.
    /// BTreeMap keeps the derived provider list in a stable order.
    #[serde(default)]
    pub oauth2: BTreeMap<String, OAuth2ProviderConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration (SQLite)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/quillpress.db".to_string()
}

/// Theme configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Active theme name
    #[serde(default = "default_theme")]
    pub active: String,
    /// Path to themes directory
    #[serde(default = "default_theme_path")]
    pub path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            active: default_theme(),
            path: default_theme_path(),
        }
    }
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_theme_path() -> PathBuf {
    PathBuf::from("themes")
}

/// Credentials for one external OAuth2 sign-in provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI registered with the provider
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// If the file doesn't exist or is empty, returns defaults. Invalid
    /// YAML is an error with line/column context.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Environment variables follow the pattern:
    /// - QUILLPRESS_SERVER_HOST
    /// - QUILLPRESS_SERVER_PORT
    /// - QUILLPRESS_DATABASE_URL
    /// - QUILLPRESS_THEME_ACTIVE
    /// - QUILLPRESS_THEME_PATH
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("QUILLPRESS_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("QUILLPRESS_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("QUILLPRESS_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(active) = std::env::var("QUILLPRESS_THEME_ACTIVE") {
            self.theme.active = active;
        }
        if let Ok(path) = std::env::var("QUILLPRESS_THEME_PATH") {
            self.theme.path = PathBuf::from(path);
        }
    }

    /// Names of the enabled external sign-in providers, in stable order.
    ///
    /// Computed once at startup and injected into the router state.
    pub fn signin_providers(&self) -> Vec<String> {
        self.oauth2.keys().cloned().collect()
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Env-var tests mutate process state; serialize them.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        for key in [
            "QUILLPRESS_SERVER_HOST",
            "QUILLPRESS_SERVER_PORT",
            "QUILLPRESS_DATABASE_URL",
            "QUILLPRESS_THEME_ACTIVE",
            "QUILLPRESS_THEME_PATH",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "data/quillpress.db");
        assert_eq!(config.theme.active, "default");
        assert_eq!(config.theme.path, PathBuf::from("themes"));
        assert!(config.oauth2.is_empty());
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "   \n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3000\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.theme.active, "default");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
database:
  url: "data/site.db"
theme:
  active: "paper"
  path: "custom_themes"
oauth2:
  github:
    client_id: "abc"
    client_secret: "def"
  google:
    client_id: "ghi"
    client_secret: "jkl"
    redirect_uri: "https://example.com/callback"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "data/site.db");
        assert_eq!(config.theme.active, "paper");
        assert_eq!(config.theme.path, PathBuf::from("custom_themes"));
        assert_eq!(config.oauth2.len(), 2);
        assert_eq!(config.oauth2["github"].client_id, "abc");
        assert_eq!(
            config.oauth2["google"].redirect_uri.as_deref(),
            Some("https://example.com/callback")
        );
    }

    #[test]
    fn test_signin_providers_stable_order() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
oauth2:
  google:
    client_id: "a"
    client_secret: "b"
  github:
    client_id: "c"
    client_secret: "d"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        // BTreeMap keys come out sorted regardless of file order
        assert_eq!(config.signin_providers(), vec!["github", "google"]);
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_env_override() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\ntheme:\n  active: \"default\"\n").unwrap();

        std::env::set_var("QUILLPRESS_SERVER_PORT", "4000");
        std::env::set_var("QUILLPRESS_THEME_ACTIVE", "paper");

        let config = Config::load_with_env(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.theme.active, "paper");

        clear_env();
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8081\n").unwrap();

        std::env::set_var("QUILLPRESS_SERVER_PORT", "not_a_number");

        let config = Config::load_with_env(file.path()).unwrap();
        assert_eq!(config.server.port, 8081);

        clear_env();
    }
}
