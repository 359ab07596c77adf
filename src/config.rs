//! Client configuration.
//!
//! Built with the builder pattern or read from `CAMPUS_*` environment
//! variables.

use std::path::PathBuf;
use thiserror::Error;

use crate::course::LOAD_MORE_ACTIVITIES;
use crate::models::SiteVersion;

pub const ENV_SITE_URL: &str = "CAMPUS_SITE_URL";
pub const ENV_TOKEN: &str = "CAMPUS_TOKEN";
pub const ENV_PAGE_SIZE: &str = "CAMPUS_PAGE_SIZE";
pub const ENV_PREFERENCES_DIR: &str = "CAMPUS_PREFERENCES_DIR";
pub const ENV_SITE_RELEASE: &str = "CAMPUS_SITE_RELEASE";
pub const ENV_LOG: &str = "CAMPUS_LOG";

/// Log filter used when `CAMPUS_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "campus=info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidPageSize { name: &'static str, value: String },

    #[error("{name} is not a valid site release: {message}")]
    InvalidRelease { name: &'static str, message: String },
}

/// Configuration of the client.
///
/// # Example
///
/// ```ignore
/// use campus::config::CampusConfig;
///
/// let config = CampusConfig::default()
///     .with_site_url("https://school.example")
///     .with_page_size(20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CampusConfig {
    /// Base URL of the site (no trailing slash needed)
    pub site_url: Option<String>,
    /// Web service token
    pub token: Option<String>,
    /// Activities revealed per pager pass
    pub page_size: usize,
    /// Base directory of the preference files (default: the user data dir)
    pub preferences_dir: Option<PathBuf>,
    /// Release of the connected site
    pub site_version: SiteVersion,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            token: None,
            page_size: LOAD_MORE_ACTIVITIES,
            preferences_dir: None,
            site_version: SiteVersion::new(4, 1, 0),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CampusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the pager quota. Zero is raised to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_preferences_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preferences_dir = Some(dir.into());
        self
    }

    pub fn with_site_version(mut self, version: SiteVersion) -> Self {
        self.site_version = version;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Whether the dashboard can be fetched from a live site.
    pub fn has_site(&self) -> bool {
        self.site_url.is_some() && self.token.is_some()
    }

    /// Read the configuration from `CAMPUS_*` variables.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_SITE_URL) {
            config = config.with_site_url(url);
        }
        if let Some(token) = env_value(ENV_TOKEN) {
            config = config.with_token(token);
        }
        if let Some(value) = env_value(ENV_PAGE_SIZE) {
            let page_size = value
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPageSize {
                    name: ENV_PAGE_SIZE,
                    value,
                })?;
            config = config.with_page_size(page_size);
        }
        if let Some(dir) = env_value(ENV_PREFERENCES_DIR) {
            config = config.with_preferences_dir(dir);
        }
        if let Some(release) = env_value(ENV_SITE_RELEASE) {
            let version = release
                .parse::<SiteVersion>()
                .map_err(|message| ConfigError::InvalidRelease {
                    name: ENV_SITE_RELEASE,
                    message,
                })?;
            config = config.with_site_version(version);
        }
        if let Some(filter) = env_value(ENV_LOG) {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CampusConfig::default();
        assert_eq!(config.page_size, LOAD_MORE_ACTIVITIES);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.has_site());
    }

    #[test]
    fn test_builder() {
        let config = CampusConfig::new()
            .with_site_url("https://school.example")
            .with_token("abc")
            .with_page_size(0);
        assert!(config.has_site());
        assert_eq!(config.page_size, 1);
    }
}
