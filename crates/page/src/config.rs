use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use portfolio_catalog::{TagDictionary, TagRuleSpec, DEFAULT_CERTIFICATE_DIR};
use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::theme::{FileThemeStore, THEME_STORAGE_KEY};

pub const ENV_PROFILE_URL: &str = "PORTFOLIO_PROFILE_URL";
pub const ENV_CERTIFICATES_URL: &str = "PORTFOLIO_CERTIFICATES_URL";
pub const ENV_THEME_KEY: &str = "PORTFOLIO_THEME_KEY";

/// Page bootstrap configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Location of the profile document
    pub profile_url: String,

    /// Location of the certificate list
    pub certificates_url: String,

    /// Storage key holding the theme preference
    pub theme_storage_key: String,

    /// Directory certificate files are served from
    pub certificate_dir: String,

    /// Delay before the loading screen is dismissed
    pub loader_delay_ms: u64,

    /// Scroll offset past which the header is styled as scrolled
    pub header_scroll_threshold: f64,

    /// Chip dictionary override (built-in dictionary when absent)
    pub tags: Option<Vec<TagRuleSpec>>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            profile_url: "data/profile.json".to_string(),
            certificates_url: "data/certificates.json".to_string(),
            theme_storage_key: THEME_STORAGE_KEY.to_string(),
            certificate_dir: DEFAULT_CERTIFICATE_DIR.to_string(),
            loader_delay_ms: 500,
            header_scroll_threshold: 50.0,
            tags: None,
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("parse page config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read page config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("load page config {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(url) = get(ENV_PROFILE_URL) {
            self.profile_url = url;
        }
        if let Some(url) = get(ENV_CERTIFICATES_URL) {
            self.certificates_url = url;
        }
        if let Some(key) = get(ENV_THEME_KEY) {
            self.theme_storage_key = key;
        }
        self
    }

    pub fn validate(&self) -> std::result::Result<(), PageError> {
        if self.profile_url.trim().is_empty() {
            return Err(PageError::Config("profile_url must not be empty".to_string()));
        }
        if self.certificates_url.trim().is_empty() {
            return Err(PageError::Config(
                "certificates_url must not be empty".to_string(),
            ));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(PageError::Config(
                "theme_storage_key must not be empty".to_string(),
            ));
        }
        if !self.header_scroll_threshold.is_finite() {
            return Err(PageError::Config(
                "header_scroll_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn loader_delay(&self) -> Duration {
        Duration::from_millis(self.loader_delay_ms)
    }

    /// File-backed theme store keyed by `theme_storage_key`.
    pub fn file_theme_store(&self, path: impl Into<PathBuf>) -> FileThemeStore {
        FileThemeStore::new(path, self.theme_storage_key.clone())
    }

    /// Compile the configured chip dictionary.
    pub fn tag_dictionary(&self) -> std::result::Result<TagDictionary, PageError> {
        match &self.tags {
            Some(specs) => Ok(TagDictionary::from_specs(specs)?),
            None => Ok(TagDictionary::default()),
        }
    }
}
