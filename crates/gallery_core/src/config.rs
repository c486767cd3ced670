//! Gallery configuration

use crate::{GalleryError, Image, PageSize, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Construction-time gallery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub results_per_page: PageSize,
    pub pagination: bool,
    pub search: bool,
    pub sorting: bool,
    pub http: HttpConfig,
    /// Kept last so TOML can serialize an inline image list as tables
    pub feed: Feed,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            results_per_page: PageSize::Ten,
            pagination: true,
            search: true,
            sorting: true,
            http: HttpConfig::default(),
            feed: Feed::default(),
        }
    }
}

/// Where the images come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feed {
    /// Fetch a JSON array of images from this locator
    Url(String),
    /// Use this list as-is
    Inline(Vec<Image>),
}

impl Default for Feed {
    fn default() -> Self {
        Feed::Inline(Vec::new())
    }
}

impl Feed {
    pub fn is_remote(&self) -> bool {
        matches!(self, Feed::Url(_))
    }
}

/// Settings for the HTTP feed fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("galleria/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Which controls the presentation layer should expose.
///
/// These never change how the view is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryControls {
    pub pagination: bool,
    pub search: bool,
    pub sorting: bool,
}

impl GalleryConfig {
    pub fn controls(&self) -> GalleryControls {
        GalleryControls {
            pagination: self.pagination,
            search: self.search,
            sorting: self.sorting,
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Galleria", "Galleria")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

impl std::str::FromStr for GalleryConfig {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
