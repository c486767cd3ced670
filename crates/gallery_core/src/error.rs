//! Gallery error types

use thiserror::Error;

/// Main gallery error type
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Load errors (surfaced to the presentation layer, never retried) =====
    #[error("Failed to load images: {0}")]
    LoadFailure(String),

    // ===== Lifecycle errors =====
    #[error("Gallery has been destroyed")]
    Destroyed,

    #[error("No async runtime available: {0}")]
    Runtime(String),

    // ===== Setup errors =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GalleryError {
    /// Can the widget keep running after this error?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GalleryError::LoadFailure(_) | GalleryError::Io(_))
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::LoadFailure(msg) => format!("Could not load the gallery: {}", msg),
            GalleryError::Destroyed => "The gallery is no longer available.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(e: reqwest::Error) -> Self {
        GalleryError::LoadFailure(e.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::LoadFailure(format!("invalid feed: {}", e))
    }
}

impl From<toml::de::Error> for GalleryError {
    fn from(e: toml::de::Error) -> Self {
        GalleryError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for GalleryError {
    fn from(e: toml::ser::Error) -> Self {
        GalleryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
