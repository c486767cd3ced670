//! Live text filter over image titles

use crate::Image;

/// Owns the active filter term. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct FilterStage {
    term: String,
    /// Lower-cased copy of `term`, kept in sync on every set
    needle: String,
}

impl FilterStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active term
    pub fn set_filter_term(&mut self, term: &str) {
        self.term = term.to_string();
        self.needle = term.to_lowercase();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Case-insensitive substring match against the title
    pub fn matches(&self, image: &Image) -> bool {
        self.needle.is_empty() || image.title.to_lowercase().contains(&self.needle)
    }
}
