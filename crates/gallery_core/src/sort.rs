//! Sort stage over the available images

use crate::Image;
use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

/// Sort key selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    TitleDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "date-desc")]
    DateDesc,
}

impl SortKey {
    /// Keys offered in the sort menu, in menu order
    pub const SELECTABLE: [SortKey; 4] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::DateDesc,
        SortKey::DateAsc,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SortKey::None => "Unsorted",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::DateDesc => "Newest",
            SortKey::DateAsc => "Oldest",
        }
    }

    /// Parse the kebab-case name used in config files and the console
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(SortKey::None),
            "title-asc" => Some(SortKey::TitleAsc),
            "title-desc" => Some(SortKey::TitleDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "date-desc" => Some(SortKey::DateDesc),
            _ => None,
        }
    }
}

/// Owns the selected sort key
#[derive(Debug, Clone, Copy, Default)]
pub struct SortStage {
    key: SortKey,
}

impl SortStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.key = key;
    }

    pub fn key(&self) -> SortKey {
        self.key
    }

    pub fn apply(&self, images: &[Image]) -> Vec<Image> {
        sort_images(images, self.key)
    }
}

/// Return a sorted copy of `images`. The input is never reordered.
///
/// All orderings are stable: images that compare equal keep their relative
/// order, so re-sorting by the same key is a no-op. Titles compare with the
/// root-locale collator: accents and case only break ties between otherwise
/// equal letters, and digits are compared one by one (`img10` < `img2`).
/// Dates that fail to parse go after every parseable date when ascending and
/// before them when descending.
pub fn sort_images(images: &[Image], key: SortKey) -> Vec<Image> {
    let mut sorted = images.to_vec();

    match key {
        SortKey::None => {}
        SortKey::TitleAsc => {
            let collator = title_collator();
            sorted.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title));
        }
        SortKey::TitleDesc => {
            let collator = title_collator();
            sorted.sort_by(|a, b| compare_titles(collator.as_ref(), &b.title, &a.title));
        }
        SortKey::DateAsc => sorted.sort_by_cached_key(date_key),
        SortKey::DateDesc => sorted.sort_by_cached_key(|img| Reverse(date_key(img))),
    }

    sorted
}

fn title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("Title collator unavailable, comparing lower-cased titles: {}", e);
            None
        }
    }
}

fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn date_key(image: &Image) -> (bool, Option<chrono::NaiveDateTime>) {
    let date = image.parsed_date();
    (date.is_none(), date)
}
