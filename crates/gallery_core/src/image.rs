//! Gallery image entries

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single gallery image as delivered by the feed.
///
/// Images are immutable once received. Two images are the same entity iff
/// their `url` matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pub title: String,
    pub url: String,
    pub date: String,
}

impl Image {
    pub fn new(title: impl Into<String>, url: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date: date.into(),
        }
    }

    /// Identity key
    pub fn id(&self) -> &str {
        &self.url
    }

    /// Does this image refer to the same entity as `other`?
    pub fn same_as(&self, other: &Image) -> bool {
        self.url == other.url
    }

    /// Parse the date string, if it is in a recognised form
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }
}

/// Parse a calendar date.
///
/// Accepts RFC 3339 and RFC 2822 timestamps, `YYYY-MM-DDTHH:MM:SS` and plain
/// `YYYY-MM-DD`. Zoned timestamps are normalised to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
