//! Full-screen viewer navigation

use crate::Image;
use serde::{Deserialize, Serialize};

/// Arrow button inside the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
}

/// A viewer session over a point-in-time copy of the sorted images.
///
/// The snapshot is taken when the session opens and never follows later
/// deletions or filter changes. Arrow moves clamp to the ends of the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSession {
    snapshot: Vec<Image>,
    /// `None` when the selected image was not in the snapshot
    cursor: Option<usize>,
}

impl ModalSession {
    /// Open on `selected`, looking its identity up in `snapshot`
    pub fn open(snapshot: Vec<Image>, selected: &Image) -> Self {
        let cursor = snapshot.iter().position(|img| img.same_as(selected));
        if cursor.is_none() {
            tracing::debug!("Selected image {} not in sorted snapshot", selected.url);
        }
        Self { snapshot, cursor }
    }

    pub fn snapshot(&self) -> &[Image] {
        &self.snapshot
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as shown to the presentation layer, `-1` when not found
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Image under the cursor
    pub fn current(&self) -> Option<&Image> {
        self.cursor.and_then(|c| self.snapshot.get(c))
    }

    /// Move the cursor one step. Returns true if it moved.
    pub fn arrow(&mut self, direction: Direction) -> bool {
        let Some(last) = self.snapshot.len().checked_sub(1) else {
            return false;
        };

        let next = match (self.cursor, direction) {
            // Not found behaves like a cursor just before the first image
            (None, _) => 0,
            (Some(c), Direction::Left) => c.saturating_sub(1),
            (Some(c), Direction::Right) => (c + 1).min(last),
        };

        let moved = self.cursor != Some(next);
        self.cursor = Some(next);
        moved
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == Some(0)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_some() && self.cursor == self.snapshot.len().checked_sub(1)
    }
}
