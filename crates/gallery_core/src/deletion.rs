//! Session-wide deletion log

use crate::Image;
use std::collections::HashSet;

/// Append-only log of deleted image identities.
///
/// The log never shrinks for the lifetime of the widget. Filtering is by set
/// membership, so deleting an identity twice has the same effect as once.
#[derive(Debug, Clone, Default)]
pub struct DeletionStage {
    log: Vec<String>,
    deleted: HashSet<String>,
}

impl DeletionStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a deletion. Returns true if the identity was not deleted before.
    pub fn record_deletion(&mut self, image: &Image) -> bool {
        self.log.push(image.url.clone());
        self.deleted.insert(image.url.clone())
    }

    pub fn is_deleted(&self, image: &Image) -> bool {
        self.deleted.contains(image.id())
    }

    /// Every deletion in arrival order, duplicates included
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Current set of deleted identities
    pub fn deleted(&self) -> &HashSet<String> {
        &self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redelete_is_noop() {
        let mut stage = DeletionStage::new();
        let img = Image::new("img1", "u1", "2020-01-01");

        assert!(stage.record_deletion(&img));
        assert!(!stage.record_deletion(&img));

        assert_eq!(stage.deleted().len(), 1);
        assert_eq!(stage.log().len(), 2);
        assert!(stage.is_deleted(&img));
    }

    #[test]
    fn test_identity_by_url() {
        let mut stage = DeletionStage::new();
        stage.record_deletion(&Image::new("old title", "u1", "2020-01-01"));
        assert!(stage.is_deleted(&Image::new("new title", "u1", "2022-02-02")));
        assert!(!stage.is_deleted(&Image::new("old title", "u2", "2020-01-01")));
    }
}
