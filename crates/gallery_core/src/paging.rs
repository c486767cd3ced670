//! Paging stage and page-size options

use crate::{GalleryError, Image};
use serde::{Deserialize, Serialize};

/// Results per page. Only the paginator's fixed options are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Fifteen,
    Twenty,
}

impl PageSize {
    /// Options offered by the paginator, ascending
    pub const OPTIONS: [PageSize; 4] = [PageSize::Five, PageSize::Ten, PageSize::Fifteen, PageSize::Twenty];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Fifteen => 15,
            PageSize::Twenty => 20,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = GalleryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PageSize::Five),
            10 => Ok(PageSize::Ten),
            15 => Ok(PageSize::Fifteen),
            20 => Ok(PageSize::Twenty),
            other => Err(GalleryError::Config(format!(
                "page size must be one of 5, 10, 15, 20 (got {})",
                other
            ))),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get() as u32
    }
}

/// Current page position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paging {
    pub page_index: usize,
    pub page_size: PageSize,
}

impl Paging {
    pub fn new(page_index: usize, page_size: PageSize) -> Self {
        Self { page_index, page_size }
    }

    /// Offset of the first image on this page
    pub fn start(&self) -> usize {
        self.page_index.saturating_mul(self.page_size.get())
    }

    /// Is there nothing to show at this page for `available` images?
    pub fn is_empty_for(&self, available: usize) -> bool {
        available <= self.start()
    }
}

/// Owns paging intent. `set_paging` never clamps; correction is reactive.
#[derive(Debug, Clone, Copy)]
pub struct PagingStage {
    paging: Paging,
}

impl PagingStage {
    pub fn new(default_size: PageSize) -> Self {
        Self {
            paging: Paging::new(0, default_size),
        }
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    pub fn set_paging(&mut self, paging: Paging) {
        self.paging = paging;
    }

    /// Step back one page. Returns false if already on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.paging.page_index == 0 {
            return false;
        }
        self.paging.page_index -= 1;
        true
    }

    pub fn apply(&self, sorted: &[Image]) -> Vec<Image> {
        extract_page(sorted, self.paging)
    }
}

/// Slice out the images for `paging`, clamped to the sequence
pub fn extract_page(sorted: &[Image], paging: Paging) -> Vec<Image> {
    let start = paging.start().min(sorted.len());
    let end = start.saturating_add(paging.page_size.get()).min(sorted.len());
    sorted[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Image> {
        (1..=n)
            .map(|i| Image::new(format!("img{}", i), format!("u{}", i), "2020-01-01"))
            .collect()
    }

    #[test]
    fn test_page_slices() {
        let images = numbered(25);

        let first = extract_page(&images, Paging::new(0, PageSize::Ten));
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "img1");

        let last = extract_page(&images, Paging::new(2, PageSize::Ten));
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].title, "img21");
        assert_eq!(last[4].title, "img25");

        let beyond = extract_page(&images, Paging::new(9, PageSize::Twenty));
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_page_never_exceeds_size() {
        let images = numbered(23);
        for size in PageSize::OPTIONS {
            for index in 0..6 {
                let paging = Paging::new(index, size);
                let page = extract_page(&images, paging);
                assert!(page.len() <= size.get());
                let expected: Vec<_> = images.iter().skip(paging.start()).take(size.get()).cloned().collect();
                assert_eq!(page, expected);
            }
        }
    }

    #[test]
    fn test_empty_page_detection() {
        assert!(Paging::new(2, PageSize::Ten).is_empty_for(20));
        assert!(!Paging::new(2, PageSize::Ten).is_empty_for(21));
        assert!(Paging::new(0, PageSize::Five).is_empty_for(0));
    }

    #[test]
    fn test_previous_page_saturates() {
        let mut stage = PagingStage::new(PageSize::Five);
        stage.set_paging(Paging::new(1, PageSize::Five));
        assert!(stage.previous_page());
        assert_eq!(stage.paging().page_index, 0);
        assert!(!stage.previous_page());
        assert_eq!(stage.paging().page_index, 0);
    }

    #[test]
    fn test_page_size_serde() {
        let size: PageSize = serde_json::from_str("15").unwrap();
        assert_eq!(size, PageSize::Fifteen);
        assert_eq!(serde_json::to_string(&PageSize::Twenty).unwrap(), "20");
        assert!(serde_json::from_str::<PageSize>("12").is_err());
    }
}
