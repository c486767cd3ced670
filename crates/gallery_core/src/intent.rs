//! User intents raised by the presentation layer

use crate::{Direction, Image, Paging, SortKey};

/// A single user action fed into the gallery store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search box text changed
    FilterChanged(String),
    /// Sort menu option picked
    SortSelected(SortKey),
    /// Paginator moved (index and/or size)
    PageChanged(Paging),
    /// Paginator "previous page" button; also issued by page correction
    PreviousPage,
    /// Delete button on a thumbnail
    ImageDeleted(Image),
    /// Thumbnail clicked; opens the viewer
    ImageSelected(Image),
    /// Arrow inside the viewer
    ArrowClicked(Direction),
    /// Viewer dismissed
    ModalClosed,
}

impl Intent {
    /// Stable name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Intent::FilterChanged(_) => "filter_changed",
            Intent::SortSelected(_) => "sort_selected",
            Intent::PageChanged(_) => "page_changed",
            Intent::PreviousPage => "previous_page",
            Intent::ImageDeleted(_) => "image_deleted",
            Intent::ImageSelected(_) => "image_selected",
            Intent::ArrowClicked(_) => "arrow_clicked",
            Intent::ModalClosed => "modal_closed",
        }
    }
}
