//! Gallery view-state store
//!
//! Owns every input of the gallery (source images, deletion log, filter term,
//! sort key, paging, viewer session) and the values derived from them:
//!
//! ```text
//! images ─┬─ deletions ─┬─ filter ─> available ─> sorted ─> visible page
//!                                                   └─> viewer snapshot
//! ```
//!
//! Each input change recomputes the derived view synchronously and notifies
//! every listener with the new state. Inputs that change back to back are not
//! batched: listeners observe each intermediate combination.

use crate::{
    DeletionStage, FilterStage, GalleryConfig, GalleryControls, GalleryError, Image, Intent,
    ModalSession, Paging, PagingStage, Result, SortKey, SortStage,
};
use std::collections::VecDeque;

/// Callback invoked after every state change
pub type Listener = Box<dyn FnMut(&GalleryState) + Send>;

/// Handle returned by [`GalleryStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies one load started with [`GalleryStore::begin_load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Progress of the image source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

/// Derived view, produced once the source has delivered images
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    /// Number of images that survive deletion and filtering
    pub available_count: usize,
    /// Available images in the selected order
    pub sorted: Vec<Image>,
    /// The slice of `sorted` for `paging`
    pub visible: Vec<Image>,
    pub paging: Paging,
    pub sort_key: SortKey,
    pub filter_term: String,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub load: LoadState,
    pub view: Option<GalleryView>,
    pub modal: Option<ModalSession>,
    pub controls: GalleryControls,
}

pub struct GalleryStore {
    all_images: Option<Vec<Image>>,
    deletions: DeletionStage,
    filter: FilterStage,
    sort: SortStage,
    paging: PagingStage,
    state: GalleryState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    /// Bumped by every `begin_load`; only the latest load may complete
    load_generation: u64,
    /// Intents waiting to be applied, including page corrections
    pending: VecDeque<Intent>,
    torn_down: bool,
}

impl GalleryStore {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            all_images: None,
            deletions: DeletionStage::new(),
            filter: FilterStage::new(),
            sort: SortStage::new(),
            paging: PagingStage::new(config.results_per_page),
            state: GalleryState {
                load: LoadState::Pending,
                view: None,
                modal: None,
                controls: config.controls(),
            },
            listeners: Vec::new(),
            next_subscription: 0,
            load_generation: 0,
            pending: VecDeque::new(),
            torn_down: false,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn deletions(&self) -> &DeletionStage {
        &self.deletions
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========================================
    // Subscriptions
    // ========================================

    pub fn subscribe(&mut self, listener: Listener) -> Result<SubscriptionId> {
        self.ensure_alive()?;
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        tracing::debug!("Listener {:?} subscribed", id);
        Ok(id)
    }

    /// Cancel one subscription. Returns false if it was not active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Cancel every subscription and reject all further input.
    /// Returns the number of subscriptions cancelled.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.listeners.len();
        self.listeners.clear();
        self.pending.clear();
        self.state.modal = None;
        self.torn_down = true;
        tracing::debug!("Store torn down, {} subscriptions cancelled", cancelled);
        cancelled
    }

    // ========================================
    // Source
    // ========================================

    /// A (re)load started. Any load started earlier is superseded.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        self.ensure_alive()?;
        self.load_generation += 1;
        if self.state.load != LoadState::Pending {
            self.state.load = LoadState::Pending;
            self.notify();
        }
        Ok(LoadTicket(self.load_generation))
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Returns false, leaving the state untouched, if a newer load has started
    /// since.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<Image>>) -> Result<bool> {
        self.ensure_alive()?;
        if ticket.0 != self.load_generation {
            tracing::debug!(
                "Dropping result of superseded load {} (current {})",
                ticket.0,
                self.load_generation
            );
            return Ok(false);
        }

        match outcome {
            Ok(images) => self.set_images(images)?,
            Err(e) => self.fail_load(&e)?,
        }
        Ok(true)
    }

    /// Replace the source images. Deletions and the filter term carry over.
    pub fn set_images(&mut self, images: Vec<Image>) -> Result<()> {
        self.ensure_alive()?;
        tracing::info!("Gallery loaded with {} images", images.len());
        self.all_images = Some(images);
        self.state.load = LoadState::Loaded;
        self.refresh_view(true);
        self.drain();
        Ok(())
    }

    /// The load failed. A view from an earlier load, if any, is kept.
    pub fn fail_load(&mut self, error: &GalleryError) -> Result<()> {
        self.ensure_alive()?;
        tracing::warn!("Gallery load failed: {}", error);
        self.state.load = LoadState::Failed(error.user_message());
        self.notify();
        Ok(())
    }

    // ========================================
    // Intents
    // ========================================

    /// Apply an intent, then any page corrections it triggers
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        self.ensure_alive()?;
        self.pending.push_back(intent);
        self.drain();
        Ok(())
    }

    fn drain(&mut self) {
        while let Some(intent) = self.pending.pop_front() {
            self.apply(intent);
        }
    }

    fn apply(&mut self, intent: Intent) {
        tracing::debug!("Applying intent {}", intent.name());

        match intent {
            Intent::FilterChanged(term) => {
                self.filter.set_filter_term(&term);
                self.refresh_view(true);
            }
            Intent::SortSelected(key) => {
                self.sort.set_sort_key(key);
                self.refresh_view(false);
            }
            Intent::PageChanged(paging) => {
                self.paging.set_paging(paging);
                self.refresh_view(true);
            }
            Intent::PreviousPage => {
                if self.paging.previous_page() {
                    self.refresh_view(true);
                }
            }
            Intent::ImageDeleted(image) => {
                if !self.deletions.record_deletion(&image) {
                    tracing::debug!(
                        "Image {} was already deleted ({} deletions logged)",
                        image.url,
                        self.deletions.log().len()
                    );
                }
                self.refresh_view(true);
            }
            Intent::ImageSelected(image) => {
                let Some(view) = &self.state.view else {
                    tracing::debug!("Selection of {} ignored, no images loaded yet", image.url);
                    return;
                };
                self.state.modal = Some(ModalSession::open(view.sorted.clone(), &image));
                self.notify();
            }
            Intent::ArrowClicked(direction) => {
                let Some(modal) = self.state.modal.as_mut() else {
                    return;
                };
                if modal.arrow(direction) {
                    self.notify();
                }
            }
            Intent::ModalClosed => {
                if self.state.modal.take().is_some() {
                    self.notify();
                }
            }
        }
    }

    // ========================================
    // Derivation
    // ========================================

    /// Recompute the view from the latest inputs and notify.
    ///
    /// `check_page` re-evaluates page correction; it is set whenever paging
    /// or the available images may have changed.
    fn refresh_view(&mut self, check_page: bool) {
        let Some(all_images) = &self.all_images else {
            return;
        };

        let available: Vec<Image> = all_images
            .iter()
            .filter(|img| !self.deletions.is_deleted(img))
            .filter(|img| self.filter.matches(img))
            .cloned()
            .collect();

        let sorted = self.sort.apply(&available);
        let visible = self.paging.apply(&sorted);
        let paging = self.paging.paging();

        self.state.view = Some(GalleryView {
            available_count: available.len(),
            sorted,
            visible,
            paging,
            sort_key: self.sort.key(),
            filter_term: self.filter.term().to_string(),
        });
        self.notify();

        if check_page && paging.page_index > 0 && paging.is_empty_for(available.len()) {
            tracing::debug!(
                "Page {} is empty with {} images available, stepping back",
                paging.page_index,
                available.len()
            );
            self.pending.push_back(Intent::PreviousPage);
        }
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.torn_down {
            Err(GalleryError::Destroyed)
        } else {
            Ok(())
        }
    }
}
