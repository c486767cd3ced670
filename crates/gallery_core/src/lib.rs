//! Galleria Core View-State Engine
//!
//! This crate contains:
//! - Image model and feed source (inline or HTTP)
//! - Filter, deletion, sort and paging stages
//! - The view-state store with reactive page correction
//! - Full-screen viewer navigation
//! - Configuration
//! - Error types

pub mod config;
pub mod deletion;
pub mod error;
pub mod filter;
pub mod gallery;
pub mod image;
pub mod intent;
pub mod modal;
pub mod paging;
pub mod sort;
pub mod source;
pub mod store;

pub use config::{Feed, GalleryConfig, GalleryControls, HttpConfig};
pub use deletion::DeletionStage;
pub use error::{GalleryError, Result};
pub use filter::FilterStage;
pub use gallery::Gallery;
pub use image::{parse_date, Image};
pub use intent::Intent;
pub use modal::{Direction, ModalSession};
pub use paging::{extract_page, PageSize, Paging, PagingStage};
pub use sort::{sort_images, SortKey, SortStage};
pub use source::{FeedFetcher, HttpFetcher, ImageSource};
pub use store::{
    GalleryState, GalleryStore, GalleryView, Listener, LoadState, LoadTicket,
    SubscriptionId,
};
