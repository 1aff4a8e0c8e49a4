//! Page image extraction
//!
//! This module provides the "image context" a menu click is made in:
//! - ImageElement: an `<img>` element and its resolved source
//! - ImageMap: images keyed by index in document order
//! - PageImages: all images of one document, extracted from a browser tab

pub mod image;
pub mod image_map;
pub mod page;

pub use image::{BoundingBox, ImageElement};
pub use image_map::ImageMap;
pub use page::PageImages;

use crate::error::Result;
use headless_chrome::Tab;
use std::sync::Arc;

/// Extract the images of the document loaded in a tab
pub fn extract_images(tab: &Arc<Tab>) -> Result<PageImages> {
    PageImages::from_tab(tab)
}
