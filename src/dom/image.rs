use serde::{Deserialize, Serialize};

/// An `<img>` element found on a page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageElement {
    /// Position of the image in document order
    #[serde(default)]
    pub index: usize,

    /// The `src` attribute as written in the markup (may be relative)
    #[serde(default)]
    pub src: String,

    /// The absolute URL the browser actually loaded (`currentSrc`)
    #[serde(default)]
    pub current_src: String,

    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Intrinsic width in pixels
    #[serde(default)]
    pub natural_width: u32,

    /// Intrinsic height in pixels
    #[serde(default)]
    pub natural_height: u32,

    /// Whether the element is rendered with a non-empty box
    #[serde(default)]
    pub is_visible: bool,

    /// Bounding box information (x, y, width, height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Bounding box coordinates for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageElement {
    /// Create a new ImageElement from its `src` attribute
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            index: 0,
            src: src.into(),
            current_src: String::new(),
            alt: None,
            natural_width: 0,
            natural_height: 0,
            is_visible: false,
            bounding_box: None,
        }
    }

    /// Builder method: set the resolved source
    pub fn with_current_src(mut self, current_src: impl Into<String>) -> Self {
        self.current_src = current_src.into();
        self
    }

    /// Builder method: set alt text
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Builder method: set visibility
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Builder method: set bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox::new(x, y, width, height));
        self
    }

    /// The URL a context-menu click on this image reports.
    ///
    /// Prefers the resolved `currentSrc`, falling back to the raw attribute for images
    /// that have not loaded.
    pub fn source_url(&self) -> &str {
        if self.current_src.is_empty() {
            &self.src
        } else {
            &self.current_src
        }
    }

    /// Whether the image has any source at all
    pub fn has_source(&self) -> bool {
        !self.source_url().is_empty()
    }
}

impl BoundingBox {
    /// Create a new BoundingBox
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the bounding box has non-zero dimensions
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
