use crate::dom::image::ImageElement;
use crate::dom::image_map::ImageMap;
use crate::error::{BrowserError, Result};
use headless_chrome::Tab;
use serde::Deserialize;
use std::sync::Arc;

/// The images of one document, indexed in document order
#[derive(Debug, Clone)]
pub struct PageImages {
    /// URL of the document the images were taken from
    pub page_url: String,

    pub images: ImageMap,
}

/// Payload returned by the extraction script
#[derive(Debug, Deserialize)]
struct ExtractedPage {
    #[serde(default)]
    page_url: String,
    #[serde(default)]
    images: Vec<ImageElement>,
}

impl PageImages {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self { page_url: page_url.into(), images: ImageMap::new() }
    }

    /// Extract the images of the document loaded in a browser tab
    pub fn from_tab(tab: &Arc<Tab>) -> Result<Self> {
        let js_code = include_str!("extract_images.js");

        let result = tab
            .evaluate(js_code, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to execute image extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| BrowserError::ImageExtractionFailed("No value returned from image extraction".to_string()))?;

        // The script returns a JSON string rather than an object
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| BrowserError::ImageExtractionFailed(format!("Failed to get JSON string: {}", e)))?;

        let page = Self::from_json(&json_str)?;
        log::debug!("Found {} images on {}", page.images.len(), page.page_url);
        Ok(page)
    }

    /// Build from the extraction script's JSON payload
    pub fn from_json(json: &str) -> Result<Self> {
        let extracted: ExtractedPage = serde_json::from_str(json)
            .map_err(|e| BrowserError::ImageExtractionFailed(format!("Failed to parse image JSON: {}", e)))?;

        let mut page = Self::new(extracted.page_url);
        for image in extracted.images {
            page.images.register(image);
        }
        Ok(page)
    }

    /// Get an image by index
    pub fn get(&self, index: usize) -> Option<&ImageElement> {
        self.images.get(index)
    }

    /// Get an image by index, or an error naming how many images exist
    pub fn require(&self, index: usize) -> Result<&ImageElement> {
        self.images.get(index).ok_or_else(|| {
            BrowserError::ImageNotFound(format!(
                "No image with index {} ({} images on {})",
                index,
                self.images.len(),
                self.page_url
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
