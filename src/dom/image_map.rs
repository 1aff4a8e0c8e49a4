use crate::dom::image::ImageElement;
use indexmap::IndexMap;

/// Map of image indices to images.
/// Uses IndexMap to preserve document order
#[derive(Debug, Clone, Default)]
pub struct ImageMap {
    map: IndexMap<usize, ImageElement>,

    /// Next available index
    next_index: usize,
}

impl ImageMap {
    /// Create a new empty ImageMap
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image, overwriting its index with the next free one
    pub fn register(&mut self, mut image: ImageElement) -> usize {
        let index = self.next_index;
        image.index = index;
        self.map.insert(index, image);
        self.next_index += 1;
        index
    }

    /// Get an image by index
    pub fn get(&self, index: usize) -> Option<&ImageElement> {
        self.map.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.map.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.next_index = 0;
    }

    /// Iterate over images in document order
    pub fn iter(&self) -> impl Iterator<Item = &ImageElement> {
        self.map.values()
    }

    /// Iterate over rendered images only
    pub fn visible(&self) -> impl Iterator<Item = &ImageElement> {
        self.map.values().filter(|image| image.is_visible)
    }

    /// Find the first image whose raw or resolved source equals `src`
    pub fn find_by_src(&self, src: &str) -> Option<&ImageElement> {
        self.map
            .values()
            .find(|image| image.src == src || image.current_src == src)
    }
}
