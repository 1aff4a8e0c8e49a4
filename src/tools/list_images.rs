use crate::dom::ImageElement;
use crate::error::Result;
use crate::normalize::normalize;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for the list_images tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListImagesParams {
    /// Only list images that are rendered (default: false)
    #[serde(default)]
    pub visible_only: bool,
}

/// Tool listing the images of the active tab with their cleaned sources
#[derive(Default)]
pub struct ListImagesTool;

impl Tool for ListImagesTool {
    type Params = ListImagesParams;

    fn name(&self) -> &str {
        "list_images"
    }

    fn execute_typed(&self, params: ListImagesParams, context: &mut ToolContext) -> Result<ToolResult> {
        let page = context.get_images()?;

        let images: Vec<Value> = page
            .images
            .iter()
            .filter(|image| !params.visible_only || image.is_visible)
            .map(describe_image)
            .collect();

        Ok(ToolResult::success_with(serde_json::json!({
            "page_url": page.page_url,
            "count": images.len(),
            "images": images
        })))
    }
}

fn describe_image(image: &ImageElement) -> Value {
    serde_json::json!({
        "index": image.index,
        "source_url": image.source_url(),
        "clean_url": normalize(image.source_url()),
        "alt": image.alt,
        "width": image.natural_width,
        "height": image.natural_height,
        "visible": image.is_visible
    })
}
