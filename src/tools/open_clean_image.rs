use crate::error::{BrowserError, Result};
use crate::menu::{ClickOutcome, MenuClick};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the open_clean_image tool.
///
/// Exactly one of `index` or `src_url` selects the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OpenCleanImageParams {
    /// Index of an image on the active tab, as reported by list_images
    #[serde(default)]
    pub index: Option<usize>,

    /// Image source URL to open directly
    #[serde(default)]
    pub src_url: Option<String>,
}

/// Tool that performs the "open image in new tab (no parameters)" menu action
#[derive(Default)]
pub struct OpenCleanImageTool;

impl Tool for OpenCleanImageTool {
    type Params = OpenCleanImageParams;

    fn name(&self) -> &str {
        "open_clean_image"
    }

    fn execute_typed(&self, params: OpenCleanImageParams, context: &mut ToolContext) -> Result<ToolResult> {
        let event = match (params.index, params.src_url) {
            (Some(_), Some(_)) => {
                return Err(BrowserError::InvalidArgument(
                    "Provide either 'index' or 'src_url', not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(BrowserError::InvalidArgument("Either 'index' or 'src_url' must be provided".to_string()));
            }
            (None, Some(src_url)) => MenuClick::open_clean_image(src_url),
            (Some(index), None) => {
                let page = context.get_images()?;
                let image = page.require(index)?;
                if !image.has_source() {
                    return Err(BrowserError::ImageNotFound(format!("Image {} has no source URL", index)));
                }
                MenuClick::open_clean_image(image.source_url()).with_page_url(page.page_url.clone())
            }
        };

        let outcome = context.session.dispatch_menu_click(&event);
        let data = serde_json::to_value(&outcome)?;

        Ok(match outcome {
            ClickOutcome::Opened { .. } => ToolResult::success_with(data),
            ClickOutcome::Failed { reason, .. } => ToolResult::failure_with(reason, data),
            ClickOutcome::Ignored { reason } => ToolResult::failure_with(reason, data),
        })
    }
}
