use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// Absolute URL of the page to load
    pub url: String,

    /// Wait for navigation to complete (default: true)
    #[serde(default = "default_wait")]
    pub wait_for_load: bool,
}

fn default_wait() -> bool {
    true
}

/// Tool for loading a page in the active tab
#[derive(Default)]
pub struct NavigateTool;

impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn execute_typed(&self, params: NavigateParams, context: &mut ToolContext) -> Result<ToolResult> {
        let url = Url::parse(params.url.trim())
            .map_err(|e| BrowserError::InvalidArgument(format!("'{}' is not an absolute URL: {}", params.url, e)))?;

        context.session.navigate(url.as_str())?;

        if params.wait_for_load {
            context.session.wait_for_navigation()?;
        }

        // Images extracted before this point belong to the previous page
        context.invalidate();

        Ok(ToolResult::success_with(serde_json::json!({
            "url": url.as_str(),
            "waited": params.wait_for_load
        })))
    }
}
