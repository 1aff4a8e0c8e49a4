use crate::error::Result;
use crate::normalize::normalize;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the clean_url tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CleanUrlParams {
    /// URL to strip the query string and fragment from
    pub url: String,
}

/// Tool that strips a URL without touching the browser
#[derive(Default)]
pub struct CleanUrlTool;

impl Tool for CleanUrlTool {
    type Params = CleanUrlParams;

    fn name(&self) -> &str {
        "clean_url"
    }

    fn execute_typed(&self, params: CleanUrlParams, _context: &mut ToolContext) -> Result<ToolResult> {
        let clean_url = normalize(&params.url);

        Ok(ToolResult::success_with(serde_json::json!({
            "original_url": params.url,
            "clean_url": clean_url,
            "changed": clean_url != params.url
        })))
    }
}
