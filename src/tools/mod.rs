//! Session tools
//!
//! Each tool takes typed, JSON-deserializable parameters and returns a [`ToolResult`].
//! Tools are looked up by name in a [`ToolRegistry`] and run against a [`ToolContext`].

pub mod clean_url;
pub mod list_images;
pub mod navigate;
pub mod open_clean_image;

pub use clean_url::{CleanUrlParams, CleanUrlTool};
pub use list_images::{ListImagesParams, ListImagesTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use open_clean_image::{OpenCleanImageParams, OpenCleanImageTool};

use crate::browser::BrowserSession;
use crate::dom::PageImages;
use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    /// Failure that still carries structured details
    pub fn failure_with(error: impl Into<String>, data: Value) -> Self {
        Self { success: false, data: Some(data), error: Some(error.into()) }
    }
}

/// State shared by the tools of one execution
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,

    /// Images of the active tab, extracted on first use
    images: Option<PageImages>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, images: None }
    }

    /// Images of the active tab, cached for the lifetime of the context
    pub fn get_images(&mut self) -> Result<&PageImages> {
        if self.images.is_none() {
            self.images = Some(self.session.extract_images()?);
        }
        self.images
            .as_ref()
            .ok_or_else(|| BrowserError::ImageExtractionFailed("Image cache is empty".to_string()))
    }

    /// Drop cached page state, e.g. after navigating
    pub fn invalidate(&mut self) {
        self.images = None;
    }
}

/// A typed session operation
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe view of a [`Tool`] with its parameters still as JSON
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed = serde_json::from_value(params).map_err(|e| BrowserError::InvalidArgument(format!(
            "Invalid parameters for '{}': {}",
            Tool::name(self),
            e
        )))?;
        self.execute_typed(typed, context)
    }
}

/// Tools addressable by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ListImagesTool);
        registry.register(CleanUrlTool);
        registry.register(OpenCleanImageTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name with JSON parameters
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| BrowserError::UnknownTool(name.to_string()))?;
        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = ToolRegistry::with_defaults();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(names, vec!["navigate", "list_images", "clean_url", "open_clean_image"]);
        assert_eq!(registry.len(), 4);
        assert!(registry.get("click").is_none());
    }

    #[test]
    fn test_registered_schemas_are_objects() {
        let registry = ToolRegistry::with_defaults();
        for name in registry.names() {
            let schema = registry.get(name).unwrap().parameters_schema();
            assert!(schema.is_object(), "schema of '{}' is not an object", name);
        }
    }

    #[test]
    fn test_tool_result_constructors() {
        let ok = ToolResult::success();
        assert!(ok.success);
        assert!(ok.data.is_none());

        let failed = ToolResult::failure("boom");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));

        let json = serde_json::to_value(ToolResult::success_with(serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(json["data"]["a"], 1);
        assert!(json.get("error").is_none());
    }
}
