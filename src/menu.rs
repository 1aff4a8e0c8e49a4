//! The "open clean image" context-menu entry
//!
//! A [`ContextMenu`] is registered once per session. Each click is forwarded through
//! [`ContextMenu::on_clicked`], which normalizes the image source and hands the result to a
//! [`TabOpener`]. Tab creation failures are logged and reported in the [`ClickOutcome`],
//! never propagated.

use crate::error::Result;
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use url::Url;

/// Identifier of the single menu entry
pub const OPEN_CLEAN_IMAGE_ID: &str = "open-clean-image";

/// Label shown for the menu entry
pub const OPEN_CLEAN_IMAGE_TITLE: &str = "Open image in new tab (no parameters)";

/// Match pattern accepting every document the host can show
pub const ALL_URLS: &str = "<all_urls>";

const ALL_URLS_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp", "data", "file"];

/// Kind of element a menu invocation was made on. Only images are ever offered the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    Image,
}

/// A static context-menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub contexts: &'static [MenuContext],
    pub document_url_patterns: &'static [&'static str],
}

impl MenuItem {
    /// The "open image without parameters" entry, scoped to images on any document
    pub const fn open_clean_image() -> Self {
        Self {
            id: OPEN_CLEAN_IMAGE_ID,
            title: OPEN_CLEAN_IMAGE_TITLE,
            contexts: &[MenuContext::Image],
            document_url_patterns: &[ALL_URLS],
        }
    }

    /// Whether this entry is offered for `context` on the document at `document_url`
    pub fn applies_to(&self, context: MenuContext, document_url: &str) -> bool {
        self.contexts.contains(&context)
            && self
                .document_url_patterns
                .iter()
                .any(|pattern| matches_document(pattern, document_url))
    }
}

fn matches_document(pattern: &str, document_url: &str) -> bool {
    if pattern == ALL_URLS {
        return Url::parse(document_url)
            .map(|url| ALL_URLS_SCHEMES.contains(&url.scheme()))
            .unwrap_or(false);
    }

    pattern == document_url
}

/// Event delivered when a menu entry is clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuClick {
    /// Identifier of the clicked entry
    pub menu_item_id: String,

    /// Source URL of the image the menu was opened on, as surfaced by the host
    #[serde(default)]
    pub src_url: Option<String>,

    /// URL of the document containing the image
    #[serde(default)]
    pub page_url: Option<String>,
}

impl MenuClick {
    /// A click on the "open clean image" entry for the given image source
    pub fn open_clean_image(src_url: impl Into<String>) -> Self {
        Self { menu_item_id: OPEN_CLEAN_IMAGE_ID.to_string(), src_url: Some(src_url.into()), page_url: None }
    }

    /// Builder method: set the page URL
    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }
}

/// Request passed to the tab-creation capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTabRequest {
    pub url: String,
    pub active: bool,
}

/// Capability to open a URL in a new tab
pub trait TabOpener {
    fn create_tab(&self, request: &CreateTabRequest) -> Result<()>;
}

/// What happened to a menu click
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClickOutcome {
    Opened { original_url: String, clean_url: String },
    Failed { clean_url: String, reason: String },
    Ignored { reason: String },
}

impl ClickOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, ClickOutcome::Opened { .. })
    }
}

/// Registered context menu holding the single static entry
#[derive(Debug, Clone)]
pub struct ContextMenu {
    item: MenuItem,
}

impl ContextMenu {
    /// Register the menu entry. Called once when a session starts.
    pub fn register() -> Self {
        let item = MenuItem::open_clean_image();
        log::info!("Registered context menu item '{}' ({})", item.id, item.title);
        Self { item }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Handle a click: normalize the image source and open it in a new, active tab.
    ///
    /// Clicks on other entries, on documents outside the entry's patterns, or without a
    /// source URL are ignored.
    pub fn on_clicked(&self, event: &MenuClick, opener: &dyn TabOpener) -> ClickOutcome {
        if event.menu_item_id != self.item.id {
            return ClickOutcome::Ignored { reason: format!("Unknown menu item '{}'", event.menu_item_id) };
        }

        if let Some(page_url) = event.page_url.as_deref() {
            if !self.item.applies_to(MenuContext::Image, page_url) {
                return ClickOutcome::Ignored {
                    reason: format!("Menu item '{}' is not offered on {}", self.item.id, page_url),
                };
            }
        }

        let Some(original_url) = event.src_url.as_deref() else {
            log::warn!("Menu click on '{}' carried no source URL", event.menu_item_id);
            return ClickOutcome::Ignored { reason: "No source URL".to_string() };
        };

        let clean_url = normalize(original_url);
        let request = CreateTabRequest { url: clean_url.clone(), active: true };

        match opener.create_tab(&request) {
            Ok(()) => {
                log::info!("Opened {} in a new tab", clean_url);
                ClickOutcome::Opened { original_url: original_url.to_string(), clean_url }
            }
            Err(e) => {
                log::error!("Failed to create tab: {}", e);
                ClickOutcome::Failed { clean_url, reason: e.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingOpener {
        requests: RefCell<Vec<CreateTabRequest>>,
    }

    impl TabOpener for RecordingOpener {
        fn create_tab(&self, request: &CreateTabRequest) -> Result<()> {
            self.requests.borrow_mut().push(request.clone());
            Ok(())
        }
    }

    struct FailingOpener;

    impl TabOpener for FailingOpener {
        fn create_tab(&self, _request: &CreateTabRequest) -> Result<()> {
            Err(BrowserError::TabOperationFailed("tab strip is gone".to_string()))
        }
    }

    #[test]
    fn test_menu_item_definition() {
        let item = MenuItem::open_clean_image();
        assert_eq!(item.id, "open-clean-image");
        assert_eq!(item.title, "Open image in new tab (no parameters)");
        assert_eq!(item.contexts, &[MenuContext::Image]);
        assert_eq!(item.document_url_patterns, &["<all_urls>"]);
    }

    #[test]
    fn test_applies_to_all_urls_documents() {
        let item = MenuItem::open_clean_image();
        assert!(item.applies_to(MenuContext::Image, "https://example.com/gallery"));
        assert!(item.applies_to(MenuContext::Image, "file:///tmp/page.html"));
        assert!(item.applies_to(MenuContext::Image, "data:text/html,<img>"));
        assert!(!item.applies_to(MenuContext::Image, "chrome://settings"));
        assert!(!item.applies_to(MenuContext::Image, "not a url"));
    }

    #[test]
    fn test_click_opens_clean_url() {
        let menu = ContextMenu::register();
        let opener = RecordingOpener::default();

        let outcome = menu.on_clicked(
            &MenuClick::open_clean_image("https://example.com/image.jpg?size=large#gallery"),
            &opener,
        );

        assert_eq!(
            outcome,
            ClickOutcome::Opened {
                original_url: "https://example.com/image.jpg?size=large#gallery".to_string(),
                clean_url: "https://example.com/image.jpg".to_string(),
            }
        );
        let requests = opener.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://example.com/image.jpg");
        assert!(requests[0].active);
    }

    #[test]
    fn test_click_with_malformed_source() {
        let menu = ContextMenu::register();
        let opener = RecordingOpener::default();

        let outcome = menu.on_clicked(&MenuClick::open_clean_image("malformed-url#section"), &opener);

        assert!(outcome.is_opened());
        assert_eq!(opener.requests.borrow()[0].url, "malformed-url");
    }

    #[test]
    fn test_click_on_other_item_is_ignored() {
        let menu = ContextMenu::register();
        let opener = RecordingOpener::default();
        let event = MenuClick {
            menu_item_id: "something-else".to_string(),
            src_url: Some("https://example.com/a.png".to_string()),
            page_url: None,
        };

        let outcome = menu.on_clicked(&event, &opener);

        assert!(matches!(outcome, ClickOutcome::Ignored { .. }));
        assert!(opener.requests.borrow().is_empty());
    }

    #[test]
    fn test_click_without_source_is_ignored() {
        let menu = ContextMenu::register();
        let opener = RecordingOpener::default();
        let event = MenuClick {
            menu_item_id: OPEN_CLEAN_IMAGE_ID.to_string(),
            src_url: None,
            page_url: Some("https://example.com/".to_string()),
        };

        assert!(matches!(menu.on_clicked(&event, &opener), ClickOutcome::Ignored { .. }));
        assert!(opener.requests.borrow().is_empty());
    }

    #[test]
    fn test_click_on_unmatched_document_is_ignored() {
        let menu = ContextMenu::register();
        let opener = RecordingOpener::default();
        let event = MenuClick::open_clean_image("https://example.com/a.png").with_page_url("chrome://newtab/");

        assert!(matches!(menu.on_clicked(&event, &opener), ClickOutcome::Ignored { .. }));
        assert!(opener.requests.borrow().is_empty());

        let event = MenuClick::open_clean_image("https://example.com/a.png").with_page_url("https://example.com/");
        assert!(menu.on_clicked(&event, &opener).is_opened());
    }

    #[test]
    fn test_tab_failure_is_reported_not_raised() {
        let menu = ContextMenu::register();

        let outcome = menu.on_clicked(
            &MenuClick::open_clean_image("https://example.com/a.png?x=1"),
            &FailingOpener,
        );

        match outcome {
            ClickOutcome::Failed { clean_url, reason } => {
                assert_eq!(clean_url, "https://example.com/a.png");
                assert!(reason.contains("tab strip is gone"));
            }
            other => panic!("Expected failure outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_click_event_deserialization() {
        let json = serde_json::json!({
            "menu_item_id": "open-clean-image",
            "src_url": "https://example.com/a.png"
        });

        let event: MenuClick = serde_json::from_value(json).unwrap();
        assert_eq!(event.src_url.as_deref(), Some("https://example.com/a.png"));
        assert!(event.page_url.is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ClickOutcome::Ignored { reason: "No source URL".to_string() };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "ignored");
        assert_eq!(json["reason"], "No source URL");
    }
}
