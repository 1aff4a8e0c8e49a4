//! # clean-image-tab
//!
//! Open an image's source URL in a new browser tab with the query string and fragment
//! stripped. Scheme, credentials, host, port and path are kept.
//!
//! ## Features
//!
//! - **URL normalization**: [`normalize`](fn@normalize) strips `?query` and `#fragment` with scheme-aware
//!   rules and never fails
//! - **Context menu**: a single "Open image in new tab (no parameters)" entry for images
//! - **Browser host**: launch or connect to Chrome/Chromium over CDP and open tabs
//! - **Page images**: list the images of a page with their cleaned sources
//!
//! ## Normalizing URLs
//!
//! ```
//! use clean_image_tab::normalize;
//!
//! assert_eq!(normalize("https://example.com/image.jpg?a=1&b=2"), "https://example.com/image.jpg");
//! assert_eq!(normalize("data:image/png;base64,AAA==?param=value"), "data:image/png;base64,AAA==");
//! assert_eq!(normalize(""), "");
//! ```
//!
//! ## Opening a cleaned image
//!
//! ```rust,no_run
//! use clean_image_tab::{BrowserSession, LaunchOptions, MenuClick};
//!
//! # fn main() -> clean_image_tab::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default().headless(false))?;
//! session.navigate("https://example.com/gallery")?;
//! session.wait_for_navigation()?;
//!
//! let page = session.extract_images()?;
//! if let Some(image) = page.get(0) {
//!     let outcome = session.dispatch_menu_click(&MenuClick::open_clean_image(image.source_url()));
//!     println!("{:?}", outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`normalize`](mod@normalize): query and fragment stripping
//! - [`menu`]: the context-menu entry, click events and the [`TabOpener`] capability
//! - [`browser`]: browser session management and configuration
//! - [`dom`]: image extraction from the active tab
//! - [`tools`]: JSON-parameterized session operations
//! - [`error`]: error types and result aliases

pub mod browser;
pub mod dom;
pub mod error;
pub mod menu;
pub mod normalize;
pub mod tools;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{ImageElement, ImageMap, PageImages};
pub use error::{BrowserError, Result};
pub use menu::{ClickOutcome, ContextMenu, CreateTabRequest, MenuClick, MenuItem, TabOpener};
pub use normalize::normalize;
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
