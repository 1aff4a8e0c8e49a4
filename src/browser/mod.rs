//! Browser host: launch options and the session that owns the Chrome connection

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
