use crate::{browser::config::{ConnectionOptions, DEFAULT_IDLE_TIMEOUT, LaunchOptions},
            dom::{self, PageImages},
            error::{BrowserError, Result},
            menu::{ClickOutcome, ContextMenu, CreateTabRequest, MenuClick, TabOpener},
            tools::{ToolContext, ToolRegistry, ToolResult}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Context menu registered when the session started
    context_menu: ContextMenu,

    /// Tool registry for executing session tools
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Default idle timeout is 30 seconds, which is shorter than a headed session is kept open
        launch_opts.idle_browser_timeout = DEFAULT_IDLE_TIMEOUT;

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::debug!("Launched browser (headless: {})", options.headless);
        Ok(Self::with_browser(browser))
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url.clone(), options.idle_timeout)
            .map_err(|e| BrowserError::ConnectionFailed(format!("{}: {}", options.ws_url, e)))?;

        log::debug!("Connected to browser at {}", options.ws_url);
        Ok(Self::with_browser(browser))
    }

    fn with_browser(browser: Browser) -> Self {
        Self { browser, context_menu: ContextMenu::register(), tool_registry: ToolRegistry::with_defaults() }
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Create a new tab
    pub fn new_tab(&self) -> Result<Arc<Tab>> {
        self.browser
            .new_tab()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to create tab: {}", e)))
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking document visibility and focus
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        for probe in ["document.visibilityState === 'visible' && document.hasFocus()", "document.visibilityState === 'visible'"] {
            for tab in &tabs {
                match tab.evaluate(probe, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => log::debug!("Failed to check tab status: {}", e),
                }
            }
        }

        // A single tab is active by definition, even if the page has not reported focus yet
        match tabs.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(BrowserError::TabOperationFailed("No active tab found".to_string())),
        }
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the active tab to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Extract the images of the active tab's document
    pub fn extract_images(&self) -> Result<PageImages> {
        dom::extract_images(&self.tab()?)
    }

    /// The context menu registered for this session
    pub fn context_menu(&self) -> &ContextMenu {
        &self.context_menu
    }

    /// Deliver a menu click, opening tabs through this session
    pub fn dispatch_menu_click(&self, event: &MenuClick) -> ClickOutcome {
        self.context_menu.on_clicked(event, self)
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Close every tab; the browser process exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        for tab in self.get_tabs()? {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}

impl TabOpener for BrowserSession {
    fn create_tab(&self, request: &CreateTabRequest) -> Result<()> {
        let tab = self.new_tab()?;

        tab.navigate_to(&request.url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", request.url, e)))?;

        tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationFailed(format!("Navigation to {} did not complete: {}", request.url, e))
        })?;

        if request.active {
            tab.activate()
                .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to activate tab: {}", e)))?;
        }

        Ok(())
    }
}
