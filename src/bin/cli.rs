//! clean-image-tab command line
//!
//! Strips query strings and fragments from image URLs, lists the images of a page, and
//! opens a cleaned image source in a new browser tab.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use clean_image_tab::{BrowserSession, ConnectionOptions, LaunchOptions, normalize};
use std::io::{BufRead, stdin};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "clean-image-tab")]
#[command(version)]
#[command(about = "Open images in a new tab without their query string or fragment", long_about = None)]
struct Cli {
    #[command(flatten)]
    browser: BrowserArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct BrowserArgs {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", global = true)]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR", global = true)]
    user_data_dir: Option<PathBuf>,

    /// Attach to a running browser through its DevTools WebSocket instead of launching one
    #[arg(long, value_name = "URL", global = true)]
    ws_endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print each URL with its query string and fragment removed (reads stdin when no URL is given)
    Clean {
        urls: Vec<String>,
    },
    /// List the images of a page
    Images {
        /// Page to load
        page_url: String,

        /// Only list rendered images
        #[arg(long)]
        visible_only: bool,
    },
    /// Open an image from a page in a new tab, without its query string or fragment
    Open {
        /// Page to load
        page_url: String,

        /// Index of the image, as printed by `images`
        #[arg(long, conflicts_with = "src", required_unless_present = "src")]
        index: Option<usize>,

        /// Image source URL to open directly
        #[arg(long)]
        src: Option<String>,

        /// Keep the browser open this long after the tab opens (milliseconds)
        #[arg(long, default_value = "0")]
        hold_ms: u64,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Clean { urls } => {
            if urls.is_empty() {
                for line in stdin().lock().lines() {
                    println!("{}", normalize(&line.context("Failed to read stdin")?));
                }
            } else {
                for url in &urls {
                    println!("{}", normalize(url));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Images { page_url, visible_only } => {
            let session = open_session(&cli.browser)?;
            load_page(&session, &page_url)?;

            let result = session.execute_tool("list_images", serde_json::json!({ "visible_only": visible_only }))?;
            let Some(data) = result.data else {
                bail!(result.error.unwrap_or_else(|| "list_images returned no data".to_string()));
            };

            let images = data["images"].as_array().cloned().unwrap_or_default();
            if images.is_empty() {
                eprintln!("No images found on {}", data["page_url"].as_str().unwrap_or(&page_url));
            }
            for image in images {
                println!(
                    "[{}] {}{}",
                    image["index"],
                    image["clean_url"].as_str().unwrap_or_default(),
                    image["alt"].as_str().map(|alt| format!("  ({})", alt)).unwrap_or_default()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Open { page_url, index, src, hold_ms } => {
            let session = open_session(&cli.browser)?;
            load_page(&session, &page_url)?;

            let params = match (index, src) {
                (Some(index), _) => serde_json::json!({ "index": index }),
                (None, Some(src)) => serde_json::json!({ "src_url": src }),
                (None, None) => bail!("Either --index or --src must be provided"),
            };

            let result = session.execute_tool("open_clean_image", params)?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if hold_ms > 0 {
                std::thread::sleep(Duration::from_millis(hold_ms));
            }

            Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

fn open_session(args: &BrowserArgs) -> anyhow::Result<BrowserSession> {
    if let Some(ws_url) = &args.ws_endpoint {
        return BrowserSession::connect(ConnectionOptions::new(ws_url.clone()))
            .with_context(|| format!("Failed to connect to {}", ws_url));
    }

    let mut options = LaunchOptions::new().headless(!args.headed);
    if let Some(path) = &args.chrome_path {
        options = options.chrome_path(path);
    }
    if let Some(dir) = &args.user_data_dir {
        options = options.user_data_dir(dir);
    }

    BrowserSession::launch(options).context("Failed to launch browser")
}

fn load_page(session: &BrowserSession, page_url: &str) -> anyhow::Result<()> {
    session
        .execute_tool("navigate", serde_json::json!({ "url": page_url }))
        .with_context(|| format!("Failed to load {}", page_url))?;
    Ok(())
}
