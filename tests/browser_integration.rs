use clean_image_tab::{BrowserSession, ClickOutcome, LaunchOptions, MenuClick};

const GALLERY: &str = r#"<html><body>
<img id="first" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=?v=1" alt="Pixel" width="10" height="10">
<img id="hidden" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=#hidden" style="display:none">
</body></html>"#;

fn gallery_url() -> String {
    format!("data:text/html,{}", urlencoding::encode(GALLERY))
}

fn launch() -> BrowserSession {
    BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser")
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_image_extraction() {
    let session = launch();
    session.navigate(&gallery_url()).expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation did not complete");

    let page = session.extract_images().expect("Failed to extract images");

    assert_eq!(page.len(), 2);
    let first = page.get(0).expect("Missing first image");
    assert_eq!(first.alt.as_deref(), Some("Pixel"));
    assert!(first.source_url().starts_with("data:image/gif"));
    assert!(first.is_visible);
    assert!(!page.get(1).expect("Missing second image").is_visible);
}

#[test]
#[ignore]
fn test_list_images_tool() {
    let session = launch();
    session
        .execute_tool("navigate", serde_json::json!({ "url": gallery_url() }))
        .expect("Failed to navigate");

    let result = session
        .execute_tool("list_images", serde_json::json!({ "visible_only": true }))
        .expect("Failed to list images");

    assert!(result.success);
    let data = result.data.expect("No data");
    assert_eq!(data["count"], 1);
    assert_eq!(data["images"][0]["clean_url"], "data:image/gif;base64,R0lGODlhAQABAAAAACw=");
}

#[test]
#[ignore]
fn test_open_clean_image_by_index() {
    let session = launch();
    session
        .execute_tool("navigate", serde_json::json!({ "url": gallery_url() }))
        .expect("Failed to navigate");
    let tabs_before = session.get_tabs().expect("Failed to get tabs").len();

    let result = session
        .execute_tool("open_clean_image", serde_json::json!({ "index": 0 }))
        .expect("Failed to open image");

    assert!(result.success, "open_clean_image failed: {:?}", result.error);
    let data = result.data.expect("No data");
    assert_eq!(data["status"], "opened");
    assert_eq!(data["clean_url"], "data:image/gif;base64,R0lGODlhAQABAAAAACw=");
    assert_eq!(session.get_tabs().expect("Failed to get tabs").len(), tabs_before + 1);
}

#[test]
#[ignore]
fn test_open_clean_image_by_index_out_of_range() {
    let session = launch();
    session
        .execute_tool("navigate", serde_json::json!({ "url": gallery_url() }))
        .expect("Failed to navigate");

    let result = session.execute_tool("open_clean_image", serde_json::json!({ "index": 42 }));
    assert!(result.is_err());
}

#[test]
#[ignore]
fn test_menu_click_with_malformed_source_still_opens() {
    let session = launch();

    let outcome = session.dispatch_menu_click(&MenuClick::open_clean_image("about:blank?stale=1"));

    assert_eq!(
        outcome,
        ClickOutcome::Opened {
            original_url: "about:blank?stale=1".to_string(),
            clean_url: "about:blank".to_string(),
        }
    );
}
