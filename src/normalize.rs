//! Query and fragment stripping for image source URLs
//!
//! [`normalize`] is the only piece of the crate with real decision logic: it parses the
//! input as a WHATWG URL, rebuilds it without its query and fragment using scheme-aware
//! rules, and falls back to plain string truncation when the input does not parse.

use url::Url;

/// Strip the query string and fragment from a URL.
///
/// Scheme, credentials, host, port and path are preserved. This is a total function:
/// inputs that fail to parse are truncated at the first `?` or `#` instead.
///
/// ```
/// use clean_image_tab::normalize;
///
/// assert_eq!(normalize("https://example.com/image.jpg?a=1&b=2"), "https://example.com/image.jpg");
/// assert_eq!(normalize("https://example.com:443/image.jpg#top"), "https://example.com:443/image.jpg");
/// assert_eq!(normalize("not-a-valid-url?param=value#hash"), "not-a-valid-url");
/// ```
pub fn normalize(input: &str) -> String {
    match Url::parse(input) {
        Ok(url) => rebuild_without_query(&url, input),
        Err(e) => {
            log::warn!("Could not parse URL {:?}: {}", input, e);
            truncate_at_query(input).to_string()
        }
    }
}

/// Reassemble a parsed URL from everything except its query and fragment
fn rebuild_without_query(url: &Url, original: &str) -> String {
    match url.scheme() {
        // data: and blob: carry their payload in the path
        "data" | "blob" => format!("{}:{}", url.scheme(), opaque_path(url)),
        "file" => format!("file://{}", url.path()),
        scheme if !has_authority(url) => format!("{}:{}", scheme, opaque_path(url)),
        scheme => {
            let mut clean = format!("{}://", scheme);

            if !url.username().is_empty() {
                clean.push_str(url.username());
                if let Some(password) = url.password() {
                    clean.push(':');
                    clean.push_str(password);
                }
                clean.push('@');
            }

            clean.push_str(url.host_str().unwrap_or(""));

            // The parser drops default ports, so look for one written in the input
            if let Some(port) = url.port() {
                clean.push_str(&format!(":{}", port));
            } else if let Some(port) = explicit_port(original) {
                clean.push(':');
                clean.push_str(port);
            }

            clean.push_str(url.path());
            clean
        }
    }
}

/// Whether the serialization has a `//` authority section, possibly empty as in `foo:///x`
fn has_authority(url: &Url) -> bool {
    url.as_str()[url.scheme().len() + 1..].starts_with("//")
}

/// The path, minus the trailing spaces an opaque path loses once its query is gone.
///
/// The parser keeps spaces before a `?` or `#` in an opaque path but strips them from the
/// end of the input, so leaving them in would change the result on a second pass.
fn opaque_path(url: &Url) -> &str {
    if url.cannot_be_a_base() {
        url.path().trim_end_matches(' ')
    } else {
        url.path()
    }
}

/// Find a `:digits` suffix on the authority segment of the raw input
fn explicit_port(original: &str) -> Option<&str> {
    let (_, rest) = original.split_once("://")?;
    let end = rest.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let authority = &rest[..end];

    let (_, port) = authority.rsplit_once(':')?;
    if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
        Some(port)
    } else {
        None
    }
}

/// Everything before the first `?` or `#`
fn truncate_at_query(input: &str) -> &str {
    match input.find(|c: char| c == '?' || c == '#') {
        Some(end) => &input[..end],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_query() {
        assert_eq!(
            normalize("https://example.com/image.jpg?a=1&b=2"),
            "https://example.com/image.jpg"
        );
    }

    #[test]
    fn test_strips_fragment() {
        assert_eq!(
            normalize("https://example.com/image.jpg#sec"),
            "https://example.com/image.jpg"
        );
    }

    #[test]
    fn test_keeps_explicit_port() {
        assert_eq!(
            normalize("https://example.com:8080/image.jpg?x=1"),
            "https://example.com:8080/image.jpg"
        );
    }

    #[test]
    fn test_recovers_default_port() {
        assert_eq!(
            normalize("http://example.com:80/a.png?x"),
            "http://example.com:80/a.png"
        );
    }

    #[test]
    fn test_fallback_on_unparseable() {
        assert_eq!(normalize("not-a-valid-url?param=value#hash"), "not-a-valid-url");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_data_url() {
        assert_eq!(
            normalize("data:image/png;base64,AAA==?param=value"),
            "data:image/png;base64,AAA=="
        );
    }

    #[test]
    fn test_opaque_path_scheme() {
        assert_eq!(normalize("about:blank?x=1"), "about:blank");
        assert_eq!(normalize("mailto:someone@example.com?subject=hi"), "mailto:someone@example.com");
        assert_eq!(normalize("web+app:/gallery/1.png?v=2"), "web+app:/gallery/1.png");
    }

    #[test]
    fn test_empty_authority_is_kept() {
        assert_eq!(normalize("foo:///x/y.png?q"), "foo:///x/y.png");
        assert_eq!(normalize("foo://?x"), "foo://");
        assert_eq!(normalize("foo://"), "foo://");
        assert_eq!(normalize("foo://host/a.png#f"), "foo://host/a.png");
    }

    #[test]
    fn test_opaque_path_trailing_spaces() {
        assert_eq!(normalize("data:,a b ?x"), "data:,a b");
        assert_eq!(normalize("data:,a b"), "data:,a b");
        assert_eq!(normalize("about:blank  #top"), "about:blank");
        assert_eq!(normalize("blob:https://example.com/uuid ?x"), "blob:https://example.com/uuid");
    }

    #[test]
    fn test_explicit_port() {
        assert_eq!(explicit_port("https://example.com:443/a"), Some("443"));
        assert_eq!(explicit_port("https://user:pw@example.com/a"), None);
        assert_eq!(explicit_port("http://[2001:db8::1]/a"), None);
        assert_eq!(explicit_port("http://[::1]:80/a"), Some("80"));
        assert_eq!(explicit_port("http://example.com:/a"), None);
        assert_eq!(explicit_port("example.com:80"), None);
    }

    #[test]
    fn test_truncate_at_query() {
        assert_eq!(truncate_at_query("a?b#c"), "a");
        assert_eq!(truncate_at_query("a#b?c"), "a");
        assert_eq!(truncate_at_query("abc"), "abc");
        assert_eq!(truncate_at_query("?"), "");
    }
}
