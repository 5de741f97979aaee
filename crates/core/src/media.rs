//! Media URL resolution.
//!
//! Uploaded files are served by the CMS under `/uploads/`. Content written
//! in the admin console references them with relative paths, which only
//! work when the site and the CMS share an origin.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `src="/uploads/` and `src='uploads/` (with or without the
/// leading slash, either quote style).
static UPLOAD_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src=("|')/?uploads/"#).expect("valid regex"));

/// Rewrite relative upload references inside HTML content to absolute URLs
/// on the CMS host.
pub fn resolve_content_media(html: &str, api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    UPLOAD_SRC_RE
        .replace_all(html, |caps: &Captures| format!("src={}{base}/uploads/", &caps[1]))
        .into_owned()
}

/// Resolve a single image URL field. Absolute URLs pass through.
pub fn resolve_media_url(url: &str, api_base: &str) -> String {
    if url.starts_with("http") {
        return url.to_string();
    }
    let base = api_base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cms.example.com";

    #[test]
    fn rewrites_rooted_uploads() {
        let html = r#"<p><img src="/uploads/blogs/a.png"></p>"#;
        assert_eq!(
            resolve_content_media(html, BASE),
            r#"<p><img src="https://cms.example.com/uploads/blogs/a.png"></p>"#
        );
    }

    #[test]
    fn rewrites_relative_uploads_with_single_quotes() {
        let html = "<img src='uploads/x.jpg'>";
        assert_eq!(
            resolve_content_media(html, "https://cms.example.com/"),
            "<img src='https://cms.example.com/uploads/x.jpg'>"
        );
    }

    #[test]
    fn leaves_absolute_and_other_paths_alone() {
        let html = r#"<img src="https://cdn.example.com/uploads/a.png"><img src="/static/b.png">"#;
        assert_eq!(resolve_content_media(html, BASE), html);
    }

    #[test]
    fn rewrites_every_occurrence() {
        let html = r#"<img src="/uploads/1.png"><img src="/uploads/2.png">"#;
        let out = resolve_content_media(html, BASE);
        assert_eq!(out.matches("https://cms.example.com/uploads/").count(), 2);
    }

    #[test]
    fn media_url_prefixes_relative_paths() {
        assert_eq!(
            resolve_media_url("/uploads/a.png", BASE),
            "https://cms.example.com/uploads/a.png"
        );
        assert_eq!(
            resolve_media_url("uploads/a.png", BASE),
            "https://cms.example.com/uploads/a.png"
        );
        assert_eq!(
            resolve_media_url("https://blob.example.net/a.png", BASE),
            "https://blob.example.net/a.png"
        );
    }
}
