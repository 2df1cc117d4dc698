//! URL helper functions

/// Join a site URL and a site-relative path with exactly one slash
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "posts/hello") // -> "https://example.com/posts/hello"
/// ```
pub fn full_url_for(website: &str, path: &str) -> String {
    let base = website.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Normalize a request path for lookup: leading slash kept, trailing slash dropped
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}
