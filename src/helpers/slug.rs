//! Slug helpers

use crate::content::ContentEntry;

/// Turn free text into a URL path segment
///
/// Diacritics are transliterated, the result is lowercased, every run of
/// non-alphanumeric characters becomes a single hyphen and hyphens are
/// trimmed from both ends.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// ```
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text)
}

/// Slugify every string in a list, keeping the order
pub fn slugify_all<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|s| slugify(s.as_ref())).collect()
}

/// Slug used in an entry's public URL: `postSlug` when set, otherwise the title
pub fn slugify_entry(entry: &ContentEntry) -> String {
    match entry.post_slug.as_deref() {
        Some(post_slug) => slugify(post_slug),
        None => slugify(&entry.title),
    }
}
