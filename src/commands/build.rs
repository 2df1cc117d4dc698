//! Build output artifacts

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::collections::sorted_posts;
use crate::content::CollectionKind;
use crate::feed::assemble_feed;
use crate::og::{og_file_name, og_titles, OgImageRenderer, SvgCardRenderer};
use crate::Site;

/// Feed file name inside the public directory
pub const FEED_FILE: &str = "rss.xml";
/// Redirect table file name inside the public directory
pub const REDIRECTS_FILE: &str = "redirects.json";
/// Preview card directory inside the public directory
pub const OG_DIR: &str = "og";

/// Validate all content, then write the feed, redirect table and preview cards
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    // Redirects come first: they are read from raw files and must exist
    // before anything is routed
    let redirects = site.redirects()?;
    let entries = site.load_all()?;

    fs::create_dir_all(&site.public_dir)
        .with_context(|| format!("Failed to create {:?}", site.public_dir))?;

    let redirects_json = serde_json::to_string_pretty(&redirects)?;
    write(&site.public_dir.join(REDIRECTS_FILE), redirects_json.as_bytes())?;
    tracing::info!("Generated {} ({} redirects)", REDIRECTS_FILE, redirects.len());

    let blog: Vec<_> = entries
        .iter()
        .filter(|e| e.collection == CollectionKind::Blog)
        .cloned()
        .collect();
    let feed = assemble_feed(&site.config, sorted_posts(&blog));
    write(&site.public_dir.join(FEED_FILE), feed.to_rss().as_bytes())?;
    tracing::info!("Generated {} ({} items)", FEED_FILE, feed.items.len());

    let renderer = SvgCardRenderer::new(&site.config);
    let count = write_og_images(&renderer, &og_titles(&entries), &site.public_dir.join(OG_DIR))?;
    tracing::info!("Generated {} preview cards", count);

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Render a card for every title into `dir`; returns how many were written
pub fn write_og_images(
    renderer: &dyn OgImageRenderer,
    titles: &[&str],
    dir: &Path,
) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let mut written = 0;
    for title in titles {
        let bytes = renderer
            .render(title)
            .with_context(|| format!("Failed to render preview for {:?}", title))?;
        let path = dir.join(og_file_name(title, renderer.extension()));
        if path.exists() {
            tracing::warn!("Overwriting {:?}, another title has the same slug", path);
        }
        write(&path, &bytes)?;
        written += 1;
    }

    Ok(written)
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_content(site: &Site, rel: &str, content: &str) {
        let path = site.content_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_writes_artifacts() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        write_content(
            &site,
            "blog/first.md",
            "---\ntitle: First Post\ndescription: d\npubDatetime: 2023-01-01\npostSlug: first\n---\n",
        );
        write_content(
            &site,
            "blog/undated.md",
            "---\ntitle: Undated\ndescription: d\n---\n",
        );
        write_content(
            &site,
            "blog/secret.md",
            "---\ntitle: Secret\ndescription: d\npubDatetime: 2024-01-01\ndraft: true\n---\n",
        );
        write_content(&site, "til/note.md", "---\ntitle: A Note\ndescription: d\n---\n");

        run(&site).unwrap();

        let rss = fs::read_to_string(site.public_dir.join(FEED_FILE)).unwrap();
        assert!(rss.contains("/posts/first</link>"));
        assert!(!rss.contains("Undated"));
        assert!(!rss.contains("Secret"));

        let redirects = fs::read_to_string(site.public_dir.join(REDIRECTS_FILE)).unwrap();
        let redirects: serde_json::Value = serde_json::from_str(&redirects).unwrap();
        assert_eq!(redirects["blog/first"], "/posts/first");

        let og = site.public_dir.join(OG_DIR);
        assert!(og.join("first-post.svg").exists());
        assert!(og.join("undated.svg").exists());
        assert!(og.join("a-note.svg").exists());
        assert!(!og.join("secret.svg").exists());
    }

    #[test]
    fn test_build_fails_on_invalid_entry() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        write_content(
            &site,
            "recipe/soup.md",
            "---\ntitle: Soup\ndescription: d\nservings: 4\n---\n",
        );

        let err = run(&site).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("soup.md"));
        assert!(message.contains("servings"));
        assert!(!site.public_dir.join(FEED_FILE).exists());
    }
}
