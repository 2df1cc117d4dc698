//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Loaded once and passed around by reference; nothing mutates it after
/// startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Public URL, used for absolute links in the feed
    pub website: String,
    /// Default social preview image
    pub og_image: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // URL
    /// Where posts with a `postSlug` are served from
    pub posts_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            website: "http://example.com/".to_string(),
            og_image: "/assets/og.png".to_string(),

            content_dir: "src/content".to_string(),
            public_dir: "dist".to_string(),

            posts_path: "posts".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "src/content");
        assert_eq!(config.posts_path, "posts");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ian Bull
description: Another Technology Blog.
website: https://ianbull.com/
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ian Bull");
        assert_eq!(config.description, "Another Technology Blog.");
        assert_eq!(config.website, "https://ianbull.com/");
        assert_eq!(config.public_dir, "dist");
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let yaml = "title: x\ntheme: landscape\n";
        assert!(serde_yaml::from_str::<SiteConfig>(yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "author: Someone\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.author, "Someone");
        assert!(SiteConfig::load(tmp.path().join("missing.yml")).is_err());
    }
}
