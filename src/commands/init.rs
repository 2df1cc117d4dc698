//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::CollectionKind;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
///
/// Writes `_config.yml`, one directory per collection and a sample post.
/// Existing files are left alone; an existing `_config.yml` decides where
/// the collections go.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    let existing = config_path.exists();
    let config = if existing {
        SiteConfig::load(&config_path)?
    } else {
        SiteConfig::default()
    };

    let content_dir = target_dir.join(&config.content_dir);
    for kind in CollectionKind::ALL {
        fs::create_dir_all(content_dir.join(kind.dir_name()))?;
    }

    if !existing {
        let config_content = format!(
            r#"# Site
title: {title}
description: ''
author: {author}
website: {website}
og_image: {og_image}

# Directory
content_dir: {content_dir}
public_dir: {public_dir}

# URL
posts_path: {posts_path}
"#,
            title = config.title,
            author = config.author,
            website = config.website,
            og_image = config.og_image,
            content_dir = config.content_dir,
            public_dir = config.public_dir,
            posts_path = config.posts_path,
        );
        fs::write(&config_path, config_content)?;
    }

    let sample_path = content_dir.join("blog").join("hello-world.md");
    if !sample_path.exists() {
        let now = chrono::Utc::now();
        let sample_post = format!(
            r#"---
title: Hello World
description: The first post on this blog.
pubDatetime: {}
tags:
  - others
---

Welcome! Edit or delete this post, then run `blogkit build`.
"#,
            now.format("%Y-%m-%dT%H:%M:%SZ")
        );
        fs::write(&sample_path, sample_post)?;
    }

    Ok(())
}
