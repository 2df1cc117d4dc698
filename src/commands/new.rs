//! Create a new entry

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::CollectionKind;
use crate::helpers::slugify;
use crate::Site;

/// Create a new draft entry in a collection and return its path
///
/// The file is named after the slugified title and starts as a draft with an
/// empty description.
pub fn create_entry(site: &Site, title: &str, kind: CollectionKind) -> Result<PathBuf> {
    let slug = slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = site.content_dir.join(kind.dir_name());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now();
    let content = format!(
        r#"---
title: {}
description: ''
pubDatetime: {}
draft: true
tags:
  - others
---
"#,
        serde_yaml::to_string(title)?.trim_end(),
        now.format("%Y-%m-%dT%H:%M:%SZ")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {} entry {:?}", kind, file_path);

    Ok(file_path)
}
