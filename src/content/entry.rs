//! Content entry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The tag every entry gets when its frontmatter lists none
pub const DEFAULT_TAG: &str = "others";

/// A named content collection; each one has its own frontmatter schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Blog,
    Til,
    Recipe,
}

impl CollectionKind {
    /// Every collection, in load order
    pub const ALL: [CollectionKind; 3] = [Self::Blog, Self::Til, Self::Recipe];

    /// Directory name under the content root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Til => "til",
            Self::Recipe => "recipe",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Validated frontmatter of one markdown file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Entry title
    pub title: String,

    /// One-line summary
    pub description: String,

    /// Publication time
    pub pub_datetime: Option<DateTime<Utc>>,

    /// Explicit slug, overrides the title-derived one
    pub post_slug: Option<String>,

    /// Tags as authored
    pub tags: Vec<String>,

    /// Unpublished entries are left out of listings and feeds
    pub draft: Option<bool>,

    pub featured: Option<bool>,

    /// Social preview image override
    pub og_image: Option<String>,

    pub icon: Option<String>,

    /// Shown on the projects page
    pub project: Option<bool>,

    pub author: Option<String>,
}

impl ContentEntry {
    /// Create an entry with only the required fields set
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            pub_datetime: None,
            post_slug: None,
            tags: vec![DEFAULT_TAG.to_string()],
            draft: None,
            featured: None,
            og_image: None,
            icon: None,
            project: None,
            author: None,
        }
    }

    /// Whether the entry is flagged as a draft
    pub fn is_draft(&self) -> bool {
        self.draft == Some(true)
    }
}

/// An entry together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntry {
    /// Path relative to the collection directory, `/`-separated, no extension
    pub id: String,

    /// Collection the entry was loaded from
    pub collection: CollectionKind,

    /// Validated frontmatter
    pub data: ContentEntry,
}

impl CollectionEntry {
    pub fn new(id: impl Into<String>, collection: CollectionKind, data: ContentEntry) -> Self {
        Self {
            id: id.into(),
            collection,
            data,
        }
    }
}
