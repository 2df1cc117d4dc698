//! blogkit: content tooling for a markdown blog
//!
//! Loads the `blog`, `til` and `recipe` collections, validates their
//! front-matter against strict schemas, and produces the artifacts the site
//! needs around them: sorted and tagged views, the redirect table for posts
//! that moved to an explicit slug, the RSS feed and social preview cards.

pub mod collections;
pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod helpers;
pub mod og;
pub mod redirects;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{CollectionEntry, CollectionKind, ContentError, ContentLoader};
use redirects::{RedirectMap, RedirectMapBuilder};

/// Configuration file name, looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content collections root
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory; a missing `_config.yml` means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Content loader rooted at the content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
    }

    /// Load and validate one collection
    pub fn load(&self, kind: CollectionKind) -> Result<Vec<CollectionEntry>, ContentError> {
        self.loader().load(kind)
    }

    /// Load and validate every collection
    pub fn load_all(&self) -> Result<Vec<CollectionEntry>, ContentError> {
        self.loader().load_all()
    }

    /// Redirect table for blog posts, keyed by content path
    pub fn redirects(&self) -> Result<RedirectMap, ContentError> {
        RedirectMapBuilder::new(&self.content_dir)
            .scope(CollectionKind::Blog.dir_name())
            .prefix(&self.config.posts_path)
            .build()
    }

    /// Build the output artifacts
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Validate all content without writing anything
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new entry
    pub fn new_entry(&self, title: &str, kind: CollectionKind) -> Result<PathBuf> {
        commands::new::create_entry(self, title, kind)
    }
}
