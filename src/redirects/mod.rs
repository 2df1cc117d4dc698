//! Redirect table for posts that declare an explicit `postSlug`
//!
//! Posts used to be served from their file path. Once a post sets
//! `postSlug` it moves to `/posts/{postSlug}`, and the old path has to keep
//! working. The table is built once from the raw files, before any route is
//! registered.

use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::{entry_id, markdown_files};
use crate::content::{
    value_kind, ContentError, RawFrontMatter, SchemaError, Violation, ViolationKind,
};

/// Old content path (relative to the content root, no extension) to new URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectMap {
    routes: BTreeMap<String, String>,
}

impl RedirectMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.routes.insert(from.into(), to.into());
    }

    /// Target for an old path, with or without leading/trailing slashes
    pub fn get(&self, from: &str) -> Option<&str> {
        self.routes.get(from.trim_matches('/')).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builds a [`RedirectMap`] by scanning markdown files
///
/// # Examples
/// ```ignore
/// let redirects = RedirectMapBuilder::new("src/content").scope("blog").build()?;
/// ```
pub struct RedirectMapBuilder {
    root: PathBuf,
    scope: Option<PathBuf>,
    prefix: String,
}

impl RedirectMapBuilder {
    /// Keys will be relative to `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            scope: None,
            prefix: "/posts".to_string(),
        }
    }

    /// Only scan this subdirectory of the root
    pub fn scope<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.scope = Some(dir.as_ref().to_path_buf());
        self
    }

    /// URL prefix the new paths live under (`/posts` by default)
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = format!("/{}", prefix.trim_matches('/'));
        self
    }

    /// Walk the tree and collect a redirect for every file with a `postSlug`
    pub fn build(&self) -> Result<RedirectMap, ContentError> {
        let dir = match &self.scope {
            Some(scope) => self.root.join(scope),
            None => self.root.clone(),
        };

        let mut redirects = RedirectMap::new();
        if !dir.exists() {
            tracing::debug!("Redirect scan skipped, {:?} does not exist", dir);
            return Ok(redirects);
        }

        for path in markdown_files(&dir)? {
            if let Some(post_slug) = read_post_slug(&path)? {
                let from = entry_id(&self.root, &path);
                let to = format!("{}/{}", self.prefix, post_slug);
                tracing::debug!("Redirect {} -> {}", from, to);
                redirects.insert(from, to);
            }
        }

        tracing::info!("Built {} redirects", redirects.len());
        Ok(redirects)
    }
}

/// Read only the metadata block of a file and return its `postSlug`
fn read_post_slug(path: &Path) -> Result<Option<String>, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (fm, _) = RawFrontMatter::parse(&content).map_err(|e| ContentError::MetadataParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match fm.get("postSlug") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ContentError::Schema {
            path: path.to_path_buf(),
            source: SchemaError {
                violations: vec![Violation::new(
                    "postSlug",
                    ViolationKind::WrongType {
                        expected: "string",
                        found: value_kind(other),
                    },
                )],
            },
        }),
    }
}
