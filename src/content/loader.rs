//! Content loader - loads and validates collection entries from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::schema::validate;
use super::{CollectionEntry, CollectionKind, ContentError, RawFrontMatter};

/// Loads content collections from a content root
///
/// Each collection lives in `<root>/<collection>/`. Loading stops at the
/// first file that cannot be read or fails its schema.
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding one collection
    pub fn collection_dir(&self, kind: CollectionKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Load every entry of a collection, ordered by id
    ///
    /// A missing collection directory is an empty collection.
    pub fn load(&self, kind: CollectionKind) -> Result<Vec<CollectionEntry>, ContentError> {
        let dir = self.collection_dir(kind);
        if !dir.exists() {
            tracing::debug!("No {} collection at {:?}", kind, dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for path in markdown_files(&dir)? {
            let entry = load_entry(&dir, &path, kind)?;
            tracing::debug!("Loaded {}/{}", kind, entry.id);
            entries.push(entry);
        }

        tracing::info!("Loaded {} {} entries", entries.len(), kind);
        Ok(entries)
    }

    /// Load all three collections
    pub fn load_all(&self) -> Result<Vec<CollectionEntry>, ContentError> {
        let mut all = Vec::new();
        for kind in CollectionKind::ALL {
            all.extend(self.load(kind)?);
        }
        Ok(all)
    }
}

/// Load a single entry from a file
fn load_entry(
    dir: &Path,
    path: &Path,
    kind: CollectionKind,
) -> Result<CollectionEntry, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (fm, _body) =
        RawFrontMatter::parse(&content).map_err(|e| ContentError::MetadataParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let data = validate(kind, &fm.fields).map_err(|source| ContentError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(CollectionEntry::new(entry_id(dir, path), kind, data))
}

/// All markdown files below `dir`, sorted by path
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ContentError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e.into(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && is_markdown_file(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Path relative to `root`, `/`-separated, markdown extension removed
pub fn entry_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_collection() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "blog/2023/first.md",
            "---\ntitle: First\ndescription: d\n---\nbody\n",
        );
        write(
            tmp.path(),
            "blog/second.md",
            "---\ntitle: Second\ndescription: d\ntags: [rust]\n---\n",
        );
        write(tmp.path(), "blog/notes.txt", "not content");

        let loader = ContentLoader::new(tmp.path());
        let entries = loader.load(CollectionKind::Blog).unwrap();

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2023/first", "second"]);
        assert!(entries.iter().all(|e| e.collection == CollectionKind::Blog));
        assert_eq!(entries[0].data.tags, vec!["others"]);
        assert_eq!(entries[1].data.tags, vec!["rust"]);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loader = ContentLoader::new(tmp.path());
        assert!(loader.load(CollectionKind::Recipe).unwrap().is_empty());
    }

    #[test]
    fn test_schema_violation_names_file_and_field() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "til/typo.md",
            "---\ntitle: x\ndescription: y\ntgas: [oops]\n---\n",
        );

        let err = ContentLoader::new(tmp.path())
            .load(CollectionKind::Til)
            .unwrap_err();
        match &err {
            ContentError::Schema { path, source } => {
                assert!(path.ends_with("til/typo.md"));
                assert!(source.has_field("tgas"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("typo.md"));
        assert!(err.to_string().contains("tgas"));
    }

    #[test]
    fn test_malformed_frontmatter_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "recipe/bad.md", "---\ntitle: [\n---\n");

        let err = ContentLoader::new(tmp.path())
            .load(CollectionKind::Recipe)
            .unwrap_err();
        assert!(matches!(err, ContentError::MetadataParse { .. }));
        assert!(err.path().ends_with("recipe/bad.md"));
    }

    #[test]
    fn test_load_all_tags_collections() {
        let tmp = TempDir::new().unwrap();
        let fm = "---\ntitle: x\ndescription: y\n---\n";
        write(tmp.path(), "blog/a.md", fm);
        write(tmp.path(), "til/b.md", fm);
        write(tmp.path(), "recipe/c.md", fm);

        let all = ContentLoader::new(tmp.path()).load_all().unwrap();
        let kinds: Vec<_> = all.iter().map(|e| e.collection).collect();
        assert_eq!(
            kinds,
            vec![
                CollectionKind::Blog,
                CollectionKind::Til,
                CollectionKind::Recipe
            ]
        );
    }

    #[test]
    fn test_entry_id() {
        let root = Path::new("/content/blog");
        assert_eq!(entry_id(root, Path::new("/content/blog/a/b/post.md")), "a/b/post");
        assert_eq!(entry_id(root, Path::new("/content/blog/post.md")), "post");
    }
}
