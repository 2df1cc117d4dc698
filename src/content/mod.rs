//! Content module - collection entries, front-matter and schema validation

mod entry;
mod error;
mod frontmatter;
pub mod loader;
pub mod schema;

pub use entry::{CollectionEntry, CollectionKind, ContentEntry, DEFAULT_TAG};
pub use error::{ContentError, SchemaError, Violation, ViolationKind};
pub use frontmatter::{value_kind, FrontMatterError, RawFrontMatter};
pub use loader::ContentLoader;
pub use schema::validate;
