//! Content error types

use std::path::PathBuf;
use thiserror::Error;

/// Why a single frontmatter field was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is absent
    #[error("required field is missing")]
    Missing,
    /// The value has the wrong primitive type
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// The key is not part of the collection's schema
    #[error("unknown field")]
    UnknownField,
    /// A date field holds a string that is not a date
    #[error("{0:?} is not a valid date")]
    InvalidDate(String),
}

/// One rejected frontmatter field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}`: {kind}")]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

/// Frontmatter that failed schema validation; lists every offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid frontmatter: {}", join_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<Violation>,
}

impl SchemaError {
    /// Whether `field` is among the rejected fields
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while reading content from disk
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{}: failed to parse frontmatter: {message}", .path.display())]
    MetadataParse { path: PathBuf, message: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// File the error was raised for
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Schema { path, .. } | Self::MetadataParse { path, .. } | Self::Io { path, .. } => {
                path
            }
        }
    }
}
