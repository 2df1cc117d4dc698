//! Front-matter extraction
//!
//! Splits a markdown file into its YAML metadata block and the body. Only
//! the block is parsed here; checking it against a collection schema is the
//! job of [`super::schema`].

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Front-matter block delimiter
const DELIMITER: &str = "---";

/// Why a metadata block could not be read at all
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing closing `---` delimiter")]
    Unterminated,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping of fields, found {0}")]
    NotAMapping(&'static str),
}

/// Untyped front-matter fields, exactly as written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrontMatter {
    pub fields: Mapping,
}

impl RawFrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A file that does not open with `---` has no front-matter and yields
    /// an empty field set with the whole file as body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = content.strip_prefix(DELIMITER) else {
            return Ok((Self::default(), content));
        };

        // The opening delimiter has to be a line of its own
        let rest = match rest.find('\n') {
            Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
            None if rest.trim().is_empty() => return Err(FrontMatterError::Unterminated),
            _ => return Ok((Self::default(), content)),
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Parse a bare YAML block
    pub fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            other => Err(FrontMatterError::NotAMapping(value_kind(&other))),
        }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Human-readable name of a YAML value's type, used in error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
pubDatetime: 2024-01-15T10:30:00Z
tags:
  - rust
  - astro
---

This is the content.
"#;

        let (fm, remaining) = RawFrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Hello World"));
        assert_eq!(
            fm.get("pubDatetime").and_then(Value::as_str),
            Some("2024-01-15T10:30:00Z")
        );
        assert!(fm.get("tags").unwrap().is_sequence());
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nSome text.\n";
        let (fm, remaining) = RawFrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, remaining) = RawFrontMatter::parse("---\n---\nbody\n").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "body\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, remaining) = RawFrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Windows"));
        assert_eq!(remaining, "body\r\n");
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let content = "\u{feff}---\ntitle: Bom\n---\n";
        let (fm, _) = RawFrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Bom"));
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter() {
        let content = "----\nnot yaml\n";
        let (fm, remaining) = RawFrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unterminated_block() {
        let err = RawFrontMatter::parse("---\ntitle: x\nbody without end\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));

        let err = RawFrontMatter::parse("---").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = RawFrontMatter::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_scalar_block_is_rejected() {
        let err = RawFrontMatter::parse("---\njust a sentence\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("string")));
    }

    #[test]
    fn test_dashes_inside_body_do_not_end_block_early() {
        let content = "---\ntitle: a\n---\nintro\n---\nmore\n";
        let (fm, remaining) = RawFrontMatter::parse(content).unwrap();
        assert_eq!(fm.fields.len(), 1);
        assert_eq!(remaining, "intro\n---\nmore\n");
    }
}
