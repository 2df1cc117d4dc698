//! Front-matter schemas for the content collections
//!
//! Each collection accepts a fixed set of keys. Validation is strict: a key
//! outside the set fails the entry instead of being ignored, so typos in
//! metadata surface at build time. All problems in one block are reported
//! together.

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::error::{SchemaError, Violation, ViolationKind};
use super::frontmatter::value_kind;
use super::{CollectionKind, ContentEntry, DEFAULT_TAG};
use crate::helpers::parse_datetime;

/// Keys every collection accepts
const COMMON_FIELDS: &[&str] = &[
    "title",
    "description",
    "pubDatetime",
    "postSlug",
    "tags",
    "draft",
];

/// Keys only `blog` and `recipe` entries accept
const EXTENDED_FIELDS: &[&str] = &["featured", "ogImage", "icon", "project", "author"];

impl CollectionKind {
    /// Whether the collection's schema declares `field`
    pub fn permits(&self, field: &str) -> bool {
        COMMON_FIELDS.contains(&field)
            || (self.has_extended_fields() && EXTENDED_FIELDS.contains(&field))
    }

    /// Every key the schema declares
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = COMMON_FIELDS.to_vec();
        if self.has_extended_fields() {
            fields.extend_from_slice(EXTENDED_FIELDS);
        }
        fields
    }

    fn has_extended_fields(&self) -> bool {
        !matches!(self, Self::Til)
    }
}

/// Validate raw front-matter against the schema of `kind`
pub fn validate(kind: CollectionKind, raw: &Mapping) -> Result<ContentEntry, SchemaError> {
    let mut reader = FieldReader::new(raw);

    for key in raw.keys() {
        match key.as_str() {
            Some(name) if kind.permits(name) => {}
            Some(name) => reader.reject(name, ViolationKind::UnknownField),
            None => reader.reject(
                serde_yaml::to_string(key)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_else(|_| value_kind(key).to_string()),
                ViolationKind::UnknownField,
            ),
        }
    }

    let title = reader.required_string("title");
    let description = reader.required_string("description");
    let pub_datetime = reader.datetime("pubDatetime");
    let post_slug = reader.string("postSlug");
    let tags = reader.string_list("tags");
    let draft = reader.boolean("draft");

    let (featured, og_image, icon, project, author) = if kind.has_extended_fields() {
        (
            reader.boolean("featured"),
            reader.nullable_string("ogImage"),
            reader.string("icon"),
            reader.boolean("project"),
            reader.string("author"),
        )
    } else {
        (None, None, None, None, None)
    };

    if !reader.violations.is_empty() {
        return Err(SchemaError {
            violations: reader.violations,
        });
    }

    Ok(ContentEntry {
        // Both are Some once no violation was recorded
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        pub_datetime,
        post_slug,
        tags: tags.unwrap_or_else(|| vec![DEFAULT_TAG.to_string()]),
        draft,
        featured,
        og_image,
        icon,
        project,
        author,
    })
}

/// Typed access to raw fields, recording a violation for every bad value
struct FieldReader<'a> {
    raw: &'a Mapping,
    violations: Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a Mapping) -> Self {
        Self {
            raw,
            violations: Vec::new(),
        }
    }

    fn reject(&mut self, field: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation::new(field, kind));
    }

    fn wrong_type(&mut self, field: &str, expected: &'static str, found: &Value) {
        self.reject(
            field,
            ViolationKind::WrongType {
                expected,
                found: value_kind(found),
            },
        );
    }

    fn required_string(&mut self, field: &str) -> Option<String> {
        if self.raw.get(field).is_none() {
            self.reject(field, ViolationKind::Missing);
            return None;
        }
        self.string(field)
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let raw = self.raw;
        match raw.get(field)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.wrong_type(field, "string", other);
                None
            }
        }
    }

    fn nullable_string(&mut self, field: &str) -> Option<String> {
        let raw = self.raw;
        match raw.get(field)? {
            Value::Null => None,
            _ => self.string(field),
        }
    }

    fn boolean(&mut self, field: &str) -> Option<bool> {
        let raw = self.raw;
        match raw.get(field)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.wrong_type(field, "boolean", other);
                None
            }
        }
    }

    fn string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let raw = self.raw;
        let items = match raw.get(field)? {
            Value::Sequence(items) => items,
            other => {
                self.wrong_type(field, "array of strings", other);
                return None;
            }
        };

        let mut list = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                other => self.wrong_type(&format!("{}[{}]", field, i), "string", other),
            }
        }
        Some(list)
    }

    fn datetime(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let raw = self.raw;
        match raw.get(field)? {
            Value::String(s) => {
                let parsed = parse_datetime(s);
                if parsed.is_none() {
                    self.reject(field, ViolationKind::InvalidDate(s.clone()));
                }
                parsed
            }
            other => {
                self.wrong_type(field, "date", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_minimal_entry_gets_default_tags() {
        for kind in CollectionKind::ALL {
            let entry = validate(kind, &mapping("title: x\ndescription: y\n")).unwrap();
            assert_eq!(entry.title, "x");
            assert_eq!(entry.description, "y");
            assert_eq!(entry.tags, vec!["others"]);
            assert!(entry.pub_datetime.is_none());
        }
    }

    #[test]
    fn test_full_blog_entry() {
        let raw = mapping(
            r#"
title: Adding Redirects
description: How old links keep working
author: Ian
pubDatetime: 2023-03-01T09:00:00Z
postSlug: adding-redirects
featured: true
draft: false
tags: [astro, "Web Dev"]
ogImage: /assets/og.png
icon: /icons/astro.svg
project: false
"#,
        );
        let entry = validate(CollectionKind::Blog, &raw).unwrap();
        assert_eq!(entry.author.as_deref(), Some("Ian"));
        assert_eq!(
            entry.pub_datetime,
            Some(Utc.with_ymd_and_hms(2023, 3, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(entry.post_slug.as_deref(), Some("adding-redirects"));
        assert_eq!(entry.featured, Some(true));
        assert_eq!(entry.draft, Some(false));
        assert_eq!(entry.tags, vec!["astro", "Web Dev"]);
        assert_eq!(entry.og_image.as_deref(), Some("/assets/og.png"));
        assert_eq!(entry.icon.as_deref(), Some("/icons/astro.svg"));
        assert_eq!(entry.project, Some(false));
    }

    #[test]
    fn test_unknown_field_rejected_for_every_collection() {
        let raw = mapping("title: x\ndescription: y\nextra: z\n");
        for kind in CollectionKind::ALL {
            let err = validate(kind, &raw).unwrap_err();
            assert_eq!(
                err.violations,
                vec![Violation::new("extra", ViolationKind::UnknownField)],
                "collection {}",
                kind
            );
        }
    }

    #[test]
    fn test_til_rejects_extended_fields() {
        for field in ["icon: a.svg", "ogImage: a.png", "project: true", "featured: true"] {
            let raw = mapping(&format!("title: x\ndescription: y\n{}\n", field));
            let name = field.split(':').next().unwrap();

            let err = validate(CollectionKind::Til, &raw).unwrap_err();
            assert!(err.has_field(name), "{} should be rejected for til", name);

            assert!(validate(CollectionKind::Blog, &raw).is_ok());
            assert!(validate(CollectionKind::Recipe, &raw).is_ok());
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let err = validate(CollectionKind::Blog, &mapping("tags: [a]\n")).unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                Violation::new("title", ViolationKind::Missing),
                Violation::new("description", ViolationKind::Missing),
            ]
        );
    }

    #[test]
    fn test_wrong_types_are_not_coerced() {
        let raw = mapping("title: 42\ndescription: y\ndraft: \"yes\"\ntags: rust\n");
        let err = validate(CollectionKind::Blog, &raw).unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                Violation::new(
                    "title",
                    ViolationKind::WrongType {
                        expected: "string",
                        found: "number"
                    }
                ),
                Violation::new(
                    "tags",
                    ViolationKind::WrongType {
                        expected: "array of strings",
                        found: "string"
                    }
                ),
                Violation::new(
                    "draft",
                    ViolationKind::WrongType {
                        expected: "boolean",
                        found: "string"
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_tag_items_must_be_strings() {
        let raw = mapping("title: x\ndescription: y\ntags: [ok, 3]\n");
        let err = validate(CollectionKind::Til, &raw).unwrap_err();
        assert!(err.has_field("tags[1]"));
    }

    #[test]
    fn test_og_image_is_nullable() {
        let raw = mapping("title: x\ndescription: y\nogImage: null\n");
        let entry = validate(CollectionKind::Blog, &raw).unwrap();
        assert!(entry.og_image.is_none());

        // other optional fields are not
        let raw = mapping("title: x\ndescription: y\nicon: null\n");
        assert!(validate(CollectionKind::Blog, &raw).unwrap_err().has_field("icon"));
    }

    #[test]
    fn test_invalid_date() {
        let raw = mapping("title: x\ndescription: y\npubDatetime: someday\n");
        let err = validate(CollectionKind::Blog, &raw).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::new(
                "pubDatetime",
                ViolationKind::InvalidDate("someday".to_string())
            )]
        );

        let raw = mapping("title: x\ndescription: y\npubDatetime: 20230101\n");
        assert!(validate(CollectionKind::Blog, &raw)
            .unwrap_err()
            .has_field("pubDatetime"));
    }

    #[test]
    fn test_empty_tag_list_is_kept() {
        let raw = mapping("title: x\ndescription: y\ntags: []\n");
        let entry = validate(CollectionKind::Blog, &raw).unwrap();
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_schema_field_sets() {
        assert!(CollectionKind::Recipe.permits("project"));
        assert!(!CollectionKind::Til.permits("author"));
        assert_eq!(CollectionKind::Til.fields().len(), 6);
        assert_eq!(CollectionKind::Blog.fields().len(), 11);
    }
}
