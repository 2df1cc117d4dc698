//! Views over loaded collection entries: sorted listings, drafts, tag pages
//!
//! All functions are pure and return borrowed entries. Sorting is by
//! `pubDatetime` descending, truncated to whole seconds, with a missing date
//! counted as the epoch. The sort is stable, so entries published in the
//! same second keep their input order.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::content::{CollectionEntry, CollectionKind};
use crate::helpers::{epoch_seconds, slugify, slugify_all};

/// A tag as it appears on tag pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Slugified tag, used in URLs
    pub tag: String,
    /// First spelling seen, used for display
    pub tag_name: String,
    /// Number of entries carrying the tag
    pub count: usize,
}

/// Published entries, newest first
pub fn sorted_posts(entries: &[CollectionEntry]) -> Vec<&CollectionEntry> {
    newest_first(entries.iter().filter(|e| !e.data.is_draft()).collect())
}

/// Draft entries, newest first
pub fn draft_posts(entries: &[CollectionEntry]) -> Vec<&CollectionEntry> {
    newest_first(entries.iter().filter(|e| e.data.is_draft()).collect())
}

/// Published recipes, newest first; entries of other collections are ignored
pub fn sorted_recipes(entries: &[CollectionEntry]) -> Vec<&CollectionEntry> {
    newest_first(
        entries
            .iter()
            .filter(|e| e.collection == CollectionKind::Recipe && !e.data.is_draft())
            .collect(),
    )
}

/// Entries carrying `tag`, compared after slugifying the entry's tags
///
/// `tag` is expected to be a slug already (it usually comes from a URL).
/// Input order is preserved.
pub fn posts_by_tag<'a, E>(entries: E, tag: &str) -> Vec<&'a CollectionEntry>
where
    E: IntoIterator<Item = &'a CollectionEntry>,
{
    entries
        .into_iter()
        .filter(|e| slugify_all(&e.data.tags).iter().any(|t| t == tag))
        .collect()
}

/// Distinct tags over published entries, ordered by slug
pub fn unique_tags(entries: &[CollectionEntry]) -> Vec<Tag> {
    let mut tags: BTreeMap<String, Tag> = BTreeMap::new();

    for entry in entries.iter().filter(|e| !e.data.is_draft()) {
        let mut seen = Vec::new();
        for name in &entry.data.tags {
            let slug = slugify(name);
            // A post spelling one tag two ways counts once
            if slug.is_empty() || seen.contains(&slug) {
                continue;
            }
            tags.entry(slug.clone())
                .or_insert_with(|| Tag {
                    tag: slug.clone(),
                    tag_name: name.clone(),
                    count: 0,
                })
                .count += 1;
            seen.push(slug);
        }
    }

    tags.into_values().collect()
}

fn newest_first(mut entries: Vec<&CollectionEntry>) -> Vec<&CollectionEntry> {
    // sort_by_key is stable
    entries.sort_by_key(|e| Reverse(epoch_seconds(e.data.pub_datetime.as_ref())));
    entries
}
