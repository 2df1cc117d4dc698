//! List site content

use anyhow::Result;

use crate::collections::{draft_posts, posts_by_tag, sorted_posts, sorted_recipes, unique_tags};
use crate::content::{CollectionEntry, CollectionKind};
use crate::helpers::{slugify, slugify_entry};
use crate::Site;

/// List site content by type, optionally restricted to one tag
pub fn run(site: &Site, content_type: &str, tag: Option<&str>) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let blog = site.load(CollectionKind::Blog)?;
            print_entries("Posts", filter_tag(sorted_posts(&blog), tag));
        }
        "draft" | "drafts" => {
            let blog = site.load(CollectionKind::Blog)?;
            print_entries("Drafts", filter_tag(draft_posts(&blog), tag));
        }
        "til" | "tils" => {
            let til = site.load(CollectionKind::Til)?;
            print_entries("Til", filter_tag(sorted_posts(&til), tag));
        }
        "recipe" | "recipes" => {
            let recipes = site.load(CollectionKind::Recipe)?;
            print_entries("Recipes", filter_tag(sorted_recipes(&recipes), tag));
        }
        "tag" | "tags" => {
            let entries = site.load_all()?;
            let tags = unique_tags(&entries);
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} [{}] ({})", tag.tag_name, tag.tag, tag.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, draft, til, recipe, tag",
                content_type
            );
        }
    }

    Ok(())
}

fn filter_tag<'a>(entries: Vec<&'a CollectionEntry>, tag: Option<&str>) -> Vec<&'a CollectionEntry> {
    match tag {
        Some(tag) => posts_by_tag(entries, &slugify(tag)),
        None => entries,
    }
}

fn print_entries(heading: &str, entries: Vec<&CollectionEntry>) {
    println!("{} ({}):", heading, entries.len());
    for entry in entries {
        let date = entry
            .data
            .pub_datetime
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!(
            "  {} - {} [{}] -> {}",
            date,
            entry.data.title,
            entry.id,
            slugify_entry(&entry.data)
        );
    }
}
