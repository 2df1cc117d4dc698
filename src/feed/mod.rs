//! RSS feed assembly

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::CollectionEntry;
use crate::helpers::{date_rfc2822, escape_xml, full_url_for, slugify_entry};

/// One feed item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    /// Site-relative link, e.g. `posts/hello-world`
    pub link: String,
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
}

/// A syndication feed, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    /// Site URL that item links are resolved against
    pub site: String,
    /// Absolute URL of the channel image; empty for none
    pub image: String,
    pub items: Vec<FeedItem>,
}

/// Build the feed from published posts in display order
///
/// Entries without `pubDatetime` are left out entirely; the listings treat
/// them as the oldest posts, but a feed item needs a date.
pub fn assemble_feed<'a, E>(config: &SiteConfig, posts: E) -> Feed
where
    E: IntoIterator<Item = &'a CollectionEntry>,
{
    let posts_path = config.posts_path.trim_matches('/');
    let items = posts
        .into_iter()
        .filter_map(|entry| {
            let data = &entry.data;
            let pub_date = data.pub_datetime?;
            Some(FeedItem {
                link: format!("{}/{}", posts_path, slugify_entry(data)),
                title: data.title.clone(),
                description: data.description.clone(),
                pub_date,
            })
        })
        .collect();

    Feed {
        title: config.title.clone(),
        description: config.description.clone(),
        site: config.website.clone(),
        image: channel_image(config),
        items,
    }
}

/// The site's default preview image, resolved against the site URL
fn channel_image(config: &SiteConfig) -> String {
    let og_image = config.og_image.trim();
    if og_image.is_empty() || og_image.contains("://") {
        og_image.to_string()
    } else {
        full_url_for(&config.website, og_image)
    }
}

impl Feed {
    /// Render as an RSS 2.0 document
    pub fn to_rss(&self) -> String {
        let mut rss = String::new();
        rss.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        rss.push('\n');
        rss.push_str(r#"<rss version="2.0">"#);
        rss.push('\n');
        rss.push_str("  <channel>\n");
        rss.push_str(&format!("    <title>{}</title>\n", escape_xml(&self.title)));
        rss.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&self.description)
        ));
        rss.push_str(&format!("    <link>{}</link>\n", escape_xml(&self.site)));
        if !self.image.is_empty() {
            rss.push_str("    <image>\n");
            rss.push_str(&format!("      <url>{}</url>\n", escape_xml(&self.image)));
            rss.push_str(&format!("      <title>{}</title>\n", escape_xml(&self.title)));
            rss.push_str(&format!("      <link>{}</link>\n", escape_xml(&self.site)));
            rss.push_str("    </image>\n");
        }

        for item in &self.items {
            let link = escape_xml(&full_url_for(&self.site, &item.link));
            rss.push_str("    <item>\n");
            rss.push_str(&format!("      <title>{}</title>\n", escape_xml(&item.title)));
            rss.push_str(&format!("      <link>{}</link>\n", link));
            rss.push_str(&format!(
                "      <guid isPermaLink=\"true\">{}</guid>\n",
                link
            ));
            rss.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(&item.description)
            ));
            rss.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                date_rfc2822(&item.pub_date)
            ));
            rss.push_str("    </item>\n");
        }

        rss.push_str("  </channel>\n");
        rss.push_str("</rss>\n");
        rss
    }
}
