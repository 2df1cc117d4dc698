//! Social preview (Open Graph) images
//!
//! Cards are rendered behind the [`OgImageRenderer`] trait so the server and
//! the build do not care how the bytes are produced. The bundled renderer
//! writes SVG.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::{CollectionEntry, CollectionKind};
use crate::helpers::{escape_xml, slugify, wrap_lines};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 630;
/// Characters per title line before wrapping
const LINE_WIDTH: usize = 28;
/// Further lines are dropped and the last one gets an ellipsis
const MAX_LINES: usize = 4;

/// Turns a title into image bytes
pub trait OgImageRenderer: Send + Sync {
    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str;

    /// File extension for written cards, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, title: &str) -> Result<Vec<u8>>;
}

/// Renders a plain card: wrapped title, site name and URL
pub struct SvgCardRenderer {
    site_title: String,
    website: String,
}

impl SvgCardRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            site_title: config.title.clone(),
            website: config.website.clone(),
        }
    }

    fn title_lines(title: &str) -> Vec<String> {
        let mut lines = wrap_lines(title, LINE_WIDTH);
        if lines.len() > MAX_LINES {
            lines.truncate(MAX_LINES);
            if let Some(last) = lines.last_mut() {
                last.push('…');
            }
        }
        lines
    }
}

impl OgImageRenderer for SvgCardRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, title: &str) -> Result<Vec<u8>> {
        let lines = Self::title_lines(title);
        let font_size = 72;
        let line_height = 88;
        let text_top = 200;

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = WIDTH,
            h = HEIGHT
        ));
        svg.push('\n');
        svg.push_str(r##"  <rect width="100%" height="100%" fill="#fefbfb"/>"##);
        svg.push('\n');
        svg.push_str(&format!(
            r##"  <rect x="40" y="40" width="{}" height="{}" rx="8" fill="#ecebea" stroke="#000" stroke-width="4"/>"##,
            WIDTH - 80,
            HEIGHT - 80
        ));
        svg.push('\n');

        svg.push_str(&format!(
            r##"  <text x="90" y="{}" font-family="sans-serif" font-size="{}" font-weight="bold" fill="#000">"##,
            text_top, font_size
        ));
        svg.push('\n');
        for (i, line) in lines.iter().enumerate() {
            svg.push_str(&format!(
                r#"    <tspan x="90" dy="{}">{}</tspan>"#,
                if i == 0 { 0 } else { line_height },
                escape_xml(line)
            ));
            svg.push('\n');
        }
        svg.push_str("  </text>\n");

        svg.push_str(&format!(
            r##"  <text x="90" y="{}" font-family="sans-serif" font-size="28" fill="#000">{}</text>"##,
            HEIGHT - 90,
            escape_xml(&self.site_title)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"  <text x="{}" y="{}" font-family="sans-serif" font-size="28" text-anchor="end" fill="#000">{}</text>"##,
            WIDTH - 90,
            HEIGHT - 90,
            escape_xml(website_host(&self.website))
        ));
        svg.push('\n');
        svg.push_str("</svg>\n");

        Ok(svg.into_bytes())
    }
}

/// Titles that get a preview card: published blog posts and every til note
pub fn og_titles(entries: &[CollectionEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| match e.collection {
            CollectionKind::Blog => !e.data.is_draft(),
            CollectionKind::Til => true,
            CollectionKind::Recipe => false,
        })
        .map(|e| e.data.title.as_str())
        .collect()
}

/// File name a title's card is written under
pub fn og_file_name(title: &str, extension: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("untitled.{}", extension)
    } else {
        format!("{}.{}", slug, extension)
    }
}

fn website_host(website: &str) -> &str {
    let without_scheme = website
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(website);
    without_scheme.trim_end_matches('/')
}
