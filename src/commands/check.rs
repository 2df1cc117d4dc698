//! Validate content without writing output

use anyhow::Result;

use crate::content::CollectionKind;
use crate::Site;

/// Load every collection and the redirect table, reporting counts
pub fn run(site: &Site) -> Result<()> {
    for kind in CollectionKind::ALL {
        let entries = site.load(kind)?;
        let drafts = entries.iter().filter(|e| e.data.is_draft()).count();
        println!("{:<7} {} entries ({} drafts)", kind, entries.len(), drafts);
    }

    let redirects = site.redirects()?;
    println!("redirects {}", redirects.len());
    println!("All content is valid.");

    Ok(())
}
