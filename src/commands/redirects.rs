//! Print the redirect table

use anyhow::Result;

use crate::Site;

/// Print the redirect table as JSON
pub fn run(site: &Site) -> Result<()> {
    let redirects = site.redirects()?;
    println!("{}", serde_json::to_string_pretty(&redirects)?);
    Ok(())
}
