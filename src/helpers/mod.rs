//! Helper functions
//!
//! Small pure helpers shared by the content, feed and preview-card code:
//! slugs, dates, URLs and XML-safe text.

mod date;
mod slug;
mod text;
mod url;

pub use date::*;
pub use self::slug::*;
pub use text::*;
pub use url::*;
