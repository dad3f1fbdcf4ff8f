//! Remote changelog rendered to HTML.

use super::{FetchError, fetch_text, log_error};
use crate::utils::markdown::{self, MarkdownOptions};

/// Fetch the markdown changelog at `url` and render it as GitHub-flavored
/// markdown with line breaks.
///
/// The HTML is returned as-is. The source is trusted and not sanitized.
pub fn fetch_changelog_html(url: &str) -> Result<String, FetchError> {
    let markdown = fetch_text(url).inspect_err(log_error)?;
    Ok(markdown::render(&markdown, &MarkdownOptions::github()))
}
