//! Output generators fed by the loaded collections.
//!
//! | Generator | Output                 | Toggle          |
//! |-----------|------------------------|-----------------|
//! | `rss`     | `rss.xml`              | `build.rss`     |
//! | `sitemap` | `sitemap.xml`          | `build.sitemap` |
//! | `pages`   | `blog/**/index.html`   | `build.pages`   |
//!
//! Every generator sees the same published posts, in the same order.

pub mod pages;
pub mod rss;
pub mod sitemap;

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Site-relative URL of a post: `/blog/<id>/`
pub fn post_path(id: &str) -> String {
    format!("/blog/{id}/")
}

/// Site-relative URL of the post index.
pub const BLOG_INDEX_PATH: &str = "/blog/";

/// Write a generated file, creating parent directories.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("hello-world"), "/blog/hello-world/");
        assert_eq!(post_path("2024/launch"), "/blog/2024/launch/");
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog/a/index.html");
        write_output(&path, "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }
}
