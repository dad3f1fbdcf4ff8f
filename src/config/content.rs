//! `[content]` section configuration.
//!
//! Where each collection lives and which files belong to it.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in scribe.toml.
///
/// # Example
/// ```toml
/// [content.blog]
/// base = "posts"
/// pattern = "**/*.md"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Author profiles.
    #[serde(default = "defaults::content::authors")]
    #[educe(Default = defaults::content::authors())]
    pub authors: CollectionConfig,

    /// Blog posts.
    #[serde(default = "defaults::content::blog")]
    #[educe(Default = defaults::content::blog())]
    pub blog: CollectionConfig,
}

/// Location of one collection on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Directory scanned for entries (relative to the project root).
    pub base: PathBuf,

    /// Glob matched against paths relative to `base`.
    #[serde(default = "defaults::content::pattern")]
    pub pattern: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_content_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(
            config.content.authors.base,
            PathBuf::from("src/content/authors")
        );
        assert_eq!(config.content.authors.pattern, "**/*.md");
        assert_eq!(config.content.blog.base, PathBuf::from("src/content/blog"));
        assert_eq!(config.content.blog.pattern, "**/*.{md,mdx}");
    }

    #[test]
    fn test_content_override_keeps_default_pattern() {
        let config: SiteConfig = toml::from_str(
            r#"
            [content.blog]
            base = "posts"
        "#,
        )
        .unwrap();

        assert_eq!(config.content.blog.base, PathBuf::from("posts"));
        assert_eq!(config.content.blog.pattern, "**/*.{md,mdx}");
        // untouched collection keeps its own defaults
        assert_eq!(config.content.authors.pattern, "**/*.md");
    }
}
