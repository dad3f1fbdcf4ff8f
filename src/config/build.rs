//! `[build]` section configuration.
//!
//! Output location and which generators run.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in scribe.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// output = "dist"    # Output directory
/// clean = true       # Remove output before building
/// sitemap = false    # Skip sitemap.xml
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Generate `rss.xml`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub rss: bool,

    /// Generate `sitemap.xml`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub sitemap: bool,

    /// Render `blog/<id>/index.html` for each published post.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pages: bool,
}

impl BuildConfig {
    /// Path of the generated rss feed.
    pub fn rss_path(&self) -> PathBuf {
        self.output.join(defaults::build::rss_path())
    }

    /// Path of the generated sitemap.
    pub fn sitemap_path(&self) -> PathBuf {
        self.output.join(defaults::build::sitemap_path())
    }
}
