//! Site configuration management for `scribe.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[site]`     | Site metadata (title, description, url)         |
//! | `[build]`    | Output directory, which generators run          |
//! | `[content]`  | Collection directories and glob patterns        |
//! | `[markdown]` | External link attributes, highlight themes      |
//! | `[remote]`   | News feed and changelog URLs                    |
//! | `[extra]`    | User-defined custom fields                      |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Release Notes"
//! description = "News, features and guides"
//! url = "https://blog.example.com"
//!
//! [build]
//! output = "dist"
//!
//! [content.blog]
//! base = "src/content/blog"
//!
//! [markdown.highlight]
//! light = "github-light"
//! dark = "github-dark"
//! ```

mod build;
mod content;
pub mod defaults;
mod error;
mod markdown;
mod remote;
mod site;

pub use content::CollectionConfig;
pub use markdown::{ExternalLinksConfig, HighlightConfig, MarkdownConfig};

use build::BuildConfig;
use content::ContentConfig;
use error::ConfigError;
use remote::RemoteConfig;
use site::SiteInfo;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing scribe.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteInfo,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Content collections
    #[serde(default)]
    pub content: ContentConfig,

    /// Markdown rendering rules
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Remote documents
    #[serde(default)]
    pub remote: RemoteConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.output, args.output.as_ref());
            Self::update_option(&mut self.build.rss, args.rss.as_ref());
            Self::update_option(&mut self.build.sitemap, args.sitemap.as_ref());
            if let Some(base_url) = &args.base_url {
                self.site.url = Some(base_url.clone());
            }
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.content.authors.base = Self::normalize_path(&root.join(&self.content.authors.base));
        self.content.blog.base = Self::normalize_path(&root.join(&self.content.blog.base));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        if (self.build.rss || self.build.sitemap) && self.site.url.is_none() {
            bail!(ConfigError::Validation(
                "[site.url] is required for rss and sitemap generation".into()
            ));
        }

        if let Some(url) = &self.site.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        for (field, collection) in [
            ("[content.authors]", &self.content.authors),
            ("[content.blog]", &self.content.blog),
        ] {
            if collection.pattern.trim().is_empty() {
                bail!(ConfigError::Validation(format!(
                    "{field} pattern must not be empty"
                )));
            }
        }

        self.validate_remote()
    }

    /// Validate only the `[remote]` section, for commands that never build.
    pub fn validate_remote(&self) -> Result<()> {
        for (field, url) in [
            ("[remote.news_url]", &self.remote.news_url),
            ("[remote.changelog_url]", &self.remote.changelog_url),
        ] {
            if url::Url::parse(url).is_err() {
                bail!(ConfigError::Validation(format!("{field} is not a valid URL")));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
