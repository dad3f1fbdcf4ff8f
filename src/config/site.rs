//! `[site]` section configuration.
//!
//! Site metadata used by the rss channel, the sitemap and page headers.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in scribe.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "Release Notes"
/// description = "News, features and guides"
/// url = "https://blog.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title, used as the rss channel title.
    pub title: String,

    /// Site description, used as the rss channel description.
    pub description: String,

    /// Base URL for absolute links in rss/sitemap.
    /// Required when rss or sitemap generation is enabled.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// Language tag emitted in the rss channel and `<html lang>`.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,
}

impl SiteInfo {
    /// Base URL without trailing slash, empty if unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path such as `/blog/hello/`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}
