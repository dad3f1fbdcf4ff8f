//! `[markdown]` section configuration.
//!
//! Post-processing rules applied when rendering post bodies.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[markdown]` section in scribe.toml.
///
/// # Example
/// ```toml
/// [markdown.external_links]
/// target = "_blank"
/// rel = ["noopener", "noreferrer"]
///
/// [markdown.highlight]
/// light = "github-light"
/// dark = "github-dark"
/// wrap = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Attributes added to links that leave the site.
    pub external_links: ExternalLinksConfig,

    /// Code block color themes.
    pub highlight: HighlightConfig,
}

/// `[markdown.external_links]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ExternalLinksConfig {
    /// Value of the `target` attribute.
    #[serde(default = "defaults::markdown::target")]
    #[educe(Default = defaults::markdown::target())]
    pub target: String,

    /// Tokens joined into the `rel` attribute.
    #[serde(default = "defaults::markdown::rel")]
    #[educe(Default = defaults::markdown::rel())]
    pub rel: Vec<String>,
}

impl ExternalLinksConfig {
    /// Space separated `rel` attribute value.
    pub fn rel_value(&self) -> String {
        self.rel.join(" ")
    }
}

/// `[markdown.highlight]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    /// Theme used with a light color scheme.
    #[serde(default = "defaults::markdown::light_theme")]
    #[educe(Default = defaults::markdown::light_theme())]
    pub light: String,

    /// Theme used with a dark color scheme.
    #[serde(default = "defaults::markdown::dark_theme")]
    #[educe(Default = defaults::markdown::dark_theme())]
    pub dark: String,

    /// Soft-wrap long code lines.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub wrap: bool,
}
