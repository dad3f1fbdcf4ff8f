//! `[remote]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[remote]` section in scribe.toml - documents fetched on request.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// RSS document consumed by `scribe news`.
    #[serde(default = "defaults::remote::news_url")]
    #[educe(Default = defaults::remote::news_url())]
    pub news_url: String,

    /// Markdown changelog consumed by `scribe changelog`.
    #[serde(default = "defaults::remote::changelog_url")]
    #[educe(Default = defaults::remote::changelog_url())]
    pub changelog_url: String,
}
