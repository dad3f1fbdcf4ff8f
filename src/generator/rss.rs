//! rss feed generation.
//!
//! Emits an RSS 2.0 channel with one item per published post, newest first.

use super::{post_path, write_output};
use crate::{
    config::SiteConfig,
    content::{BlogPost, Collection, Entry, published_posts},
    log,
    utils::date::to_rfc2822,
};
use anyhow::{Result, anyhow};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

/// Channel `<generator>` value.
const GENERATOR: &str = "scribe";

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, blog: &Collection<BlogPost>) -> Result<()> {
    if config.build.rss {
        let rss_path = config.build.rss_path();
        write_output(&rss_path, &render_rss(config, blog)?)?;
        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
    }
    Ok(())
}

/// Render the feed for `blog` without touching the disk.
pub fn render_rss(config: &SiteConfig, blog: &Collection<BlogPost>) -> Result<String> {
    RssFeed::new(config, blog).into_xml()
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: Vec<&'a Entry<BlogPost>>,
}

impl<'a> RssFeed<'a> {
    /// Drafts are dropped, the rest sorted newest first.
    fn new(config: &'a SiteConfig, blog: &'a Collection<BlogPost>) -> Self {
        Self {
            config,
            posts: published_posts(blog),
        }
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.config))
            .collect();

        let site = &self.config.site;
        let channel = ChannelBuilder::default()
            .title(&site.title)
            .link(site.absolute_url("/"))
            .description(&site.description)
            .language(site.language.clone())
            .generator(GENERATOR.to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an rss item. The guid is the permalink.
fn post_to_rss_item(post: &Entry<BlogPost>, config: &SiteConfig) -> rss::Item {
    let link = config.site.absolute_url(&post_path(&post.id));
    let categories = post
        .data
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(post.data.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.data.description.clone())
        .pub_date(to_rfc2822(post.data.publish_date))
        .categories(categories)
        .build()
}
