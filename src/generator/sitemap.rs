//! Sitemap generation.
//!
//! Lists the site root, the post index and every published post.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::{BLOG_INDEX_PATH, post_path, write_output};
use crate::{
    config::SiteConfig,
    content::{BlogPost, Collection, published_posts},
    log,
    utils::{date::format_date_iso, xml::escape_xml},
};
use anyhow::Result;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, blog: &Collection<BlogPost>) -> Result<()> {
    if config.build.sitemap {
        Sitemap::from_blog(config, blog).write(config)?;
    }
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (optional, YYYY-MM-DD format)
    lastmod: Option<String>,
}

impl Sitemap {
    /// Root and post index first, then posts newest first.
    ///
    /// The post index takes the date of the newest post.
    fn from_blog(config: &SiteConfig, blog: &Collection<BlogPost>) -> Self {
        let posts = published_posts(blog);
        let site = &config.site;

        let mut urls = Vec::with_capacity(posts.len() + 2);
        urls.push(UrlEntry {
            loc: site.absolute_url("/"),
            lastmod: None,
        });
        urls.push(UrlEntry {
            loc: site.absolute_url(BLOG_INDEX_PATH),
            lastmod: posts.first().map(|p| format_date_iso(p.data.publish_date)),
        });
        urls.extend(posts.iter().map(|post| UrlEntry {
            loc: site.absolute_url(&post_path(&post.id)),
            lastmod: Some(format_date_iso(post.data.publish_date)),
        }));

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.build.sitemap_path();
        let count = self.urls.len();
        write_output(&sitemap_path, &self.into_xml())?;

        log!("sitemap"; "{} ({count} urls)", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
