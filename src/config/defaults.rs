//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en-us".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn rss_path() -> PathBuf {
        "rss.xml".into()
    }

    pub fn sitemap_path() -> PathBuf {
        "sitemap.xml".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use super::super::content::CollectionConfig;

    pub fn authors() -> CollectionConfig {
        CollectionConfig {
            base: "src/content/authors".into(),
            pattern: "**/*.md".into(),
        }
    }

    pub fn blog() -> CollectionConfig {
        CollectionConfig {
            base: "src/content/blog".into(),
            pattern: pattern(),
        }
    }

    pub fn pattern() -> String {
        "**/*.{md,mdx}".into()
    }
}

// ============================================================================
// [markdown] Section Defaults
// ============================================================================

pub mod markdown {
    pub fn target() -> String {
        "_blank".into()
    }

    pub fn rel() -> Vec<String> {
        vec!["noopener".into(), "noreferrer".into()]
    }

    pub fn light_theme() -> String {
        "github-light".into()
    }

    pub fn dark_theme() -> String {
        "github-dark".into()
    }
}

// ============================================================================
// [remote] Section Defaults
// ============================================================================

pub mod remote {
    pub fn news_url() -> String {
        "https://raw.githubusercontent.com/Olshansk/rss-feeds/main/feeds/feed_anthropic_news.xml"
            .into()
    }

    pub fn changelog_url() -> String {
        "https://raw.githubusercontent.com/anthropics/claude-code/refs/heads/main/CHANGELOG.md"
            .into()
    }
}
