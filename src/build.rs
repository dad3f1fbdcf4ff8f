//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_collections()    ──► parse, validate, resolve references
//!     │                             (any content error stops the build)
//!     │
//!     ├── prepare_output()      ──► clear (--clean) and create output dir
//!     │
//!     └── generators, in parallel
//!             ├── build_pages()   ──► blog/<id>/index.html, blog/index.html
//!             ├── build_rss()     ──► rss.xml
//!             └── build_sitemap() ──► sitemap.xml
//! ```

use crate::{
    config::SiteConfig,
    content::{Collections, load_collections, published_posts},
    generator::{pages::build_pages, rss::build_rss, sitemap::build_sitemap},
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path, time::Instant};

/// Build the entire site.
///
/// Content is fully loaded and validated before anything is written.
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Collections> {
    let started = Instant::now();
    let collections = load_content(config)?;

    prepare_output(&config.build.output, config.build.clean)?;

    let (pages_result, (rss_result, sitemap_result)) = rayon::join(
        || build_pages(config, &collections),
        || {
            rayon::join(
                || build_rss(config, &collections.blog),
                || build_sitemap(config, &collections.blog),
            )
        },
    );
    pages_result?;
    rss_result?;
    sitemap_result?;

    log!("build"; "done in {:.2?}", started.elapsed());
    Ok(collections)
}

/// Validate content without writing output.
pub fn check_site(config: &SiteConfig) -> Result<Collections> {
    let collections = load_content(config)?;
    let published = published_posts(&collections.blog).len();
    let drafts = collections.blog.len() - published;

    log!("check"; "{published} published, {drafts} drafts, {} authors", collections.authors.len());
    Ok(collections)
}

fn load_content(config: &SiteConfig) -> Result<Collections> {
    let collections = load_collections(config).context("Failed to load content")?;
    if collections.blog.is_empty() {
        log!("warn"; "no posts found in {}", config.content.blog.base.display());
    }
    Ok(collections)
}

/// Ensure the output directory exists, removing old content when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
        log!("build"; "cleared {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const AUTHOR: &str = "---\nname: Jane\nbio: Writer\navatar: /jane.png\n---\n";

    fn post(title: &str, date: &str, draft: bool) -> String {
        format!(
            "---\ntitle: {title}\ndescription: About {title}\npublishDate: {date}\n\
             authors: [jane]\ntags: [news]\ndraft: {draft}\n---\nHello from {title}.\n"
        )
    }

    fn site(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::from_str(
            r#"
            [site]
            title = "Test Blog"
            description = "News"
            url = "https://example.com"
        "#,
        )
        .unwrap();
        config.content.authors.base = root.join("content/authors");
        config.content.blog.base = root.join("content/blog");
        config.build.output = root.join("dist");
        config
    }

    #[test]
    fn test_build_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "content/authors/jane.md", AUTHOR);
        write(root, "content/blog/first.md", &post("First", "2024-03-01", false));
        write(root, "content/blog/second.mdx", &post("Second", "2024-03-05", false));
        write(root, "content/blog/wip.md", &post("Wip", "2024-03-09", true));

        let config = site(root);
        let collections = build_site(&config).unwrap();
        assert_eq!(collections.blog.len(), 3);

        let dist = root.join("dist");
        let rss = fs::read_to_string(dist.join("rss.xml")).unwrap();
        assert!(rss.find("/blog/second/").unwrap() < rss.find("/blog/first/").unwrap());
        assert!(!rss.contains("/blog/wip/"));

        let sitemap = fs::read_to_string(dist.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/blog/first/</loc>"));

        let page = fs::read_to_string(dist.join("blog/first/index.html")).unwrap();
        assert!(page.contains("Hello from First."));
        assert!(!dist.join("blog/wip").exists());
    }

    #[test]
    fn test_build_site_clean() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "content/authors/jane.md", AUTHOR);
        write(root, "content/blog/first.md", &post("First", "2024-03-01", false));
        write(root, "dist/stale.html", "old");

        let mut config = site(root);
        build_site(&config).unwrap();
        assert!(root.join("dist/stale.html").exists());

        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!root.join("dist/stale.html").exists());
        assert!(root.join("dist/rss.xml").exists());
    }

    #[test]
    fn test_rebuild_removes_page_of_new_draft() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "content/authors/jane.md", AUTHOR);
        write(root, "content/blog/first.md", &post("First", "2024-03-01", false));

        let config = site(root);
        build_site(&config).unwrap();
        assert!(root.join("dist/blog/first/index.html").exists());

        write(root, "content/blog/first.md", &post("First", "2024-03-01", true));
        build_site(&config).unwrap();
        assert!(!root.join("dist/blog/first").exists());
        assert!(root.join("dist/blog/index.html").exists());
    }

    #[test]
    fn test_build_site_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "content/authors/jane.md", AUTHOR);
        write(
            root,
            "content/blog/orphan.md",
            &post("Orphan", "2024-03-01", false).replace("[jane]", "[ghost]"),
        );

        let err = build_site(&site(root)).unwrap_err();
        assert!(format!("{err:#}").contains("ghost"));
        assert!(!root.join("dist").exists());
    }

    #[test]
    fn test_check_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "content/authors/jane.md", AUTHOR);
        write(root, "content/blog/a.md", &post("A", "2024-03-01", true));

        let collections = check_site(&site(root)).unwrap();
        assert_eq!(collections.blog.len(), 1);
        assert!(!root.join("dist").exists());
    }
}
