//! Post pages.
//!
//! Each published post becomes `blog/<id>/index.html`, plus one
//! `blog/index.html` listing them. The shell is fixed; only the body comes
//! from markdown.
//!
//! `blog/` is owned by this generator and rebuilt from scratch every run, so
//! pages of posts that were deleted or turned into drafts do not linger.

use super::{BLOG_INDEX_PATH, post_path, write_output};
use crate::{
    config::SiteConfig,
    content::{BlogPost, Collections, Entry, published_posts},
    log,
    utils::{
        date::{format_date, format_date_iso, format_date_short},
        markdown::{self, MarkdownOptions},
        xml::escape_html,
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::{Path, PathBuf}};

/// Render post pages and the post index if enabled in config.
pub fn build_pages(config: &SiteConfig, collections: &Collections) -> Result<()> {
    if !config.build.pages {
        return Ok(());
    }

    clear_blog_dir(&page_dir(config, BLOG_INDEX_PATH))?;

    let posts = published_posts(&collections.blog);
    posts.par_iter().try_for_each(|post| {
        let html = render_post(config, collections, post);
        write_output(&page_file(config, &post_path(&post.id)), &html)
    })?;
    write_output(
        &page_file(config, BLOG_INDEX_PATH),
        &render_index(config, &posts),
    )?;

    log!("pages"; "{} posts", posts.len());
    Ok(())
}

/// Remove pages left over from a previous build.
fn clear_blog_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to clear {}", dir.display()))?;
    }
    Ok(())
}

/// Output directory for a site-relative directory URL.
fn page_dir(config: &SiteConfig, url_path: &str) -> PathBuf {
    config.build.output.join(url_path.trim_matches('/'))
}

fn page_file(config: &SiteConfig, url_path: &str) -> PathBuf {
    page_dir(config, url_path).join("index.html")
}

/// Full HTML document for one post.
pub fn render_post(config: &SiteConfig, collections: &Collections, post: &Entry<BlogPost>) -> String {
    let data = &post.data;
    let body = markdown::render(&post.body, &MarkdownOptions::site(&config.markdown));

    let authors = collections
        .authors_of(post)
        .map(|author| escape_html(&author.data.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut header = format!(
        r#"<h1>{}</h1>
<p class="meta"><time datetime="{}">{}</time>"#,
        escape_html(&data.title),
        format_date_iso(data.publish_date),
        format_date(data.publish_date),
    );
    if !authors.is_empty() {
        header.push_str(&format!(r#" <span class="authors">{authors}</span>"#));
    }
    header.push_str("</p>\n");

    if let Some(url) = &data.external_url {
        let source = data.source.as_deref().unwrap_or(url);
        header.push_str(&format!(
            r#"<p class="source">Originally published at <a href="{}">{}</a>"#,
            escape_html(url),
            escape_html(source)
        ));
        if let Some(original) = data.original_publish_date {
            header.push_str(&format!(" on {}", format_date(original)));
        }
        header.push_str("</p>\n");
    }
    if let Some(url) = &data.youtube_url {
        header.push_str(&format!(
            "<p class=\"video\"><a href=\"{}\">Watch the video</a></p>\n",
            escape_html(url)
        ));
    }
    if !data.tags.is_empty() {
        header.push_str(r#"<ul class="tags">"#);
        for tag in &data.tags {
            header.push_str(&format!("<li>{}</li>", escape_html(tag)));
        }
        header.push_str("</ul>\n");
    }

    let mut head = String::new();
    if let Some(url) = &data.external_url {
        head.push_str(&format!("<link rel=\"canonical\" href=\"{}\">\n", escape_html(url)));
    }
    if let Some(image) = &data.image {
        head.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            escape_html(image)
        ));
    }

    let title = format!("{} | {}", data.title, config.site.title);
    let content = format!("<article>\n<header>\n{header}</header>\n{body}</article>");
    shell(config, &title, &data.description, &head, &content)
}

/// Post index: title, short date and description of each post.
pub fn render_index(config: &SiteConfig, posts: &[&Entry<BlogPost>]) -> String {
    let mut list = String::from("<ul class=\"posts\">\n");
    for post in posts {
        list.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <time datetime=\"{}\">{}</time><p>{}</p></li>\n",
            post_path(&post.id),
            escape_html(&post.data.title),
            format_date_iso(post.data.publish_date),
            format_date_short(post.data.publish_date),
            escape_html(&post.data.description),
        ));
    }
    list.push_str("</ul>\n");

    let site = &config.site;
    let content = format!("<h1>{}</h1>\n{list}", escape_html(&site.title));
    shell(config, &site.title, &site.description, "", &content)
}

fn shell(config: &SiteConfig, title: &str, description: &str, head: &str, content: &str) -> String {
    let site = &config.site;
    let feed = if config.build.rss {
        format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="/{}">
"#,
            escape_html(&site.title),
            config
                .build
                .rss_path()
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
{feed}{head}</head>
<body>
{content}
</body>
</html>
"#,
        lang = escape_html(&site.language),
        title = escape_html(title),
        description = escape_html(description),
    )
}
