//! Markdown to HTML rendering using pulldown-cmark.
//!
//! The parser's event stream is rewritten before it reaches the HTML writer:
//!
//! | Event                        | Rewrite                                        |
//! |------------------------------|------------------------------------------------|
//! | soft break (`breaks`)        | `<br />`                                       |
//! | bare `http(s)://`, `www.` or email text | `<a href=...>` (`autolink`)         |
//! | link to another origin       | `target` / `rel` from `[markdown.external_links]` |
//! | fenced / indented code block | `<pre>` carrying `[markdown.highlight]` themes |

use crate::config::{ExternalLinksConfig, HighlightConfig, MarkdownConfig};
use crate::utils::xml::escape_html;
use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;
use std::sync::LazyLock;

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions<'c> {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
    /// Treat single newlines inside a paragraph as line breaks.
    pub breaks: bool,
    /// Turn bare URLs in text into links.
    pub autolink: bool,
    /// Attributes for links leaving the site.
    pub external_links: Option<&'c ExternalLinksConfig>,
    /// Theme annotation for code blocks.
    pub highlight: Option<&'c HighlightConfig>,
}

impl<'c> MarkdownOptions<'c> {
    /// GitHub-flavored markdown with line breaks, as used for remote documents.
    pub fn github() -> Self {
        Self {
            gfm: true,
            breaks: true,
            autolink: true,
            ..Self::default()
        }
    }

    /// Rules for post bodies, taken from `[markdown]`.
    pub fn site(config: &'c MarkdownConfig) -> Self {
        Self {
            gfm: true,
            breaks: false,
            autolink: true,
            external_links: Some(&config.external_links),
            highlight: Some(&config.highlight),
        }
    }

    fn parser_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.gfm {
            opts.insert(Options::ENABLE_TABLES);
            opts.insert(Options::ENABLE_STRIKETHROUGH);
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Render markdown to an HTML string.
///
/// The output is not sanitized; raw HTML in the source passes through.
pub fn render(markdown: &str, options: &MarkdownOptions<'_>) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(markdown, options.parser_options()));

    let mut rewriter = Rewriter::new(*options);
    for event in parser {
        rewriter.push(event);
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, rewriter.events.into_iter());
    out
}

/// Check if a link points to another origin (`http:`, `https:` or `//`).
pub fn is_external_link(link: &str) -> bool {
    link.starts_with("//")
        || link.split_once(':').is_some_and(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        })
}

// ============================================================================
// Event Rewriting
// ============================================================================

struct Rewriter<'a, 'c> {
    options: MarkdownOptions<'c>,
    events: Vec<Event<'a>>,
    /// One flag per open link: true if it was replaced by raw HTML.
    links: Vec<bool>,
    in_code_block: bool,
    image_depth: usize,
}

impl<'a, 'c> Rewriter<'a, 'c> {
    fn new(options: MarkdownOptions<'c>) -> Self {
        Self {
            options,
            events: Vec::new(),
            links: Vec::new(),
            in_code_block: false,
            image_depth: 0,
        }
    }

    fn push(&mut self, event: Event<'a>) {
        match event {
            Event::SoftBreak if self.options.breaks => self.events.push(Event::HardBreak),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                if let Some(external) = self.options.external_links
                    && is_external_link(&dest_url)
                {
                    self.links.push(true);
                    let anchor = open_anchor(&dest_url, &title, Some(external));
                    self.events.push(Event::InlineHtml(anchor.into()));
                } else {
                    self.links.push(false);
                    self.events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    }));
                }
            }
            Event::End(TagEnd::Link) => {
                if self.links.pop() == Some(true) {
                    self.events.push(Event::InlineHtml("</a>".into()));
                } else {
                    self.events.push(Event::End(TagEnd::Link));
                }
            }
            Event::Start(Tag::Image { .. }) => {
                self.image_depth += 1;
                self.events.push(event);
            }
            Event::End(TagEnd::Image) => {
                self.image_depth = self.image_depth.saturating_sub(1);
                self.events.push(event);
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                self.in_code_block = true;
                match self.options.highlight {
                    Some(highlight) => {
                        let open = open_code_block(&kind, highlight);
                        self.events.push(Event::Html(open.into()));
                    }
                    None => self.events.push(Event::Start(Tag::CodeBlock(kind))),
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                match self.options.highlight {
                    Some(_) => self.events.push(Event::Html("</code></pre>\n".into())),
                    None => self.events.push(event),
                }
            }
            Event::Text(text) if self.can_autolink() => self.push_autolinked(text),
            other => self.events.push(other),
        }
    }

    fn can_autolink(&self) -> bool {
        self.options.autolink && self.links.is_empty() && !self.in_code_block && self.image_depth == 0
    }

    /// Split a text node around bare URLs, `www.` hosts and email addresses.
    fn push_autolinked(&mut self, text: CowStr<'a>) {
        static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r#"(?:https?://|www\.)[^\s<>"]+|[A-Za-z0-9._+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}"#,
            )
            .unwrap()
        });

        let mut pieces = Vec::new();
        let mut last = 0;
        for found in RE_URL.find_iter(&text) {
            let start = found.start();
            if text[..start].chars().next_back().is_some_and(char::is_alphanumeric) {
                continue;
            }
            let Some((url, href)) = autolink_target(found.as_str()) else {
                continue;
            };
            if start > last {
                pieces.push(Event::Text(text[last..start].to_owned().into()));
            }
            let external = self.options.external_links;
            pieces.push(Event::InlineHtml(open_anchor(&href, "", external).into()));
            pieces.push(Event::Text(url.to_owned().into()));
            pieces.push(Event::InlineHtml("</a>".into()));
            last = start + url.len();
        }

        if pieces.is_empty() {
            self.events.push(Event::Text(text));
            return;
        }
        if last < text.len() {
            pieces.push(Event::Text(text[last..].to_owned().into()));
        }
        self.events.extend(pieces);
    }
}

/// Visible text and `href` for a bare link match, or `None` when nothing
/// linkable is left after trimming.
fn autolink_target(found: &str) -> Option<(&str, String)> {
    if found.contains('@') && !found.contains("://") && !found.starts_with("www.") {
        return Some((found, format!("mailto:{found}")));
    }

    let url = trim_url_tail(found);
    if let Some(host) = url.strip_prefix("www.") {
        return host.contains('.').then(|| (url, format!("http://{url}")));
    }
    (url.len() > "https://".len()).then(|| (url, url.to_string()))
}

/// Drop trailing punctuation and unbalanced closing parens from a bare URL.
fn trim_url_tail(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '*', '_', '~', '\'']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if trimmed.matches('(').count() < trimmed.matches(')').count() => inner,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

fn open_anchor(href: &str, title: &str, external: Option<&ExternalLinksConfig>) -> String {
    let mut anchor = format!(r#"<a href="{}""#, escape_html(href));
    if !title.is_empty() {
        anchor.push_str(&format!(r#" title="{}""#, escape_html(title)));
    }
    if let Some(external) = external
        && is_external_link(href)
    {
        if !external.target.is_empty() {
            anchor.push_str(&format!(r#" target="{}""#, escape_html(&external.target)));
        }
        let rel = external.rel_value();
        if !rel.is_empty() {
            anchor.push_str(&format!(r#" rel="{}""#, escape_html(&rel)));
        }
    }
    anchor.push('>');
    anchor
}

fn open_code_block(kind: &CodeBlockKind<'_>, highlight: &HighlightConfig) -> String {
    let lang = match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or_default(),
        CodeBlockKind::Indented => "",
    };

    let mut pre = format!(
        r#"<pre class="highlight" data-theme-light="{}" data-theme-dark="{}""#,
        escape_html(&highlight.light),
        escape_html(&highlight.dark)
    );
    if highlight.wrap {
        pre.push_str(r#" style="white-space: pre-wrap; overflow-wrap: anywhere""#);
    }
    pre.push('>');

    if lang.is_empty() {
        pre.push_str("<code>");
    } else {
        pre.push_str(&format!(r#"<code class="language-{}">"#, escape_html(lang)));
    }
    pre
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_config() -> MarkdownConfig {
        MarkdownConfig::default()
    }

    #[test]
    fn test_github_tables() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let html = render(md, &MarkdownOptions::github());
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_github_breaks() {
        let html = render("line one\nline two", &MarkdownOptions::github());
        assert!(html.contains("line one<br />"));

        let html = render("line one\nline two", &MarkdownOptions::default());
        assert!(!html.contains("<br"));
    }

    #[test]
    fn test_github_strikethrough_and_tasks() {
        let html = render("~~old~~\n\n- [x] done\n", &MarkdownOptions::github());
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_autolink_bare_url() {
        let html = render(
            "Visit https://example.com/docs. Thanks",
            &MarkdownOptions::github(),
        );
        assert!(html.contains(
            r#"<a href="https://example.com/docs">https://example.com/docs</a>. Thanks"#
        ));
    }

    #[test]
    fn test_autolink_www_and_email() {
        let html = render(
            "Docs at www.example.com/guide, mail support@example.com.",
            &MarkdownOptions::github(),
        );
        assert!(html.contains(
            r#"<a href="http://www.example.com/guide">www.example.com/guide</a>, mail"#
        ));
        assert!(html.contains(
            r#"<a href="mailto:support@example.com">support@example.com</a>."#
        ));
    }

    #[test]
    fn test_autolink_needs_word_boundary() {
        let html = render("awww.example.com and www.localhost", &MarkdownOptions::github());
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_autolink_skips_code_and_links() {
        let md = "`https://a.example` and [docs](https://b.example)\n\n```\nhttps://c.example\n```\n";
        let html = render(md, &MarkdownOptions::github());
        assert!(!html.contains(r#"href="https://a.example""#));
        assert!(!html.contains(r#"href="https://c.example""#));
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_external_links_get_target_and_rel() {
        let config = site_config();
        let html = render(
            "[out](https://example.com) and [in](/about/)",
            &MarkdownOptions::site(&config),
        );
        assert!(html.contains(
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">out</a>"#
        ));
        assert!(html.contains(r#"<a href="/about/">in</a>"#));
    }

    #[test]
    fn test_external_autolink_gets_target() {
        let config = site_config();
        let html = render("see https://example.com", &MarkdownOptions::site(&config));
        assert!(html.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_code_block_themes() {
        let config = site_config();
        let html = render(
            "```rust\nfn main() { 1 < 2; }\n```\n",
            &MarkdownOptions::site(&config),
        );
        assert!(html.contains(r#"data-theme-light="github-light""#));
        assert!(html.contains(r#"data-theme-dark="github-dark""#));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("fn main() { 1 &lt; 2; }"));
        assert!(html.contains("</code></pre>"));
    }

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("HTTP://example.com"));
        assert!(is_external_link("//cdn.example.com/x.js"));
        assert!(!is_external_link("/blog/post/"));
        assert!(!is_external_link("#heading"));
        assert!(!is_external_link("mailto:someone@example.com"));
        assert!(!is_external_link("../image.png"));
    }

    #[test]
    fn test_trim_url_tail() {
        assert_eq!(trim_url_tail("https://a.example/x."), "https://a.example/x");
        assert_eq!(trim_url_tail("https://a.example/x)."), "https://a.example/x");
        assert_eq!(
            trim_url_tail("https://en.wikipedia.org/wiki/Rust_(language)"),
            "https://en.wikipedia.org/wiki/Rust_(language)"
        );
    }
}
