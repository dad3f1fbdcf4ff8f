//! News from a remote rss feed.
//!
//! Only `rss > channel > item` elements are read. Per item:
//!
//! | Element         | Field         | When missing |
//! |-----------------|---------------|--------------|
//! | `<title>`       | `title`       | `""`         |
//! | `<link>`        | `link`        | `""`         |
//! | `<description>` | `description` | `""`         |
//! | `<pubDate>`     | `pub_date`    | now          |
//! | `<category>`    | `category`    | `None`       |
//!
//! Elements are matched by qualified name, so namespaced extensions such as
//! `<media:title>` or `<dc:title>` never fill these fields.

use super::{FetchError, fetch_text, log_error};
use crate::utils::{
    date::parse_date,
    xml::{create_xml_reader, text_content},
};
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use serde::Serialize;
use std::mem;

/// One normalized feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Fetch the feed at `url`, newest items first.
///
/// `limit` keeps the first N items after sorting; `None` or `Some(0)` keeps all.
pub fn fetch_news(url: &str, limit: Option<usize>) -> Result<Vec<FeedItem>, FetchError> {
    let xml = fetch_text(url).inspect_err(log_error)?;
    let items = parse_feed(&xml, Utc::now())
        .map_err(|err| FetchError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        })
        .inspect_err(log_error)?;

    Ok(sort_and_limit(items, limit))
}

/// Newest first (stable), then truncate.
pub fn sort_and_limit(mut items: Vec<FeedItem>, limit: Option<usize>) -> Vec<FeedItem> {
    items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    if let Some(limit) = limit.filter(|&n| n > 0) {
        items.truncate(limit);
    }
    items
}

// ============================================================================
// Parsing
// ============================================================================

const CHANNEL_PATH: &[&[u8]] = &[b"rss", b"channel"];
const ITEM_PATH: &[&[u8]] = &[b"rss", b"channel", b"item"];

/// Item fields as they appear in the document.
#[derive(Default)]
struct RawItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
    category: Option<String>,
}

impl RawItem {
    fn set(&mut self, element: &[u8], value: String) {
        let slot = match element {
            b"title" => &mut self.title,
            b"link" => &mut self.link,
            b"description" => &mut self.description,
            b"pubDate" => &mut self.pub_date,
            b"category" if self.category.is_none() => &mut self.category,
            _ => return,
        };
        *slot = Some(value);
    }

    fn finish(self, now: DateTime<Utc>) -> FeedItem {
        FeedItem {
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            pub_date: self.pub_date.as_deref().and_then(parse_date).unwrap_or(now),
            category: self.category,
        }
    }
}

fn path_is(path: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

/// Parse an rss document into items in document order.
///
/// Items without a parseable `<pubDate>` are dated `now`.
pub fn parse_feed(xml: &str, now: DateTime<Utc>) -> Result<Vec<FeedItem>, quick_xml::Error> {
    let mut reader = create_xml_reader(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if path_is(&path, CHANNEL_PATH) && name == b"item" {
                    current = Some(RawItem::default());
                }
                if path_is(&path, ITEM_PATH) {
                    text.clear();
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if path_is(&path, CHANNEL_PATH) && e.name().as_ref() == b"item" {
                    items.push(RawItem::default().finish(now));
                }
            }
            Event::Text(t) if current.is_some() => text.push_str(&text_content(&t)),
            Event::CData(c) if current.is_some() => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(_) => {
                let name = path.pop().unwrap_or_default();
                if path_is(&path, ITEM_PATH) {
                    if let Some(item) = current.as_mut() {
                        item.set(&name, mem::take(&mut text).trim().to_string());
                    }
                } else if path_is(&path, CHANNEL_PATH)
                    && name == b"item"
                    && let Some(item) = current.take()
                {
                    items.push(item.finish(now));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}
