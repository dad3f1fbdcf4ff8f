//! XML/HTML text helpers shared by the generators and the feed parser.

use quick_xml::{Reader, events::BytesText};

/// Create a reader for loosely formed remote documents.
#[inline]
pub fn create_xml_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    reader
}

/// Decode a text node, falling back to the raw text on unknown entities.
pub fn text_content(text: &BytesText<'_>) -> String {
    text.unescape()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(text).into_owned())
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape text for an HTML attribute or text node.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\" 'single'"), "&quot;quoted&quot; &apos;single&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry's <show>"), "Tom &amp; Jerry&#39;s &lt;show&gt;");
    }

    #[test]
    fn test_text_content_unescapes() {
        let mut reader = create_xml_reader("<t>Fish &amp; Chips &lt;3</t>");
        let mut texts = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(t) => texts.push(text_content(&t)),
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(texts, vec!["Fish & Chips <3"]);
    }

    #[test]
    fn test_text_content_keeps_unknown_entity() {
        let mut reader = create_xml_reader("<t>a&nbsp;b</t>");
        let mut texts = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(t) => texts.push(text_content(&t)),
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(texts, vec!["a&nbsp;b"]);
    }
}
