//! Front matter extraction.
//!
//! A front matter block is YAML between two `---` lines at the very top of
//! the file:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! Body starts here.
//! ```

const FENCE: &str = "---";

/// Split a document into its YAML front matter and markdown body.
///
/// Returns `None` when the document does not start with a `---` line or the
/// block is never closed.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = strip_fence_line(content)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Strip the opening `---` line, tolerating trailing whitespace and CRLF.
fn strip_fence_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(FENCE)?;
    let (line, rest) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    line.trim().is_empty().then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let (yaml, body) = split("---\ntitle: Hello\n---\nBody\n").unwrap();
        assert_eq!(yaml, "title: Hello\n");
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let (yaml, body) = split("\u{feff}---\r\ntitle: Hello\r\n---\r\nBody").unwrap();
        assert_eq!(yaml, "title: Hello\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_block_and_body() {
        let (yaml, body) = split("---\n---\n").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_body_keeps_later_rules() {
        let (_, body) = split("---\na: 1\n---\nintro\n\n---\n\nmore").unwrap();
        assert_eq!(body, "intro\n\n---\n\nmore");
    }

    #[test]
    fn test_split_missing() {
        assert!(split("# Just markdown").is_none());
        assert!(split("").is_none());
        assert!(split("---\ntitle: never closed\n").is_none());
        assert!(split("----\ntitle: x\n---\n").is_none());
        assert!(split("\n---\ntitle: x\n---\n").is_none());
    }
}
