//! Entry identifier generation.
//!
//! Converts a path inside a collection to the id used in URLs and references.

use std::path::{Component, Path};

/// Characters dropped from ids
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '!',
    ',', ';', '&', '%', '+', '=', '@', '$', '^', '~',
];

/// Derive an entry id from a path relative to the collection base.
///
/// | Relative path                | Id              |
/// |------------------------------|-----------------|
/// | `hello-world.md`             | `hello-world`   |
/// | `2024/Release Notes.mdx`     | `2024/release-notes` |
/// | `guides/intro/index.md`      | `guides/intro`  |
pub fn entry_id(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(slugify_segment(&part.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}

/// Lowercase, strip forbidden characters, collapse whitespace runs to `-`.
fn slugify_segment(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}
