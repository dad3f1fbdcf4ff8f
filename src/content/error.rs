//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a content load. All of them are fatal at build time.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid glob `{pattern}` for `{}`: {message}", .base.display())]
    Glob {
        base: PathBuf,
        pattern: String,
        message: String,
    },

    #[error("`{}` has no front matter", .0.display())]
    MissingFrontMatter(PathBuf),

    #[error("`{}`: {message}", .path.display())]
    Schema { path: PathBuf, message: String },

    #[error("duplicate {collection} id `{id}`: `{}` and `{}`", .first.display(), .second.display())]
    DuplicateId {
        collection: &'static str,
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("`{}` references unknown {collection} entry `{id}`", .path.display())]
    UnresolvedReference {
        path: PathBuf,
        collection: &'static str,
        id: String,
    },
}
