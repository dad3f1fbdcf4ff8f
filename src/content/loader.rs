//! Collection loading from the file system.
//!
//! Files matching the collection glob are parsed in parallel. Each file must
//! carry front matter that validates against the collection schema.

use super::{Collection, ContentError, Entry, Schema, frontmatter};
use crate::{config::CollectionConfig, log, utils::slug::entry_id};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use wax::Glob;

/// Load and validate every entry of one collection.
///
/// A missing base directory yields an empty collection.
pub fn load_collection<T: Schema>(config: &CollectionConfig) -> Result<Collection<T>, ContentError> {
    if !config.base.is_dir() {
        log!("content"; "{} directory `{}` not found, collection is empty", T::COLLECTION, config.base.display());
        return Collection::from_entries(T::COLLECTION, Vec::new());
    }

    let files = collect_files(config)?;
    let entries = files
        .par_iter()
        .map(|path| load_entry::<T>(&config.base, path))
        .collect::<Result<Vec<_>, _>>()?;

    Collection::from_entries(T::COLLECTION, entries)
}

/// Collect files under `base` matching the collection glob, sorted by path.
fn collect_files(config: &CollectionConfig) -> Result<Vec<PathBuf>, ContentError> {
    let glob_error = |message: String| ContentError::Glob {
        base: config.base.clone(),
        pattern: config.pattern.clone(),
        message,
    };

    let glob = Glob::new(&config.pattern).map_err(|err| glob_error(err.to_string()))?;

    let mut files = Vec::new();
    for entry in glob.walk(&config.base) {
        let entry = entry.map_err(|err| glob_error(err.to_string()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Read one file and validate its front matter.
fn load_entry<T: Schema>(base: &Path, path: &Path) -> Result<Entry<T>, ContentError> {
    let content =
        fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    let (yaml, body) = frontmatter::split(&content)
        .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;

    let schema_error = |message: String| ContentError::Schema {
        path: path.to_path_buf(),
        message,
    };
    let data: T = serde_yaml_ng::from_str(yaml).map_err(|err| schema_error(err.to_string()))?;
    data.validate().map_err(schema_error)?;

    let relative = path.strip_prefix(base).unwrap_or(path);
    Ok(Entry {
        id: entry_id(relative),
        path: path.to_path_buf(),
        data,
        body: body.to_owned(),
    })
}
