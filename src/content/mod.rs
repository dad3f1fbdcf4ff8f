//! Content collections.
//!
//! # Loading
//!
//! ```text
//! load_collections()
//!     │
//!     ├── load_collection::<Author>()   ──► parse + validate every file
//!     ├── load_collection::<BlogPost>() ──► parse + validate every file
//!     │
//!     └── Collections::resolve()        ──► check blog → authors references
//! ```
//!
//! References are only resolved once both collections are fully parsed.

mod error;
mod frontmatter;
mod loader;
mod schema;

pub use error::ContentError;
pub use loader::load_collection;
pub use schema::{Author, BlogPost, Schema};

use crate::{config::SiteConfig, log};
use std::{
    collections::{BTreeMap, btree_map},
    path::PathBuf,
};

/// One validated file of a collection.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    /// Slug derived from the path inside the collection base.
    pub id: String,
    /// Source file.
    pub path: PathBuf,
    /// Validated front matter.
    pub data: T,
    /// Markdown after the front matter block.
    pub body: String,
}

/// Entries of one collection keyed by id.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    name: &'static str,
    entries: BTreeMap<String, Entry<T>>,
}

impl<T> Collection<T> {
    /// Build a collection, rejecting two entries with the same id.
    pub fn from_entries(
        name: &'static str,
        entries: impl IntoIterator<Item = Entry<T>>,
    ) -> Result<Self, ContentError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            match map.entry(entry.id.clone()) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                btree_map::Entry::Occupied(existing) => {
                    return Err(ContentError::DuplicateId {
                        collection: name,
                        id: entry.id,
                        first: existing.get().path.clone(),
                        second: entry.path,
                    });
                }
            }
        }
        Ok(Self { name, entries: map })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, id: &str) -> Option<&Entry<T>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both collections of a site, with references resolved.
#[derive(Debug, Clone)]
pub struct Collections {
    pub authors: Collection<Author>,
    pub blog: Collection<BlogPost>,
}

impl Collections {
    /// Check that every post author exists, then bundle the collections.
    pub fn resolve(
        authors: Collection<Author>,
        blog: Collection<BlogPost>,
    ) -> Result<Self, ContentError> {
        for post in blog.iter() {
            if let Some(missing) = post.data.authors.iter().find(|id| !authors.contains(id)) {
                return Err(ContentError::UnresolvedReference {
                    path: post.path.clone(),
                    collection: authors.name(),
                    id: missing.clone(),
                });
            }
        }
        Ok(Self { authors, blog })
    }

    pub fn author(&self, id: &str) -> Option<&Entry<Author>> {
        self.authors.get(id)
    }

    /// Authors of a post, in the order the post lists them.
    pub fn authors_of<'a>(&'a self, post: &'a Entry<BlogPost>) -> impl Iterator<Item = &'a Entry<Author>> {
        post.data.authors.iter().filter_map(|id| self.author(id))
    }
}

/// Load both collections and resolve references between them.
pub fn load_collections(config: &SiteConfig) -> Result<Collections, ContentError> {
    let (authors, blog) = rayon::join(
        || load_collection::<Author>(&config.content.authors),
        || load_collection::<BlogPost>(&config.content.blog),
    );
    let collections = Collections::resolve(authors?, blog?)?;

    log!("content"; "loaded {} authors, {} posts", collections.authors.len(), collections.blog.len());
    Ok(collections)
}

/// Non-draft posts, newest first. Posts with equal dates keep id order.
pub fn published_posts(blog: &Collection<BlogPost>) -> Vec<&Entry<BlogPost>> {
    let mut posts: Vec<_> = blog.iter().filter(|post| !post.data.draft).collect();
    posts.sort_by(|a, b| b.data.publish_date.cmp(&a.data.publish_date));
    posts
}
