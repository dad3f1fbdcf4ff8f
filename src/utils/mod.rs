//! Utility modules shared by the loaders, generators and fetchers.

pub mod date;
pub mod markdown;
pub mod slug;
pub mod xml;
