//! Client-side filtering of list results already fetched in full.

use signet_types::{Signature, Verification};

/// Something a list search box can match against.
pub trait Searchable {
    /// `needle` is already lower-cased.
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for Signature {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.id.to_lowercase().contains(needle)
    }
}

impl Searchable for Verification {
    fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
    }
}

/// Case-insensitive substring filter preserving input order. An empty query
/// keeps everything.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}
