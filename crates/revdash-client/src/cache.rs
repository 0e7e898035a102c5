//! Keyed cache of fetched query results with tag-based invalidation.
//!
//! Every entry carries one or more tags. A successful mutation invalidates
//! whole tags (`reviews`, `dashboard`) so the next read of any affected
//! query goes back to the backend.

use std::collections::{HashMap, HashSet};

/// Tag carried by every review-list query.
pub const TAG_REVIEWS: &str = "reviews";
/// Tag carried by the dashboard statistics query.
pub const TAG_DASHBOARD: &str = "dashboard";

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    tags: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    by_tag: HashMap<&'static str, HashSet<String>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            by_tag: HashMap::new(),
        }
    }
}

impl<V> QueryCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `value` under `key`, replacing any previous entry and its tags.
    pub fn insert(&mut self, key: impl Into<String>, value: V, tags: &[&'static str]) {
        let key = key.into();
        self.remove(&key);
        for tag in tags {
            self.by_tag.entry(*tag).or_default().insert(key.clone());
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                tags: tags.to_vec(),
            },
        );
    }

    /// Drop a single entry. Returns the cached value if there was one.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        for tag in &entry.tags {
            if let Some(keys) = self.by_tag.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }
        Some(entry.value)
    }

    /// Drop every entry carrying `tag`. Returns how many were removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let Some(keys) = self.by_tag.remove(tag) else {
            return 0;
        };
        let mut removed = 0;
        for key in keys {
            if self.remove(&key).is_some() {
                removed += 1;
            }
        }
        tracing::debug!(tag, removed, "invalidated cached queries");
        removed
    }

    /// Drop every entry carrying any of `tags`.
    pub fn invalidate_tags(&mut self, tags: &[&str]) -> usize {
        tags.iter().map(|t| self.invalidate_tag(t)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
