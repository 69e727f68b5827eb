use crate::source::SourceKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Fetched item lists keyed by source.
///
/// Owned by whoever drives loading and handed to the loaders; clones share
/// the same entries. Fallback lists are never stored here.
#[derive(Debug)]
pub struct ItemCache<T> {
    entries: Arc<RwLock<HashMap<SourceKey, Arc<[T]>>>>,
}

impl<T> Clone for ItemCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for ItemCache<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Clone> ItemCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SourceKey) -> Option<Vec<T>> {
        self.entries.read().get(key).map(|items| items.to_vec())
    }

    pub fn insert(&self, key: SourceKey, items: Vec<T>) {
        self.entries.write().insert(key, items.into());
    }

    pub fn invalidate(&self, key: &SourceKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let cache: ItemCache<u32> = ItemCache::new();
        let other = cache.clone();
        cache.insert(SourceKey::from("reviews"), vec![1, 2, 3]);

        assert_eq!(other.get(&SourceKey::from("reviews")), Some(vec![1, 2, 3]));
        assert_eq!(other.len(), 1);
        assert!(other.invalidate(&SourceKey::from("reviews")));
        assert!(!cache.invalidate(&SourceKey::from("reviews")));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_leaves_other_sources() {
        let cache: ItemCache<&str> = ItemCache::new();
        cache.insert(SourceKey::from("a"), vec!["x"]);
        cache.insert(SourceKey::from("b"), vec!["y"]);
        assert!(cache.invalidate(&SourceKey::from("a")));
        assert_eq!(cache.get(&SourceKey::from("a")), None);
        assert_eq!(cache.get(&SourceKey::from("b")), Some(vec!["y"]));
    }
}
