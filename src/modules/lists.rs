// History and bookmark lists. Both persist through a ListStore after
// every mutation.

use std::sync::Arc;

use crate::modules::list_store::ListStore;

pub const HISTORY_KEY: &str = "history";
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Every navigation, in order. Repeat visits are kept as separate entries.
pub struct HistoryList {
    entries: Vec<String>,
    store: Arc<dyn ListStore>,
}

impl HistoryList {
    pub fn load(store: Arc<dyn ListStore>) -> Self {
        let entries = store.load(HISTORY_KEY);
        log::debug!("[History] Loaded {} entries", entries.len());
        Self { entries, store }
    }

    pub fn append(&mut self, url: impl Into<String>) {
        self.entries.push(url.into());
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
        log::info!("[History] Cleared");
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        self.store.save(HISTORY_KEY, &self.entries);
    }
}

/// Bookmarked URLs in insertion order, without duplicates.
pub struct BookmarkList {
    entries: Vec<String>,
    store: Arc<dyn ListStore>,
}

impl BookmarkList {
    pub fn load(store: Arc<dyn ListStore>) -> Self {
        let mut entries: Vec<String> = Vec::new();
        for url in store.load(BOOKMARKS_KEY) {
            if !entries.contains(&url) {
                entries.push(url);
            }
        }
        log::debug!("[Bookmarks] Loaded {} entries", entries.len());
        Self { entries, store }
    }

    /// Returns false (and writes nothing) if `url` is already bookmarked.
    pub fn add(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.contains(&url) {
            return false;
        }
        self.entries.push(url);
        self.persist();
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|u| u != url);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|u| u == url)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        self.store.save(BOOKMARKS_KEY, &self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::list_store::MemoryStore;

    #[test]
    fn test_history_keeps_duplicates_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryList::load(store.clone());

        history.append("https://a.test");
        history.append("https://a.test");
        assert_eq!(history.len(), 2);
        assert_eq!(
            store.raw(HISTORY_KEY).as_deref(),
            Some("[\"https://a.test\",\"https://a.test\"]")
        );

        history.clear();
        assert!(history.is_empty());
        assert_eq!(store.raw(HISTORY_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_history_reload_from_store() {
        let store = Arc::new(MemoryStore::new());
        HistoryList::load(store.clone()).append("https://a.test");

        let reloaded = HistoryList::load(store);
        assert_eq!(reloaded.entries(), ["https://a.test".to_string()]);
    }

    #[test]
    fn test_bookmark_dedup() {
        let store = Arc::new(MemoryStore::new());
        let mut bookmarks = BookmarkList::load(store.clone());

        assert!(bookmarks.add("https://a.test"));
        assert!(!bookmarks.add("https://a.test"));
        assert!(bookmarks.add("https://b.test"));

        assert_eq!(bookmarks.entries(), ["https://a.test".to_string(), "https://b.test".to_string()]);
        assert_eq!(BookmarkList::load(store).len(), 2);
    }

    #[test]
    fn test_bookmark_remove() {
        let store = Arc::new(MemoryStore::new());
        let mut bookmarks = BookmarkList::load(store.clone());
        bookmarks.add("https://a.test");
        bookmarks.add("https://b.test");

        assert!(bookmarks.remove("https://a.test"));
        assert!(!bookmarks.remove("https://a.test"));
        assert_eq!(bookmarks.entries(), ["https://b.test".to_string()]);
        assert_eq!(store.raw(BOOKMARKS_KEY).as_deref(), Some("[\"https://b.test\"]"));
    }

    #[test]
    fn test_bookmarks_loaded_with_duplicates_are_collapsed() {
        let store = Arc::new(MemoryStore::new());
        store.put_raw(BOOKMARKS_KEY, "[\"https://a.test\",\"https://b.test\",\"https://a.test\"]");

        let bookmarks = BookmarkList::load(store);
        assert_eq!(bookmarks.entries(), ["https://a.test".to_string(), "https://b.test".to_string()]);
    }
}
