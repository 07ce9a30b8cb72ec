use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// What is left of a session after it is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTab {
    pub url: String,
    pub title: String,
    /// RFC 3339
    pub closed_at: String,
}

/// Bounded stack of recently closed tabs. Oldest entries fall off first.
#[derive(Debug, Clone)]
pub struct ClosedTabs {
    stack: VecDeque<ClosedTab>,
    capacity: usize,
}

impl ClosedTabs {
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: VecDeque::new(),
            capacity,
        }
    }

    pub fn archive(&mut self, tab: ClosedTab) {
        if self.capacity == 0 {
            return;
        }
        log::debug!("[ClosedTabs] Archived '{}' at URL: {}", tab.title, tab.url);
        self.stack.push_back(tab);
        if self.stack.len() > self.capacity {
            self.stack.pop_front();
        }
    }

    /// Most recently closed tab (LIFO).
    pub fn pop(&mut self) -> Option<ClosedTab> {
        self.stack.pop_back()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(url: &str) -> ClosedTab {
        ClosedTab {
            url: url.to_string(),
            title: url.to_string(),
            closed_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_archive_and_pop_lifo() {
        let mut tabs = ClosedTabs::new(5);
        tabs.archive(closed("https://a.test"));
        tabs.archive(closed("https://b.test"));

        assert_eq!(tabs.pop().map(|t| t.url).as_deref(), Some("https://b.test"));
        assert_eq!(tabs.pop().map(|t| t.url).as_deref(), Some("https://a.test"));
        assert!(tabs.pop().is_none());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut tabs = ClosedTabs::new(2);
        tabs.archive(closed("https://a.test"));
        tabs.archive(closed("https://b.test"));
        tabs.archive(closed("https://c.test"));

        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.pop().map(|t| t.url).as_deref(), Some("https://c.test"));
        assert_eq!(tabs.pop().map(|t| t.url).as_deref(), Some("https://b.test"));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut tabs = ClosedTabs::new(0);
        tabs.archive(closed("https://a.test"));
        assert!(tabs.is_empty());
    }
}
