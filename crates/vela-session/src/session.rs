//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single open tab as persisted. The store treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabEntry {
    /// Unique identifier
    pub id: String,
    /// Last committed URL, if the tab ever navigated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Page title
    #[serde(default)]
    pub title: String,
    /// When the tab was opened
    pub created_at: DateTime<Utc>,
}

impl TabEntry {
    pub fn new(url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            title: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Ordered set of open tabs restored at launch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Open tabs in display order
    pub tabs: Vec<TabEntry>,
    /// Index of the selected tab, always within `tabs` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
}

impl Session {
    pub fn new(tabs: Vec<TabEntry>) -> Self {
        let current_index = if tabs.is_empty() { None } else { Some(0) };
        Self {
            tabs,
            current_index,
        }
    }

    /// Append a tab. The first tab added to an empty session becomes current.
    pub fn add_tab(&mut self, tab: TabEntry) {
        if self.tabs.iter().any(|t| t.id == tab.id) {
            return;
        }
        self.tabs.push(tab);
        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
    }

    /// Remove a tab by id, keeping the selection on a neighbouring tab
    pub fn remove_tab(&mut self, tab_id: &str) -> Option<TabEntry> {
        let index = self.tabs.iter().position(|t| t.id == tab_id)?;
        let removed = self.tabs.remove(index);

        self.current_index = match self.current_index {
            _ if self.tabs.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(self.tabs.len() - 1)),
            None => None,
        };

        Some(removed)
    }

    /// Move a tab to a new position; the selected tab stays selected
    pub fn move_tab(&mut self, tab_id: &str, new_index: usize) {
        let selected_id = self.current_tab().map(|t| t.id.clone());

        if let Some(current_index) = self.tabs.iter().position(|t| t.id == tab_id) {
            let tab = self.tabs.remove(current_index);
            let insert_index = new_index.min(self.tabs.len());
            self.tabs.insert(insert_index, tab);
        }

        if let Some(selected_id) = selected_id {
            self.current_index = self.tabs.iter().position(|t| t.id == selected_id);
        }
    }

    /// Select the tab at `index`. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.current_index = Some(index);
            true
        } else {
            false
        }
    }

    pub fn current_tab(&self) -> Option<&TabEntry> {
        self.current_index.and_then(|i| self.tabs.get(i))
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str) -> TabEntry {
        let mut tab = TabEntry::new(Some(format!("https://{id}.example")));
        tab.id = id.to_string();
        tab
    }

    fn ids(session: &Session) -> Vec<&str> {
        session.tabs.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_new_session() {
        assert_eq!(Session::new(Vec::new()).current_index, None);

        let session = Session::new(vec![tab("a"), tab("b")]);
        assert_eq!(session.current_index, Some(0));
        assert_eq!(session.tab_count(), 2);
    }

    #[test]
    fn test_tab_order() {
        let mut session = Session::default();

        session.add_tab(tab("tab-1"));
        session.add_tab(tab("tab-2"));
        session.add_tab(tab("tab-3"));
        session.add_tab(tab("tab-2"));

        assert_eq!(ids(&session), vec!["tab-1", "tab-2", "tab-3"]);
        assert_eq!(session.current_index, Some(0));

        // Move tab-3 to the beginning; tab-1 stays selected
        session.move_tab("tab-3", 0);
        assert_eq!(ids(&session), vec!["tab-3", "tab-1", "tab-2"]);
        assert_eq!(session.current_tab().unwrap().id, "tab-1");

        // Remove tab-1
        session.remove_tab("tab-1");
        assert_eq!(ids(&session), vec!["tab-3", "tab-2"]);
        assert_eq!(session.current_index, Some(1));
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let mut session = Session::new(vec![tab("a"), tab("b"), tab("c")]);
        assert!(session.select(2));

        session.remove_tab("a");
        assert_eq!(session.current_tab().unwrap().id, "c");

        session.remove_tab("c");
        assert_eq!(session.current_tab().unwrap().id, "b");

        session.remove_tab("b");
        assert_eq!(session.current_index, None);
        assert!(session.is_empty());

        assert!(session.remove_tab("missing").is_none());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = Session::new(vec![tab("a")]);
        assert!(!session.select(1));
        assert_eq!(session.current_index, Some(0));
    }
}
