//! # History
//!
//! Linear undo/redo log over snapshots of the document's node tree.
//!
//! ## Design
//!
//! - Each entry is a full copy of the content at the time it was pushed
//! - The index points at the snapshot matching the live document
//! - Pushing content equal to the current snapshot is skipped
//! - Pushing anything else discards the redo branch first
//! - Optional `max_levels` drops the oldest snapshots

use crate::node::ContentNode;
use chrono::{DateTime, TimeZone, Utc};

/// One snapshot in the log
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub content: Vec<ContentNode>,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(content: Vec<ContentNode>) -> Self {
        Self {
            content,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Undo/redo log for a single editing session
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,

    /// Current snapshot; `None` until the first push
    index: Option<usize>,

    /// Maximum number of snapshots kept (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            max_levels,
        }
    }

    /// Record `content` as the newest snapshot.
    ///
    /// Returns `false` (and leaves the log untouched) when `content` equals
    /// the snapshot at the current index.
    pub fn push(&mut self, content: &[ContentNode]) -> bool {
        if self.current().is_some_and(|entry| entry.content == content) {
            return false;
        }

        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry::new(content.to_vec()));

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            let excess = self.entries.len() - self.max_levels;
            self.entries.drain(..excess);
        }

        self.index = Some(self.entries.len() - 1);
        true
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> Option<&[ContentNode]> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                Some(&self.entries[i - 1].content)
            }
            _ => None,
        }
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> Option<&[ContentNode]> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);
                Some(&self.entries[i + 1].content)
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use crate::node::Content;

    fn doc(text: &str) -> Vec<ContentNode> {
        vec![ContentNode::new("h1", NodeKind::Heading).with_content(Content::text(text))]
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.index(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_skips_identical_content() {
        let mut history = History::new();

        assert!(history.push(&doc("a")));
        assert!(!history.push(&doc("a")));
        assert_eq!(history.len(), 1);

        assert!(history.push(&doc("b")));
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), Some(1));
    }

    #[test]
    fn test_undo_and_redo() {
        let mut history = History::new();
        history.push(&doc("a"));
        history.push(&doc("b"));

        let undone = history.undo().unwrap().to_vec();
        assert_eq!(undone, doc("a"));
        assert!(history.undo().is_none());
        assert!(history.can_redo());

        let redone = history.redo().unwrap().to_vec();
        assert_eq!(redone, doc("b"));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_new_push_clears_redo() {
        let mut history = History::new();
        history.push(&doc("a"));
        history.push(&doc("b"));
        history.undo();

        history.push(&doc("c"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().content, doc("c"));
    }

    #[test]
    fn test_dedup_compares_against_current_index() {
        let mut history = History::new();
        history.push(&doc("a"));
        history.push(&doc("b"));
        history.undo();

        // Equal to the newest entry but not the current one
        assert!(history.push(&doc("b")));
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), Some(1));
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(2);
        for text in ["a", "b", "c"] {
            history.push(&doc(text));
        }

        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), Some(1));
        assert_eq!(history.entries()[0].content, doc("b"));
    }

    #[test]
    fn test_entry_timestamp() {
        let entry = HistoryEntry::new(doc("a"));
        assert!(entry.saved_at().is_some());
    }
}
