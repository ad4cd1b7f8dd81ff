//! The currently displayed session

use chrono::{DateTime, Local};

use crate::tree::NavigationTree;

/// At most one active session, referred to by its start timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<DateTime<Local>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection a freshly built tree opens with
    pub fn from_tree(tree: &NavigationTree) -> Self {
        Self {
            active: tree.initial_selection(),
        }
    }

    pub fn active(&self) -> Option<DateTime<Local>> {
        self.active
    }

    pub fn is_active(&self, timestamp: DateTime<Local>) -> bool {
        self.active == Some(timestamp)
    }

    /// Make `timestamp` the active session, returning the one it replaces
    pub fn select(&mut self, timestamp: DateTime<Local>) -> Option<DateTime<Local>> {
        self.active.replace(timestamp)
    }

    pub fn clear(&mut self) -> Option<DateTime<Local>> {
        self.active.take()
    }
}
