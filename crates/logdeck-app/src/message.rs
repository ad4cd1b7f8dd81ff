//! Message types for the viewer (TEA pattern)

use chrono::{DateTime, Local};
use logdeck_core::LogLevel;

use crate::config::SearchMode;

/// All user actions the viewer reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Display the session with this start timestamp
    SelectSession(DateTime<Local>),

    // ─────────────────────────────────────────────────────────
    // Filter Messages
    // ─────────────────────────────────────────────────────────
    /// Flip one level checkbox
    ToggleLevel(LogLevel),
    /// Flip one context checkbox
    ToggleContext(String),
    /// Check every context checkbox
    EnableAllContexts,
    /// Uncheck every context checkbox
    DisableAllContexts,
    /// Replace the search text
    SetSearchQuery(String),
    SetSearchMode(SearchMode),
    SetCaseSensitive(bool),
    ClearSearch,
    /// Restore the configured default filters
    ResetFilters,

    // ─────────────────────────────────────────────────────────
    // Disclosure Messages (index into the active session)
    // ─────────────────────────────────────────────────────────
    ToggleDetails(usize),
    ToggleStack(usize),
    /// Close every open details/stack section
    CollapseAll,
}
