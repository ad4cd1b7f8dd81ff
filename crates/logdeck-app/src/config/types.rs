//! Configuration types for logdeck
//!
//! Defines:
//! - `ViewerSettings` - Global viewer settings (.logdeck/config.toml)
//! - Section types for filters, the session tree, search and display

use chrono::Duration;
use logdeck_core::LogLevel;
use serde::{Deserialize, Serialize};

/// Default number of sessions shown directly under "Today"
pub const DEFAULT_OVERFLOW_THRESHOLD: usize = 10;

/// Default width of the "This week" window, in days
pub const DEFAULT_WEEK_WINDOW_DAYS: u32 = 7;

/// Viewer settings (.logdeck/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub filter: FilterSettings,

    #[serde(default)]
    pub tree: TreeSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

/// Filter settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Levels whose checkbox starts checked
    #[serde(default = "default_levels")]
    pub default_levels: Vec<LogLevel>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            default_levels: default_levels(),
        }
    }
}

/// Debug output is opt-in
fn default_levels() -> Vec<LogLevel> {
    vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]
}

/// Session tree settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TreeSettings {
    /// Direct entries under "Today" before the rest move to "Older"
    #[serde(default = "default_overflow_threshold")]
    pub overflow_threshold: usize,

    /// Sessions newer than this many days (but not today) go to "This week"
    #[serde(default = "default_week_window_days")]
    pub week_window_days: u32,
}

impl TreeSettings {
    pub fn week_window(&self) -> Duration {
        Duration::days(i64::from(self.week_window_days))
    }
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            overflow_threshold: default_overflow_threshold(),
            week_window_days: default_week_window_days(),
        }
    }
}

fn default_overflow_threshold() -> usize {
    DEFAULT_OVERFLOW_THRESHOLD
}

fn default_week_window_days() -> u32 {
    DEFAULT_WEEK_WINDOW_DAYS
}

/// How the search text is matched against record messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Query appears anywhere in the message
    #[default]
    Substring,
    /// Every query word appears as a whole word of the message
    Token,
    /// Query is a regular expression
    Regex,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Substring => write!(f, "substring"),
            SearchMode::Token => write!(f, "token"),
            SearchMode::Regex => write!(f, "regex"),
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub mode: SearchMode,

    #[serde(default)]
    pub case_sensitive: bool,
}

/// Display settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// Hide the one-line message while details or the stack trace are open
    #[serde(default)]
    pub hide_message_when_expanded: bool,
}
