//! Core domain type definitions

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Log severity levels
///
/// Unrecognized level names are kept verbatim in [`LogLevel::Other`] so that a
/// record never fails to load because of its level; the filter layer decides
/// what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Off,
    Other(String),
}

impl LogLevel {
    /// The four levels that appear in the level toolbar
    pub const STANDARD: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Parse a level name (case-insensitive)
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            "OFF" => LogLevel::Off,
            _ => LogLevel::Other(name.trim().to_string()),
        }
    }

    /// Canonical upper-case name, as written in snapshots and config
    pub fn name(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
            LogLevel::Other(name) => name,
        }
    }

    /// Get display prefix for log level
    pub fn prefix(&self) -> &str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Off => "OFF",
            LogLevel::Other(name) => name,
        }
    }

    /// Get numeric severity value for comparison
    /// Higher values indicate more severe levels; unknown levels rank lowest
    pub fn severity(&self) -> u8 {
        match self {
            LogLevel::Other(_) => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 3,
            LogLevel::Error => 4,
            LogLevel::Off => 5,
        }
    }

    /// Check if this is one of the levels the viewer knows about
    pub fn is_known(&self) -> bool {
        !matches!(self, LogLevel::Other(_))
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        LogLevel::parse(&value)
    }
}

impl From<&str> for LogLevel {
    fn from(value: &str) -> Self {
        LogLevel::parse(value)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.name().to_string()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker appended to the first line of a multi-line message
pub const SUMMARY_ELLIPSIS: &str = " [...]";

/// A single log line inside a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub level: LogLevel,
    pub context: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl Record {
    pub fn new(level: LogLevel, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            context: context.into(),
            message: message.into(),
            details: None,
            stack: None,
        }
    }

    /// Create an info record
    pub fn info(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, context, message)
    }

    /// Create a warning record
    pub fn warn(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, context, message)
    }

    /// Create an error record
    pub fn error(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, context, message)
    }

    /// Create a debug record
    pub fn debug(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, context, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Check if the message spans more than one line
    pub fn is_multiline(&self) -> bool {
        self.message.contains('\n')
    }

    /// One-line form of the message
    ///
    /// Multi-line messages are cut at the first line break and marked with
    /// `" [...]"`; the full text is available through [`Record::effective_details`].
    pub fn summary(&self) -> Cow<'_, str> {
        match self.message.split_once('\n') {
            Some((first, _)) => Cow::Owned(format!(
                "{}{}",
                first.trim_end_matches('\r'),
                SUMMARY_ELLIPSIS
            )),
            None => Cow::Borrowed(&self.message),
        }
    }

    /// Extended text shown by the details toggle
    ///
    /// Explicit details win; otherwise a multi-line message is its own details.
    pub fn effective_details(&self) -> Option<&str> {
        match self.details.as_deref() {
            Some(details) if !details.is_empty() => Some(details),
            _ if self.is_multiline() => Some(&self.message),
            _ => None,
        }
    }

    /// Check if this record has a details disclosure
    pub fn has_details(&self) -> bool {
        self.effective_details().is_some()
    }

    /// Check if this record carries a non-empty stack trace
    pub fn has_stack(&self) -> bool {
        self.stack.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Rendering-safe key for this record's context
    pub fn context_key(&self) -> String {
        context_key(&self.context)
    }

    /// Replace a raw context chain with its innermost context
    pub fn normalize_context(&mut self) {
        let innermost = innermost_context(&self.context);
        if innermost.len() != self.context.len() {
            self.context = innermost.to_string();
        }
    }
}

/// Innermost context of a comma-separated context chain
///
/// `"app.Root,app.net.Client"` → `"app.net.Client"`
pub fn innermost_context(chain: &str) -> &str {
    chain.rsplit(',').next().unwrap_or(chain).trim()
}

/// Derive a key usable as an identifier from a context name
///
/// Dots and dollar signs (nested type separators) become underscores.
pub fn context_key(context: &str) -> String {
    context.replace(['.', '$'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse(" Info "), LogLevel::Info);
        assert_eq!(LogLevel::parse("WARNING"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("off"), LogLevel::Off);
    }

    #[test]
    fn test_log_level_unknown_is_preserved() {
        let level = LogLevel::parse("TRACE");
        assert_eq!(level, LogLevel::Other("TRACE".to_string()));
        assert_eq!(level.name(), "TRACE");
        assert!(!level.is_known());
    }

    #[test]
    fn test_log_level_severity_ordering() {
        assert!(LogLevel::Error.severity() > LogLevel::Warn.severity());
        assert!(LogLevel::Warn.severity() > LogLevel::Info.severity());
        assert!(LogLevel::Info.severity() > LogLevel::Debug.severity());
        assert!(LogLevel::Debug.severity() > LogLevel::parse("FINE").severity());
    }

    #[test]
    fn test_log_level_serde_uses_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");

        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);

        let level: LogLevel = serde_json::from_str("\"FATAL\"").unwrap();
        assert_eq!(level, LogLevel::Other("FATAL".to_string()));
    }

    #[test]
    fn test_record_summary_single_line() {
        let record = Record::info("net", "connected");
        assert_eq!(record.summary(), "connected");
        assert!(!record.has_details());
    }

    #[test]
    fn test_record_summary_multi_line() {
        let record = Record::warn("db", "slow query\nSELECT *\nFROM t");
        assert_eq!(record.summary(), "slow query [...]");
        assert_eq!(record.effective_details(), Some("slow query\nSELECT *\nFROM t"));
        assert!(record.has_details());
    }

    #[test]
    fn test_explicit_details_win_over_multiline_message() {
        let record = Record::info("db", "line one\nline two").with_details("explained");
        assert_eq!(record.effective_details(), Some("explained"));
    }

    #[test]
    fn test_empty_stack_is_no_stack() {
        assert!(!Record::error("io", "failed").with_stack("").has_stack());
        assert!(Record::error("io", "failed")
            .with_stack("at main()")
            .has_stack());
    }

    #[test]
    fn test_innermost_context() {
        assert_eq!(innermost_context("app.Root,app.net.Client"), "app.net.Client");
        assert_eq!(innermost_context("Standalone"), "Standalone");
        assert_eq!(innermost_context("a, b "), "b");
    }

    #[test]
    fn test_context_key_replaces_separators() {
        assert_eq!(context_key("app.net.Client$Pool"), "app_net_Client_Pool");
    }

    #[test]
    fn test_normalize_context() {
        let mut record = Record::info("root,app.Service", "started");
        record.normalize_context();
        assert_eq!(record.context, "app.Service");
    }

    #[test]
    fn test_record_deserialize_optional_fields() {
        let record: Record = serde_json::from_str(
            r#"{"level":"ERROR","context":"io","message":"disk full","stack":"at write()"}"#,
        )
        .unwrap();
        assert_eq!(record.level, LogLevel::Error);
        assert!(record.details.is_none());
        assert!(record.has_stack());
    }
}
