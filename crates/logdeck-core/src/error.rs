//! Error types shared by all logdeck crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which filter criterion a value was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    Level,
    Context,
    Text,
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriterionKind::Level => write!(f, "level"),
            CriterionKind::Context => write!(f, "context"),
            CriterionKind::Text => write!(f, "text"),
        }
    }
}

/// Error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Session Data Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid session timestamp '{timestamp}': {reason}")]
    InvalidSession { timestamp: String, reason: String },

    #[error("Snapshot file not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Filter Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No {kind} filter option for value '{value}'")]
    UnknownCriterionValue { kind: CriterionKind, value: String },

    #[error("Invalid search pattern: {message}")]
    InvalidPattern { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_session(timestamp: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSession {
            timestamp: timestamp.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_criterion_value(kind: CriterionKind, value: impl Into<String>) -> Self {
        Self::UnknownCriterionValue {
            kind,
            value: value.into(),
        }
    }

    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors only affect a single session or record and are
    /// resolved by skipping or hiding it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidSession { .. }
                | Error::UnknownCriterionValue { .. }
                | Error::InvalidPattern { .. }
        )
    }

    /// Check if this error should abort loading the viewer
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::SnapshotNotFound { .. } | Error::Json(_))
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
