//! # logdeck-core - Core Domain Types
//!
//! Foundation crate for logdeck, a viewer for archived application log
//! sessions. Provides the session/record data model, timestamp parsing,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Record`] - A single log line with level, context, message, details and stack
//! - [`LogLevel`] - Log severity (Debug, Info, Warn, Error, Off, or an unrecognized name)
//!
//! ### Sessions (`session`)
//! - [`Session`] - One process run's records, keyed by start timestamp
//! - [`RawSession`] - Snapshot form of a session with an unchecked timestamp
//! - [`parse_timestamp()`] - Interpret a session timestamp
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use logdeck_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod session;
pub mod types;

/// Prelude for common imports used throughout all logdeck crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{CriterionKind, Error, Result, ResultExt};
pub use session::{parse_timestamp, RawSession, Session};
pub use types::{context_key, innermost_context, LogLevel, Record, SUMMARY_ELLIPSIS};
