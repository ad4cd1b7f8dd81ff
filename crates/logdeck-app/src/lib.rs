//! logdeck-app - Session navigation and filtering for logdeck
//!
//! This crate builds the time-bucketed session tree, evaluates record filters,
//! and implements the TEA (The Elm Architecture) pattern for the viewer state,
//! along with configuration and snapshot loading.

pub mod config;
pub mod disclosure;
pub mod filter;
pub mod handler;
pub mod message;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod tree;

// Re-export primary types
pub use disclosure::{DisclosureState, DisplayPolicy, RecordView};
pub use filter::{ContextCriterion, Criterion, FilterEngine, LevelCriterion, TextCriterion};
pub use handler::{update, UpdateResult};
pub use message::Message;
pub use selection::Selection;
pub use snapshot::{load_snapshot, parse_snapshot};
pub use state::ViewerState;
pub use tree::{
    BucketKind, GroupKey, NavigationTree, SessionLink, SessionTreeBuilder, SkippedSession,
};
