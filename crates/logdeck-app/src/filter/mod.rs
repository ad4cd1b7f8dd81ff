//! Record filtering
//!
//! Three independent criteria (level, context and text search) are ANDed by
//! the [`FilterEngine`]. Toggling a checkbox or editing the search text only
//! changes which records are visible; the records themselves are untouched.

mod criterion;
mod engine;

pub use criterion::{ContextCriterion, Criterion, LevelCriterion, OptionSet, TextCriterion};
pub use engine::{apply_filters, is_visible, FilterEngine};
