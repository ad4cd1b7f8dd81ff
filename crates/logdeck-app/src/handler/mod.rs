//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `filters`: Filter and search handlers
//! - `disclosure`: Details/stack toggle handlers

pub(crate) mod disclosure;
pub(crate) mod filters;
pub(crate) mod update;


// Re-export main entry point
pub use update::update;

/// Outcome of processing one message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Visibility of the active session was re-evaluated
    pub recomputed: bool,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn recomputed() -> Self {
        Self { recomputed: true }
    }
}
