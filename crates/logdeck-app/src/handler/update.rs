//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::ViewerState;

use super::{disclosure, filters, UpdateResult};

/// Process a message and update state
///
/// Any change to a criterion or to the selection re-evaluates the active
/// session's visibility before returning.
pub fn update(state: &mut ViewerState, message: Message) -> UpdateResult {
    match message {
        Message::SelectSession(timestamp) => {
            if state.select(timestamp) {
                UpdateResult::recomputed()
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Filter Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleLevel(level) => filters::handle_toggle_level(state, &level),
        Message::ToggleContext(context) => filters::handle_toggle_context(state, &context),
        Message::EnableAllContexts => filters::handle_set_all_contexts(state, true),
        Message::DisableAllContexts => filters::handle_set_all_contexts(state, false),
        Message::SetSearchQuery(query) => filters::handle_set_search_query(state, &query),
        Message::SetSearchMode(mode) => filters::handle_set_search_mode(state, mode),
        Message::SetCaseSensitive(on) => filters::handle_set_case_sensitive(state, on),
        Message::ClearSearch => filters::handle_set_search_query(state, ""),
        Message::ResetFilters => filters::handle_reset_filters(state),

        // ─────────────────────────────────────────────────────────
        // Disclosure Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleDetails(index) => disclosure::handle_toggle_details(state, index),
        Message::ToggleStack(index) => disclosure::handle_toggle_stack(state, index),
        Message::CollapseAll => {
            state.disclosure.collapse_all();
            UpdateResult::none()
        }
    }
}
