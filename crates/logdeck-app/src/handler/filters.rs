//! Filter and search handlers

use logdeck_core::prelude::*;
use logdeck_core::LogLevel;

use crate::config::SearchMode;
use crate::state::ViewerState;

use super::UpdateResult;

/// Re-evaluate visibility after a criterion changed
fn recompute(state: &mut ViewerState) -> UpdateResult {
    state.recompute_visibility();
    UpdateResult::recomputed()
}

pub fn handle_toggle_level(state: &mut ViewerState, level: &LogLevel) -> UpdateResult {
    let Some(criterion) = state.filters.level_mut() else {
        return UpdateResult::none();
    };

    match criterion.toggle(level) {
        Some(enabled) => {
            debug!("Level {} {}", level, if enabled { "shown" } else { "hidden" });
            recompute(state)
        }
        None => {
            debug!("No level checkbox for {}", level);
            UpdateResult::none()
        }
    }
}

pub fn handle_toggle_context(state: &mut ViewerState, context: &str) -> UpdateResult {
    let Some(criterion) = state.filters.context_mut() else {
        return UpdateResult::none();
    };

    match criterion.toggle(context) {
        Some(enabled) => {
            debug!("Context {} {}", context, if enabled { "shown" } else { "hidden" });
            recompute(state)
        }
        None => {
            debug!("No context checkbox for {}", context);
            UpdateResult::none()
        }
    }
}

pub fn handle_set_all_contexts(state: &mut ViewerState, enabled: bool) -> UpdateResult {
    let Some(criterion) = state.filters.context_mut() else {
        return UpdateResult::none();
    };

    if enabled {
        criterion.enable_all();
    } else {
        criterion.disable_all();
    }
    recompute(state)
}

pub fn handle_set_search_query(state: &mut ViewerState, query: &str) -> UpdateResult {
    let Some(criterion) = state.filters.text_mut() else {
        return UpdateResult::none();
    };

    criterion.set_query(query);
    if let Some(error) = criterion.error() {
        warn!("{}", error);
    }
    recompute(state)
}

pub fn handle_set_search_mode(state: &mut ViewerState, mode: SearchMode) -> UpdateResult {
    let Some(criterion) = state.filters.text_mut() else {
        return UpdateResult::none();
    };

    criterion.set_mode(mode);
    recompute(state)
}

pub fn handle_set_case_sensitive(state: &mut ViewerState, case_sensitive: bool) -> UpdateResult {
    let Some(criterion) = state.filters.text_mut() else {
        return UpdateResult::none();
    };

    criterion.set_case_sensitive(case_sensitive);
    recompute(state)
}

pub fn handle_reset_filters(state: &mut ViewerState) -> UpdateResult {
    state.reset_filters();
    recompute(state)
}
