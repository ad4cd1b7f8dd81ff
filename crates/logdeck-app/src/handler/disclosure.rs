//! Details/stack toggle handlers

use chrono::{DateTime, Local};
use logdeck_core::prelude::*;
use logdeck_core::Record;

use crate::state::ViewerState;

use super::UpdateResult;

/// Timestamp of the active session and whether `check` holds for its record
fn locate(
    state: &ViewerState,
    index: usize,
    check: fn(&Record) -> bool,
) -> Option<(DateTime<Local>, bool)> {
    let session = state.active_session()?;
    match session.records.get(index) {
        Some(record) => Some((session.timestamp, check(record))),
        None => {
            debug!("No record {} in session {}", index, session.timestamp);
            None
        }
    }
}

pub fn handle_toggle_details(state: &mut ViewerState, index: usize) -> UpdateResult {
    match locate(state, index, Record::has_details) {
        Some((timestamp, true)) => {
            state.disclosure.toggle_details(timestamp, index);
        }
        Some((_, false)) => trace!("Record {} has no details", index),
        None => {}
    }
    UpdateResult::none()
}

pub fn handle_toggle_stack(state: &mut ViewerState, index: usize) -> UpdateResult {
    match locate(state, index, Record::has_stack) {
        Some((timestamp, true)) => {
            state.disclosure.toggle_stack(timestamp, index);
        }
        Some((_, false)) => trace!("Record {} has no stack trace", index),
        None => {}
    }
    UpdateResult::none()
}
