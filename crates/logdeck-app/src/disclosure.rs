//! Disclosure state for record details and stack traces.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Local};
use logdeck_core::Record;

use crate::config::DisplaySettings;

/// Identifies a record: the owning session's timestamp and the record's index
pub type RecordKey = (DateTime<Local>, usize);

/// How an expanded record is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPolicy {
    /// Hide the message line while details or the stack are shown
    pub hide_message_when_expanded: bool,
}

impl From<&DisplaySettings> for DisplayPolicy {
    fn from(settings: &DisplaySettings) -> Self {
        Self {
            hide_message_when_expanded: settings.hide_message_when_expanded,
        }
    }
}

/// What a renderer should show for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView<'a> {
    /// One-line message, or None while hidden by the display policy
    pub message: Option<Cow<'a, str>>,
    pub details: Option<&'a str>,
    pub stack: Option<&'a str>,
    /// Whether a details toggle exists for this record
    pub can_toggle_details: bool,
    /// Whether a stack toggle exists for this record
    pub can_toggle_stack: bool,
}

/// Tracks which records have their details or stack trace open
///
/// Everything starts collapsed. Entries for other sessions survive a change
/// of selection.
#[derive(Debug, Clone, Default)]
pub struct DisclosureState {
    details_shown: HashSet<RecordKey>,
    stacks_shown: HashSet<RecordKey>,
}

impl DisclosureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_details_shown(&self, session: DateTime<Local>, index: usize) -> bool {
        self.details_shown.contains(&(session, index))
    }

    pub fn is_stack_shown(&self, session: DateTime<Local>, index: usize) -> bool {
        self.stacks_shown.contains(&(session, index))
    }

    /// Toggle a record's details; returns whether they are now shown
    pub fn toggle_details(&mut self, session: DateTime<Local>, index: usize) -> bool {
        toggle(&mut self.details_shown, (session, index))
    }

    /// Toggle a record's stack trace; returns whether it is now shown
    pub fn toggle_stack(&mut self, session: DateTime<Local>, index: usize) -> bool {
        toggle(&mut self.stacks_shown, (session, index))
    }

    /// Collapse every record of one session
    pub fn collapse_session(&mut self, session: DateTime<Local>) {
        self.details_shown.retain(|(ts, _)| *ts != session);
        self.stacks_shown.retain(|(ts, _)| *ts != session);
    }

    pub fn collapse_all(&mut self) {
        self.details_shown.clear();
        self.stacks_shown.clear();
    }

    /// Resolve what to render for a record
    pub fn view<'a>(
        &self,
        session: DateTime<Local>,
        index: usize,
        record: &'a Record,
        policy: DisplayPolicy,
    ) -> RecordView<'a> {
        let details = record
            .effective_details()
            .filter(|_| self.is_details_shown(session, index));
        let stack = record
            .stack
            .as_deref()
            .filter(|s| !s.is_empty() && self.is_stack_shown(session, index));

        let expanded = details.is_some() || stack.is_some();
        let message = if policy.hide_message_when_expanded && expanded {
            None
        } else {
            Some(record.summary())
        };

        RecordView {
            message,
            details,
            stack,
            can_toggle_details: record.has_details(),
            can_toggle_stack: record.has_stack(),
        }
    }
}

fn toggle(set: &mut HashSet<RecordKey>, key: RecordKey) -> bool {
    if set.remove(&key) {
        false
    } else {
        set.insert(key);
        true
    }
}
