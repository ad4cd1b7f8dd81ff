//! Viewer state (Model in TEA pattern)

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Local};
use logdeck_core::prelude::*;
use logdeck_core::{RawSession, Record, Session};

use crate::config::ViewerSettings;
use crate::disclosure::{DisclosureState, DisplayPolicy, RecordView};
use crate::filter::{ContextCriterion, FilterEngine};
use crate::selection::Selection;
use crate::snapshot::load_snapshot;
use crate::tree::{partition_sessions, NavigationTree, SessionTreeBuilder};

/// Complete viewer state over one loaded snapshot
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub settings: ViewerSettings,

    /// Navigation tree built at load time
    pub tree: NavigationTree,

    /// Loaded sessions keyed by start timestamp
    sessions: BTreeMap<DateTime<Local>, Session>,

    pub selection: Selection,
    pub filters: FilterEngine,
    pub disclosure: DisclosureState,
    pub display: DisplayPolicy,

    /// Visibility of the active session's records, one flag per record
    visibility: Vec<bool>,
}

impl ViewerState {
    /// Empty viewer configured from settings
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            filters: FilterEngine::from_settings(&settings),
            display: DisplayPolicy::from(&settings.display),
            settings,
            ..Self::default()
        }
    }

    /// Load sessions relative to the current time
    pub fn load(settings: ViewerSettings, raw: Vec<RawSession>) -> Self {
        Self::load_at(settings, raw, Local::now())
    }

    /// Load sessions relative to `now`
    ///
    /// Builds the tree, registers every context seen in the snapshot, selects
    /// the most recent session of today, and computes its visibility.
    pub fn load_at(settings: ViewerSettings, raw: Vec<RawSession>, now: DateTime<Local>) -> Self {
        let mut state = Self::new(settings);

        let (sessions, skipped) = partition_sessions(raw);
        state.tree =
            SessionTreeBuilder::from_settings(&state.settings.tree).build_at(&sessions, now);
        state.tree.skipped = skipped;

        state.filters.install(ContextCriterion::from_records(
            sessions.iter().flat_map(|s| s.records.iter()),
        ));

        for session in sessions.into_iter().filter(|s| !s.is_empty()) {
            // Duplicates were already reported by the tree builder
            state.sessions.entry(session.timestamp).or_insert(session);
        }

        state.selection = Selection::from_tree(&state.tree);
        state.recompute_visibility();

        info!(
            "Loaded {} sessions ({} skipped)",
            state.sessions.len(),
            state.tree.skipped.len()
        );
        state
    }

    /// Load a snapshot file
    pub fn open(settings: ViewerSettings, snapshot: &Path) -> Result<Self> {
        let raw = load_snapshot(snapshot)?;
        Ok(Self::load(settings, raw))
    }

    pub fn session(&self, timestamp: DateTime<Local>) -> Option<&Session> {
        self.sessions.get(&timestamp)
    }

    /// Number of sessions that can be selected
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The currently displayed session
    pub fn active_session(&self) -> Option<&Session> {
        self.selection.active().and_then(|ts| self.sessions.get(&ts))
    }

    /// Make a session the displayed one
    ///
    /// Returns false (and changes nothing) if no loaded session has that timestamp.
    pub fn select(&mut self, timestamp: DateTime<Local>) -> bool {
        if !self.sessions.contains_key(&timestamp) {
            warn!("No session with timestamp {}", timestamp);
            return false;
        }

        if let Some(previous) = self.selection.select(timestamp) {
            debug!("Switched session {} -> {}", previous, timestamp);
        }
        self.recompute_visibility();
        true
    }

    /// Re-evaluate every record of the active session
    pub fn recompute_visibility(&mut self) {
        self.visibility = match self.active_session() {
            Some(session) => self.filters.visibility(&session.records),
            None => Vec::new(),
        };
    }

    /// Visibility of the active session's records, as last computed
    pub fn visibility(&self) -> &[bool] {
        &self.visibility
    }

    /// Visible records of the active session with their indices
    pub fn visible_records(&self) -> Vec<(usize, &Record)> {
        let Some(session) = self.active_session() else {
            return Vec::new();
        };

        session
            .records
            .iter()
            .enumerate()
            .filter(|(index, _)| self.visibility.get(*index).copied().unwrap_or(false))
            .collect()
    }

    /// How to render a record of the active session
    pub fn record_view(&self, index: usize) -> Option<RecordView<'_>> {
        let session = self.active_session()?;
        let record = session.records.get(index)?;
        Some(self.disclosure.view(session.timestamp, index, record, self.display))
    }

    /// Restore filters to their configured defaults with every context checked
    pub fn reset_filters(&mut self) {
        self.filters = FilterEngine::from_settings(&self.settings);
        self.filters.install(ContextCriterion::from_records(
            self.sessions.values().flat_map(|s| s.records.iter()),
        ));
    }
}
