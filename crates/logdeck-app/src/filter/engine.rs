//! Filter engine: the AND of all installed criteria

use logdeck_core::prelude::*;
use logdeck_core::{CriterionKind, Record};

use super::criterion::{ContextCriterion, Criterion, LevelCriterion, TextCriterion};
use crate::config::ViewerSettings;

/// Check a record against a set of criteria
///
/// A record is visible only when every criterion accepts it. With no criteria
/// everything is visible.
pub fn is_visible(record: &Record, criteria: &[Criterion]) -> bool {
    criteria.iter().all(|criterion| criterion.accepts(record))
}

/// The visible subset of `records`, order preserved
pub fn apply_filters<'a>(records: &'a [Record], criteria: &[Criterion]) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| is_visible(record, criteria))
        .collect()
}

/// Holds at most one criterion per kind and evaluates them together
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    criteria: Vec<Criterion>,
}

impl FilterEngine {
    /// Engine with no criteria; everything is visible
    pub fn new() -> Self {
        Self::default()
    }

    /// Level and text criteria configured from settings
    ///
    /// The context criterion is installed once sessions are loaded, since its
    /// options come from the data.
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        let mut engine = Self::new();
        engine.install(LevelCriterion::with_active(&settings.filter.default_levels));
        engine.install(TextCriterion::from_settings(&settings.search));
        engine
    }

    /// Add a criterion, replacing any existing one of the same kind
    pub fn install(&mut self, criterion: impl Into<Criterion>) {
        let criterion = criterion.into();
        let kind = criterion.kind();
        match self.criteria.iter_mut().find(|c| c.kind() == kind) {
            Some(existing) => *existing = criterion,
            None => self.criteria.push(criterion),
        }
    }

    /// Remove the criterion of the given kind, returning it
    pub fn remove(&mut self, kind: CriterionKind) -> Option<Criterion> {
        let index = self.criteria.iter().position(|c| c.kind() == kind)?;
        Some(self.criteria.remove(index))
    }

    pub fn get(&self, kind: CriterionKind) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.kind() == kind)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn level(&self) -> Option<&LevelCriterion> {
        self.criteria.iter().find_map(|c| match c {
            Criterion::Level(level) => Some(level),
            _ => None,
        })
    }

    pub fn context(&self) -> Option<&ContextCriterion> {
        self.criteria.iter().find_map(|c| match c {
            Criterion::Context(context) => Some(context),
            _ => None,
        })
    }

    pub fn text(&self) -> Option<&TextCriterion> {
        self.criteria.iter().find_map(|c| match c {
            Criterion::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn level_mut(&mut self) -> Option<&mut LevelCriterion> {
        self.criteria.iter_mut().find_map(|c| match c {
            Criterion::Level(level) => Some(level),
            _ => None,
        })
    }

    pub fn context_mut(&mut self) -> Option<&mut ContextCriterion> {
        self.criteria.iter_mut().find_map(|c| match c {
            Criterion::Context(context) => Some(context),
            _ => None,
        })
    }

    pub fn text_mut(&mut self) -> Option<&mut TextCriterion> {
        self.criteria.iter_mut().find_map(|c| match c {
            Criterion::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Check if any criterion currently hides records
    pub fn is_active(&self) -> bool {
        self.criteria.iter().any(Criterion::is_restrictive)
    }

    pub fn is_visible(&self, record: &Record) -> bool {
        is_visible(record, &self.criteria)
    }

    /// The visible subset of `records`, order preserved
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        apply_filters(records, &self.criteria)
    }

    /// Indices of the visible records
    pub fn visible_indices(&self, records: &[Record]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.is_visible(record))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn visible_count(&self, records: &[Record]) -> usize {
        records.iter().filter(|r| self.is_visible(r)).count()
    }

    /// Visibility flag for each record, in record order
    pub fn visibility(&self, records: &[Record]) -> Vec<bool> {
        let flags: Vec<bool> = records.iter().map(|r| self.is_visible(r)).collect();
        trace!(
            "Filtered {} records, {} visible",
            records.len(),
            flags.iter().filter(|v| **v).count()
        );
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchMode;
    use logdeck_core::LogLevel;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::info("net", "connected"),
            Record::error("net", "connection timeout after 30s"),
            Record::debug("db", "query plan"),
            Record::warn("db", "slow query timeout"),
            Record::info("ui", "window opened"),
        ]
    }

    fn all_open(records: &[Record]) -> FilterEngine {
        let mut engine = FilterEngine::new();
        engine.install(LevelCriterion::all());
        engine.install(ContextCriterion::from_records(records));
        engine.install(TextCriterion::new("", SearchMode::Substring, false));
        engine
    }

    #[test]
    fn test_no_criteria_shows_everything() {
        let records = sample_records();
        let engine = FilterEngine::new();
        assert_eq!(engine.apply(&records).len(), records.len());
        assert!(engine.visibility(&records).iter().all(|v| *v));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_all_options_enabled_shows_everything() {
        let records = sample_records();
        let engine = all_open(&records);
        assert_eq!(engine.visible_count(&records), records.len());
        assert!(!engine.is_active());
    }

    #[test]
    fn test_timeout_search_with_info_disabled() {
        let records = vec![
            Record::error("net", "connection timeout after 30s"),
            Record::info("net", "ok"),
        ];
        let mut engine = all_open(&records);
        engine.level_mut().unwrap().set(LogLevel::Info, false);
        engine.text_mut().unwrap().set_query("timeout");

        assert_eq!(engine.visibility(&records), vec![true, false]);
        assert_eq!(engine.apply(&records), vec![&records[0]]);
    }

    #[test]
    fn test_apply_preserves_order() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.text_mut().unwrap().set_query("timeout");

        let visible: Vec<&str> = engine
            .apply(&records)
            .iter()
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(visible, vec!["connection timeout after 30s", "slow query timeout"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.context_mut().unwrap().set("db", false);
        engine.text_mut().unwrap().set_query("timeout");

        // Only the net error mentions "timeout" outside the db context
        assert_eq!(engine.visible_indices(&records), vec![1]);
        assert!(engine.is_active());
    }

    #[test]
    fn test_disabling_an_option_never_reveals_records() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.text_mut().unwrap().set_query("o");
        let before = engine.visibility(&records);

        engine.level_mut().unwrap().set(LogLevel::Warn, false);
        let after = engine.visibility(&records);

        for (b, a) in before.iter().zip(&after) {
            assert!(*b || !*a);
        }
        assert!(after.iter().filter(|v| **v).count() < before.iter().filter(|v| **v).count());
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.level_mut().unwrap().set(LogLevel::Debug, false);
        let before = engine.visibility(&records);

        engine.context_mut().unwrap().toggle("ui");
        assert_ne!(engine.visibility(&records), before);
        engine.context_mut().unwrap().toggle("ui");
        assert_eq!(engine.visibility(&records), before);
    }

    #[test]
    fn test_nothing_enabled_shows_nothing() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.install(LevelCriterion::with_active(&[]));

        assert_eq!(engine.visible_count(&records), 0);
    }

    #[test]
    fn test_install_replaces_same_kind() {
        let records = sample_records();
        let mut engine = all_open(&records);
        assert_eq!(engine.criteria().len(), 3);

        engine.install(TextCriterion::new("window", SearchMode::Substring, false));
        assert_eq!(engine.criteria().len(), 3);
        assert_eq!(engine.text().unwrap().query(), "window");
        assert_eq!(engine.visible_indices(&records), vec![4]);
    }

    #[test]
    fn test_remove_criterion() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.install(LevelCriterion::with_active(&[]));
        assert_eq!(engine.visible_count(&records), 0);

        let removed = engine.remove(CriterionKind::Level);
        assert!(matches!(removed, Some(Criterion::Level(_))));
        assert!(engine.level().is_none());
        assert_eq!(engine.visible_count(&records), records.len());
        assert!(engine.remove(CriterionKind::Level).is_none());
    }

    #[test]
    fn test_from_settings_hides_debug() {
        let records = sample_records();
        let engine = FilterEngine::from_settings(&ViewerSettings::default());

        assert!(engine.context().is_none());
        assert_eq!(engine.get(CriterionKind::Text).map(Criterion::kind), Some(CriterionKind::Text));
        assert_eq!(engine.visible_indices(&records), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_free_functions_match_engine() {
        let records = sample_records();
        let mut engine = all_open(&records);
        engine.context_mut().unwrap().set("net", false);

        assert_eq!(apply_filters(&records, engine.criteria()), engine.apply(&records));
        assert!(!is_visible(&records[0], engine.criteria()));
        assert!(is_visible(&records[0], &[]));
    }
}
