//! Filter criteria: level checkboxes, context checkboxes and text search
//!
//! Every criterion answers one question, [`Criterion::accepts`]; the engine
//! ANDs the answers together.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use logdeck_core::prelude::*;
use logdeck_core::{CriterionKind, LogLevel, Record};
use regex::{Regex, RegexBuilder};

use crate::config::{SearchMode, SearchSettings};

// ─────────────────────────────────────────────────────────────────────────────
// OptionSet
// ─────────────────────────────────────────────────────────────────────────────

/// A set of checkbox options, one boolean per value
///
/// Values that are not in the set have no checkbox. They are accepted only
/// while nothing is excluded, so that a filter with any unchecked option shows
/// only what is explicitly enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet<K: Ord> {
    options: BTreeMap<K, bool>,
}

impl<K: Ord> Default for OptionSet<K> {
    fn default() -> Self {
        Self {
            options: BTreeMap::new(),
        }
    }
}

impl<K: Ord> OptionSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update an option
    pub fn set(&mut self, key: K, enabled: bool) {
        self.options.insert(key, enabled);
    }

    /// Add an option unless it already exists
    pub fn register(&mut self, key: K, enabled: bool) {
        self.options.entry(key).or_insert(enabled);
    }

    /// Flip an option; returns the new state, or None if there is no such option
    pub fn toggle<Q>(&mut self, key: &Q) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.options.get_mut(key).map(|enabled| {
            *enabled = !*enabled;
            *enabled
        })
    }

    /// State of an option, or None if there is no such option
    pub fn get<Q>(&self, key: &Q) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.options.get(key).copied()
    }

    /// Check if an option exists and is checked
    pub fn is_enabled<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).unwrap_or(false)
    }

    pub fn enable_all(&mut self) {
        self.options.values_mut().for_each(|enabled| *enabled = true);
    }

    pub fn disable_all(&mut self) {
        self.options.values_mut().for_each(|enabled| *enabled = false);
    }

    /// Check if at least one option is unchecked
    pub fn has_exclusions(&self) -> bool {
        self.options.values().any(|enabled| !enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.options.values().filter(|enabled| **enabled).count()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> {
        self.options.iter().map(|(k, v)| (k, *v))
    }

    /// Whether a value with no option passes
    fn accepts_unknown(&self) -> bool {
        !self.has_exclusions()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Level
// ─────────────────────────────────────────────────────────────────────────────

/// One checkbox per log level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCriterion {
    options: OptionSet<LogLevel>,
}

impl LevelCriterion {
    /// Standard levels, with only `active` checked
    ///
    /// Levels in `active` that are not standard get a checkbox too.
    pub fn with_active(active: &[LogLevel]) -> Self {
        let mut options = OptionSet::new();
        for level in LogLevel::STANDARD {
            options.set(level, false);
        }
        for level in active {
            options.set(level.clone(), true);
        }
        Self { options }
    }

    /// Standard levels, all checked
    pub fn all() -> Self {
        Self::with_active(&LogLevel::STANDARD)
    }

    pub fn options(&self) -> &OptionSet<LogLevel> {
        &self.options
    }

    pub fn set(&mut self, level: LogLevel, enabled: bool) {
        self.options.set(level, enabled);
    }

    pub fn toggle(&mut self, level: &LogLevel) -> Option<bool> {
        self.options.toggle(level)
    }

    pub fn is_enabled(&self, level: &LogLevel) -> bool {
        self.options.is_enabled(level)
    }

    pub fn enable_all(&mut self) {
        self.options.enable_all();
    }

    pub fn disable_all(&mut self) {
        self.options.disable_all();
    }

    /// Check if at least one level is unchecked
    pub fn has_exclusions(&self) -> bool {
        self.options.has_exclusions()
    }

    /// The option matching the record's level
    pub fn lookup(&self, record: &Record) -> Result<bool> {
        self.options.get(&record.level).ok_or_else(|| {
            Error::unknown_criterion_value(CriterionKind::Level, record.level.name())
        })
    }

    pub fn accepts(&self, record: &Record) -> bool {
        match self.lookup(record) {
            Ok(enabled) => enabled,
            Err(e) => {
                trace!("{}", e);
                self.options.accepts_unknown()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// One checkbox per context seen in the loaded sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextCriterion {
    options: OptionSet<String>,
}

impl ContextCriterion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A checked option for every distinct context in `records`
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut criterion = Self::new();
        criterion.observe(records);
        criterion
    }

    /// Register contexts not seen before, checked
    pub fn observe<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        for record in records {
            if self.options.get(record.context.as_str()).is_none() {
                self.options.register(record.context.clone(), true);
            }
        }
    }

    pub fn options(&self) -> &OptionSet<String> {
        &self.options
    }

    pub fn set(&mut self, context: impl Into<String>, enabled: bool) {
        self.options.set(context.into(), enabled);
    }

    pub fn toggle(&mut self, context: &str) -> Option<bool> {
        self.options.toggle(context)
    }

    pub fn is_enabled(&self, context: &str) -> bool {
        self.options.is_enabled(context)
    }

    pub fn enable_all(&mut self) {
        self.options.enable_all();
    }

    pub fn disable_all(&mut self) {
        self.options.disable_all();
    }

    /// Check if at least one context is unchecked
    pub fn has_exclusions(&self) -> bool {
        self.options.has_exclusions()
    }

    /// The option matching the record's context
    pub fn lookup(&self, record: &Record) -> Result<bool> {
        self.options
            .get(record.context.as_str())
            .ok_or_else(|| Error::unknown_criterion_value(CriterionKind::Context, &record.context))
    }

    pub fn accepts(&self, record: &Record) -> bool {
        match self.lookup(record) {
            Ok(enabled) => enabled,
            Err(e) => {
                trace!("{}", e);
                self.options.accepts_unknown()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────────────

/// Free-text search over record messages
#[derive(Debug, Clone, Default)]
pub struct TextCriterion {
    query: String,
    mode: SearchMode,
    case_sensitive: bool,
    /// Query folded for comparison (lower-cased unless case sensitive)
    needle: String,
    /// Compiled pattern in regex mode
    regex: Option<Regex>,
    /// Compile error in regex mode
    error: Option<String>,
}

impl TextCriterion {
    pub fn new(query: impl Into<String>, mode: SearchMode, case_sensitive: bool) -> Self {
        let mut criterion = Self {
            query: query.into(),
            mode,
            case_sensitive,
            ..Self::default()
        };
        criterion.compile();
        criterion
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new("", settings.mode, settings.case_sensitive)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Compile error of the current regex query, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check if there is no search text
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.compile();
        }
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.mode != mode {
            self.mode = mode;
            self.compile();
        }
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        if self.case_sensitive != case_sensitive {
            self.case_sensitive = case_sensitive;
            self.compile();
        }
    }

    pub fn clear(&mut self) {
        self.set_query("");
    }

    fn compile(&mut self) {
        self.needle = self.fold(&self.query);
        self.regex = None;
        self.error = None;

        if self.mode != SearchMode::Regex || self.query.is_empty() {
            return;
        }

        match RegexBuilder::new(&self.query)
            .case_insensitive(!self.case_sensitive)
            .build()
        {
            Ok(regex) => self.regex = Some(regex),
            Err(e) => {
                debug!("Invalid search pattern {:?}: {}", self.query, e);
                self.error = Some(Error::invalid_pattern(e.to_string()).to_string());
            }
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Check the search text against a message
    pub fn matches(&self, message: &str) -> bool {
        if self.query.is_empty() {
            return true;
        }

        match self.mode {
            SearchMode::Substring => self.fold(message).contains(&self.needle),
            SearchMode::Token => {
                let haystack = self.fold(message);
                let mut wanted = tokens(&self.needle).peekable();
                // A query with no word characters is matched as plain text
                if wanted.peek().is_none() {
                    return haystack.contains(&self.needle);
                }
                let words: Vec<&str> = tokens(&haystack).collect();
                wanted.all(|word| words.contains(&word))
            }
            // An uncompilable pattern filters nothing; the error is surfaced instead
            SearchMode::Regex => self
                .regex
                .as_ref()
                .map_or(true, |regex| regex.is_match(message)),
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        self.matches(&record.message)
    }
}

/// Whitespace-separated words with surrounding punctuation removed
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Criterion
// ─────────────────────────────────────────────────────────────────────────────

/// An independently toggleable filter rule
#[derive(Debug, Clone)]
pub enum Criterion {
    Level(LevelCriterion),
    Context(ContextCriterion),
    Text(TextCriterion),
}

impl Criterion {
    pub fn kind(&self) -> CriterionKind {
        match self {
            Criterion::Level(_) => CriterionKind::Level,
            Criterion::Context(_) => CriterionKind::Context,
            Criterion::Text(_) => CriterionKind::Text,
        }
    }

    /// Check if a record passes this criterion
    pub fn accepts(&self, record: &Record) -> bool {
        match self {
            Criterion::Level(c) => c.accepts(record),
            Criterion::Context(c) => c.accepts(record),
            Criterion::Text(c) => c.accepts(record),
        }
    }

    /// Check if this criterion currently hides anything
    pub fn is_restrictive(&self) -> bool {
        match self {
            Criterion::Level(c) => c.has_exclusions(),
            Criterion::Context(c) => c.has_exclusions(),
            Criterion::Text(c) => !c.is_empty(),
        }
    }
}

impl From<LevelCriterion> for Criterion {
    fn from(criterion: LevelCriterion) -> Self {
        Criterion::Level(criterion)
    }
}

impl From<ContextCriterion> for Criterion {
    fn from(criterion: ContextCriterion) -> Self {
        Criterion::Context(criterion)
    }
}

impl From<TextCriterion> for Criterion {
    fn from(criterion: TextCriterion) -> Self {
        Criterion::Text(criterion)
    }
}
