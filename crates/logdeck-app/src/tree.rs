//! Session navigation tree
//!
//! Partitions the loaded sessions into the "Today", "This week" and "Archive"
//! buckets. "Today" lists sessions directly (spilling into an "Older" group
//! once it holds `overflow_threshold` links); the other two buckets group
//! sessions by calendar date.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate};
use logdeck_core::prelude::*;
use logdeck_core::{RawSession, Session};

use crate::config::{TreeSettings, DEFAULT_OVERFLOW_THRESHOLD, DEFAULT_WEEK_WINDOW_DAYS};

/// Label format for session links (the date is carried by the bucket/group)
const LINK_TIME_FORMAT: &str = "%H:%M:%S";

/// Key format for day groups
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

// ─────────────────────────────────────────────────────────────────────────────
// Tree Types
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level bucket identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Today,
    Week,
    Archive,
}

impl BucketKind {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            BucketKind::Today => "today",
            BucketKind::Week => "week",
            BucketKind::Archive => "archive",
        }
    }

    /// Get a user-friendly display name for the bucket
    pub fn display_name(&self) -> &'static str {
        match self {
            BucketKind::Today => "Today",
            BucketKind::Week => "This week",
            BucketKind::Archive => "Archive",
        }
    }
}

/// Reference to a session from the navigation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLink {
    /// Join key back to the session
    pub timestamp: DateTime<Local>,
    pub label: String,
    pub record_count: usize,
}

impl SessionLink {
    fn for_session(session: &Session) -> Self {
        Self {
            timestamp: session.timestamp,
            label: session.timestamp.format(LINK_TIME_FORMAT).to_string(),
            record_count: session.len(),
        }
    }
}

/// Identity of a group nested inside a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Overflow of the "Today" bucket
    Older,
    /// All sessions started on one calendar date
    Day(NaiveDate),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Older => write!(f, "older"),
            GroupKey::Day(date) => write!(f, "{}", date.format(DAY_KEY_FORMAT)),
        }
    }
}

/// A group of session links inside a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: GroupKey,
    pub label: String,
    pub links: Vec<SessionLink>,
}

impl Group {
    fn new(key: GroupKey) -> Self {
        let label = match key {
            GroupKey::Older => "Older".to_string(),
            GroupKey::Day(_) => key.to_string(),
        };
        Self {
            key,
            label,
            links: Vec::new(),
        }
    }
}

/// One top-level bucket: direct links first, then nested groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub kind: BucketKind,
    pub links: Vec<SessionLink>,
    pub groups: Vec<Group>,
}

impl Bucket {
    fn new(kind: BucketKind) -> Self {
        Self {
            kind,
            links: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Check if the bucket holds no links at all
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.groups.iter().all(|g| g.links.is_empty())
    }

    /// Total number of links, including nested groups
    pub fn len(&self) -> usize {
        self.links.len() + self.groups.iter().map(|g| g.links.len()).sum::<usize>()
    }

    /// Find a nested group by key
    pub fn group(&self, key: &GroupKey) -> Option<&Group> {
        self.groups.iter().find(|g| &g.key == key)
    }

    /// All links in display order (direct links, then groups in order)
    pub fn iter_links(&self) -> impl Iterator<Item = &SessionLink> {
        self.links
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.links.iter()))
    }
}

/// A session that could not be placed in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSession {
    /// The timestamp exactly as it appeared in the snapshot
    pub timestamp: String,
    pub reason: String,
}

/// Navigation tree over all loaded sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationTree {
    /// Non-empty buckets in Today, This week, Archive order
    pub buckets: Vec<Bucket>,
    /// Sessions rejected because their timestamp was invalid
    pub skipped: Vec<SkippedSession>,
}

impl NavigationTree {
    pub fn bucket(&self, kind: BucketKind) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.kind == kind)
    }

    /// Check if no session was placed in the tree
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of session links across all buckets
    pub fn session_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// All links in display order
    pub fn iter_links(&self) -> impl Iterator<Item = &SessionLink> {
        self.buckets.iter().flat_map(|b| b.iter_links())
    }

    /// Find where a session was placed
    pub fn locate(&self, timestamp: DateTime<Local>) -> Option<(BucketKind, Option<GroupKey>)> {
        for bucket in &self.buckets {
            if bucket.links.iter().any(|l| l.timestamp == timestamp) {
                return Some((bucket.kind, None));
            }
            for group in &bucket.groups {
                if group.links.iter().any(|l| l.timestamp == timestamp) {
                    return Some((bucket.kind, Some(group.key)));
                }
            }
        }
        None
    }

    /// Session to show when the viewer opens: the most recent one from today
    pub fn initial_selection(&self) -> Option<DateTime<Local>> {
        self.bucket(BucketKind::Today)
            .and_then(|b| b.iter_links().next())
            .map(|l| l.timestamp)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Day groups in first-seen order, found by date rather than by label
#[derive(Debug, Default)]
struct DayGroups {
    groups: Vec<Group>,
    index: HashMap<NaiveDate, usize>,
}

impl DayGroups {
    fn push(&mut self, date: NaiveDate, link: SessionLink) {
        let idx = match self.index.get(&date) {
            Some(&idx) => idx,
            None => {
                self.groups.push(Group::new(GroupKey::Day(date)));
                let idx = self.groups.len() - 1;
                self.index.insert(date, idx);
                idx
            }
        };
        self.groups[idx].links.push(link);
    }

    fn into_bucket(self, kind: BucketKind) -> Bucket {
        let mut bucket = Bucket::new(kind);
        bucket.groups = self.groups;
        bucket
    }
}

/// Builds a [`NavigationTree`] from a set of sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTreeBuilder {
    overflow_threshold: usize,
    week_window: Duration,
}

impl Default for SessionTreeBuilder {
    fn default() -> Self {
        Self {
            overflow_threshold: DEFAULT_OVERFLOW_THRESHOLD,
            week_window: Duration::days(i64::from(DEFAULT_WEEK_WINDOW_DAYS)),
        }
    }
}

impl SessionTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &TreeSettings) -> Self {
        Self {
            overflow_threshold: settings.overflow_threshold,
            week_window: settings.week_window(),
        }
    }

    pub fn with_overflow_threshold(mut self, threshold: usize) -> Self {
        self.overflow_threshold = threshold;
        self
    }

    pub fn with_week_window(mut self, window: Duration) -> Self {
        self.week_window = window;
        self
    }

    /// Build the tree relative to the current time
    pub fn build(&self, sessions: &[Session]) -> NavigationTree {
        self.build_at(sessions, Local::now())
    }

    /// Build the tree relative to `now`
    ///
    /// Sessions without records are left out. "Today" compares calendar
    /// dates; the week window compares instants, so a session started seven
    /// days and a few hours ago is archived.
    pub fn build_at(&self, sessions: &[Session], now: DateTime<Local>) -> NavigationTree {
        let mut ordered: Vec<&Session> = sessions
            .iter()
            .filter(|s| {
                if s.is_empty() {
                    trace!("Leaving out empty session {}", s.timestamp);
                }
                !s.is_empty()
            })
            .collect();
        ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        for pair in ordered.windows(2) {
            if pair[0].timestamp == pair[1].timestamp {
                warn!(
                    "Duplicate session timestamp {}; links will be ambiguous",
                    pair[0].timestamp
                );
            }
        }

        let today_date = now.date_naive();
        // A window reaching past the representable range has no lower bound
        let week_cutoff = now.checked_sub_signed(self.week_window);

        let mut today = Bucket::new(BucketKind::Today);
        let mut older = Group::new(GroupKey::Older);
        let mut week = DayGroups::default();
        let mut archive = DayGroups::default();

        for session in ordered {
            let link = SessionLink::for_session(session);
            let date = session.timestamp.date_naive();

            if date == today_date {
                if today.links.len() < self.overflow_threshold {
                    today.links.push(link);
                } else {
                    older.links.push(link);
                }
            } else if week_cutoff.map_or(true, |cutoff| session.timestamp > cutoff) {
                week.push(date, link);
            } else {
                archive.push(date, link);
            }
        }

        if !older.links.is_empty() {
            today.groups.push(older);
        }

        let buckets: Vec<Bucket> = [
            today,
            week.into_bucket(BucketKind::Week),
            archive.into_bucket(BucketKind::Archive),
        ]
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect();

        let tree = NavigationTree {
            buckets,
            skipped: Vec::new(),
        };
        debug!(
            "Built session tree: {} sessions in {} buckets",
            tree.session_count(),
            tree.buckets.len()
        );
        tree
    }

    /// Validate raw sessions and build the tree relative to `now`
    ///
    /// Sessions whose timestamp cannot be interpreted end up in
    /// [`NavigationTree::skipped`]; the rest of the tree is still built.
    pub fn build_raw_at(&self, raw: Vec<RawSession>, now: DateTime<Local>) -> NavigationTree {
        let (sessions, skipped) = partition_sessions(raw);
        let mut tree = self.build_at(&sessions, now);
        tree.skipped = skipped;
        tree
    }
}

/// Split raw sessions into valid sessions and the ones with bad timestamps
pub fn partition_sessions(raw: Vec<RawSession>) -> (Vec<Session>, Vec<SkippedSession>) {
    let mut sessions = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for raw_session in raw {
        let timestamp = raw_session.timestamp.clone();
        match Session::try_from_raw(raw_session) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                warn!("Skipping session: {}", e);
                skipped.push(SkippedSession {
                    timestamp,
                    reason: e.to_string(),
                });
            }
        }
    }

    (sessions, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use logdeck_core::Record;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .unwrap()
    }

    fn session_at(timestamp: DateTime<Local>) -> Session {
        Session::new(
            timestamp,
            vec![
                Record::error("net", "connection refused"),
                Record::info("net", "retrying"),
            ],
        )
    }

    fn timestamps(links: &[SessionLink]) -> Vec<DateTime<Local>> {
        links.iter().map(|l| l.timestamp).collect()
    }

    #[test]
    fn test_buckets_by_age() {
        let now = fixed_now();
        let t0 = now;
        let t1 = now - Duration::hours(1);
        let t2 = now - Duration::days(3);
        let t3 = now - Duration::days(10);
        // Deliberately unordered
        let sessions = vec![session_at(t2), session_at(t0), session_at(t3), session_at(t1)];

        let tree = SessionTreeBuilder::new().build_at(&sessions, now);

        let today = tree.bucket(BucketKind::Today).unwrap();
        assert_eq!(timestamps(&today.links), vec![t0, t1]);
        assert!(today.groups.is_empty());

        let week = tree.bucket(BucketKind::Week).unwrap();
        assert_eq!(week.groups.len(), 1);
        assert_eq!(week.groups[0].key, GroupKey::Day(t2.date_naive()));
        assert_eq!(timestamps(&week.groups[0].links), vec![t2]);

        let archive = tree.bucket(BucketKind::Archive).unwrap();
        assert_eq!(archive.groups.len(), 1);
        assert_eq!(timestamps(&archive.groups[0].links), vec![t3]);

        assert_eq!(tree.initial_selection(), Some(t0));
    }

    #[test]
    fn test_today_overflow_into_older() {
        let now = fixed_now();
        let sessions: Vec<Session> = (0..12)
            .map(|i| session_at(now - Duration::minutes(i)))
            .collect();

        let tree = SessionTreeBuilder::new().build_at(&sessions, now);
        let today = tree.bucket(BucketKind::Today).unwrap();

        assert_eq!(today.links.len(), 10);
        let expected_direct: Vec<_> = (0..10).map(|i| now - Duration::minutes(i)).collect();
        assert_eq!(timestamps(&today.links), expected_direct);

        let older = today.group(&GroupKey::Older).unwrap();
        assert_eq!(older.label, "Older");
        assert_eq!(
            timestamps(&older.links),
            vec![now - Duration::minutes(10), now - Duration::minutes(11)]
        );
        assert_eq!(today.len(), 12);
    }

    #[test]
    fn test_overflow_threshold_is_configurable() {
        let now = fixed_now();
        let sessions: Vec<Session> = (0..4)
            .map(|i| session_at(now - Duration::minutes(i)))
            .collect();

        let tree = SessionTreeBuilder::new()
            .with_overflow_threshold(2)
            .build_at(&sessions, now);
        let today = tree.bucket(BucketKind::Today).unwrap();

        assert_eq!(today.links.len(), 2);
        assert_eq!(today.group(&GroupKey::Older).unwrap().links.len(), 2);
    }

    #[test]
    fn test_zero_threshold_still_selects_most_recent() {
        let now = fixed_now();
        let sessions = vec![session_at(now - Duration::minutes(5)), session_at(now)];

        let tree = SessionTreeBuilder::new()
            .with_overflow_threshold(0)
            .build_at(&sessions, now);

        assert!(tree.bucket(BucketKind::Today).unwrap().links.is_empty());
        assert_eq!(tree.initial_selection(), Some(now));
    }

    #[test]
    fn test_week_cutoff_compares_instants() {
        let now = fixed_now();
        let just_inside = now - Duration::days(7) + Duration::minutes(1);
        let exactly_cutoff = now - Duration::days(7);
        let just_outside = now - Duration::days(7) - Duration::hours(3);

        let sessions = vec![
            session_at(just_inside),
            session_at(exactly_cutoff),
            session_at(just_outside),
        ];
        let tree = SessionTreeBuilder::new().build_at(&sessions, now);

        assert_eq!(
            tree.locate(just_inside),
            Some((BucketKind::Week, Some(GroupKey::Day(just_inside.date_naive()))))
        );
        assert_eq!(tree.locate(exactly_cutoff).map(|(b, _)| b), Some(BucketKind::Archive));
        assert_eq!(tree.locate(just_outside).map(|(b, _)| b), Some(BucketKind::Archive));
    }

    #[test]
    fn test_week_window_is_configurable() {
        let now = fixed_now();
        let three_days = now - Duration::days(3);
        let tree = SessionTreeBuilder::new()
            .with_week_window(Duration::days(2))
            .build_at(&[session_at(three_days)], now);

        assert!(tree.bucket(BucketKind::Week).is_none());
        assert_eq!(tree.locate(three_days).map(|(b, _)| b), Some(BucketKind::Archive));
    }

    #[test]
    fn test_oversized_week_window_puts_everything_in_week() {
        let now = fixed_now();
        let settings = TreeSettings {
            overflow_threshold: 10,
            week_window_days: u32::MAX,
        };
        let old = now - Duration::days(4000);

        let tree = SessionTreeBuilder::from_settings(&settings)
            .build_at(&[session_at(now), session_at(old)], now);

        assert!(tree.bucket(BucketKind::Archive).is_none());
        assert_eq!(
            tree.locate(old),
            Some((BucketKind::Week, Some(GroupKey::Day(old.date_naive()))))
        );
    }

    #[test]
    fn test_day_groups_collect_same_date() {
        let now = fixed_now();
        let morning = now - Duration::days(2) - Duration::hours(3);
        let noon = now - Duration::days(2);
        let other_day = now - Duration::days(4);

        let sessions = vec![session_at(morning), session_at(other_day), session_at(noon)];
        let tree = SessionTreeBuilder::new().build_at(&sessions, now);

        let week = tree.bucket(BucketKind::Week).unwrap();
        assert_eq!(week.groups.len(), 2);
        // Most recent day first, sessions inside most recent first
        assert_eq!(timestamps(&week.groups[0].links), vec![noon, morning]);
        assert_eq!(timestamps(&week.groups[1].links), vec![other_day]);
        assert_eq!(week.groups[0].label, noon.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_empty_sessions_are_excluded() {
        let now = fixed_now();
        let empty = Session::new(now - Duration::minutes(1), vec![]);
        let full = session_at(now);

        let tree = SessionTreeBuilder::new().build_at(&[empty, full], now);

        assert_eq!(tree.session_count(), 1);
        assert!(tree.locate(now - Duration::minutes(1)).is_none());
    }

    #[test]
    fn test_empty_buckets_are_omitted() {
        let now = fixed_now();
        let tree = SessionTreeBuilder::new().build_at(&[session_at(now - Duration::days(30))], now);

        assert_eq!(tree.buckets.len(), 1);
        assert_eq!(tree.buckets[0].kind, BucketKind::Archive);
        assert_eq!(tree.initial_selection(), None);
    }

    #[test]
    fn test_no_sessions_gives_empty_tree() {
        let tree = SessionTreeBuilder::new().build_at(&[], fixed_now());
        assert!(tree.is_empty());
        assert_eq!(tree.initial_selection(), None);
    }

    #[test]
    fn test_every_session_placed_exactly_once() {
        let now = fixed_now();
        let offsets_hours = [0, 1, 2, 5, 11, 13, 30, 49, 100, 167, 169, 200, 500, 1000, 4000];
        let sessions: Vec<Session> = offsets_hours
            .iter()
            .map(|h| session_at(now - Duration::hours(*h)))
            .collect();

        let tree = SessionTreeBuilder::new()
            .with_overflow_threshold(3)
            .build_at(&sessions, now);

        assert_eq!(tree.session_count(), sessions.len());
        for session in &sessions {
            let hits = tree
                .iter_links()
                .filter(|l| l.timestamp == session.timestamp)
                .count();
            assert_eq!(hits, 1, "session {} placed {} times", session.timestamp, hits);
        }
    }

    #[test]
    fn test_build_raw_skips_invalid_timestamps() {
        let now = fixed_now();
        let good = (now - Duration::hours(2)).timestamp_millis().to_string();
        let raw = vec![
            RawSession::new(good, vec![Record::info("app", "started")]),
            RawSession::new("not-a-time", vec![Record::info("app", "lost")]),
        ];

        let tree = SessionTreeBuilder::new().build_raw_at(raw, now);

        assert_eq!(tree.session_count(), 1);
        assert_eq!(tree.skipped.len(), 1);
        assert_eq!(tree.skipped[0].timestamp, "not-a-time");
        assert!(tree.skipped[0].reason.contains("not-a-time"));
    }

    #[test]
    fn test_link_labels() {
        let now = fixed_now();
        let tree = SessionTreeBuilder::new().build_at(&[session_at(now)], now);
        let link = &tree.bucket(BucketKind::Today).unwrap().links[0];

        assert_eq!(link.label, "12:00:00");
        assert_eq!(link.record_count, 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = TreeSettings {
            overflow_threshold: 1,
            week_window_days: 1,
        };
        let builder = SessionTreeBuilder::from_settings(&settings);
        assert_eq!(
            builder,
            SessionTreeBuilder::new()
                .with_overflow_threshold(1)
                .with_week_window(Duration::days(1))
        );
    }

    #[test]
    fn test_bucket_ids() {
        assert_eq!(BucketKind::Today.id(), "today");
        assert_eq!(BucketKind::Week.id(), "week");
        assert_eq!(BucketKind::Archive.display_name(), "Archive");
        assert_eq!(GroupKey::Older.to_string(), "older");
    }
}
