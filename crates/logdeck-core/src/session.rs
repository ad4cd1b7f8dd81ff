//! Archived log sessions and their timestamps

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::types::Record;

/// Naive formats accepted for session timestamps, interpreted in local time
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S,%3f",
];

/// A session as it arrives from the snapshot, before its timestamp is checked
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawSession {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl RawSession {
    pub fn new(timestamp: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            timestamp: timestamp.into(),
            records,
        }
    }
}

/// Snapshots may carry the timestamp either as epoch millis or as text
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampRepr {
        Millis(i64),
        Text(String),
    }

    Ok(match TimestampRepr::deserialize(deserializer)? {
        TimestampRepr::Millis(ms) => ms.to_string(),
        TimestampRepr::Text(text) => text,
    })
}

/// One process run's worth of log records
///
/// The start timestamp is the session's identity: navigation links and the
/// selection refer to sessions by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub timestamp: DateTime<Local>,
    pub records: Vec<Record>,
}

impl Session {
    pub fn new(timestamp: DateTime<Local>, records: Vec<Record>) -> Self {
        Self { timestamp, records }
    }

    /// Validate a raw session's timestamp
    pub fn try_from_raw(raw: RawSession) -> Result<Self> {
        let timestamp = parse_timestamp(&raw.timestamp)?;
        Ok(Self::new(timestamp, raw.records))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl TryFrom<RawSession> for Session {
    type Error = Error;

    fn try_from(raw: RawSession) -> Result<Self> {
        Session::try_from_raw(raw)
    }
}

/// Interpret a session timestamp
///
/// Accepts, in order: integer epoch milliseconds, RFC 3339, and the naive
/// formats in [`NAIVE_FORMATS`] (local time).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Local>> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::invalid_session(raw, "empty timestamp"));
    }

    if let Ok(millis) = value.parse::<i64>() {
        return Local
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::invalid_session(raw, "epoch milliseconds out of range"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| Error::invalid_session(raw, "local time does not exist"));
        }
    }

    Err(Error::invalid_session(raw, "unrecognized timestamp format"))
}
