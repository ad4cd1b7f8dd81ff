//! Snapshot loading
//!
//! A snapshot is the already-fetched JSON export of all archived sessions,
//! either a bare array of sessions or an object with a `sessions` array.

use std::path::Path;

use logdeck_core::prelude::*;
use logdeck_core::RawSession;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    List(Vec<RawSession>),
    Wrapped { sessions: Vec<RawSession> },
}

/// Parse snapshot JSON into raw sessions
///
/// Context chains are reduced to their innermost context. Timestamps are left
/// unchecked; invalid ones are reported when the tree is built.
pub fn parse_snapshot(json: &str) -> Result<Vec<RawSession>> {
    let mut sessions = match serde_json::from_str::<SnapshotRepr>(json)? {
        SnapshotRepr::List(sessions) => sessions,
        SnapshotRepr::Wrapped { sessions } => sessions,
    };

    for session in &mut sessions {
        for record in &mut session.records {
            record.normalize_context();
        }
    }

    debug!(
        "Parsed snapshot: {} sessions, {} records",
        sessions.len(),
        sessions.iter().map(|s| s.records.len()).sum::<usize>()
    );
    Ok(sessions)
}

/// Read and parse a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Vec<RawSession>> {
    if !path.exists() {
        return Err(Error::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    parse_snapshot(&content).with_context(|| format!("Failed to parse snapshot {}", path.display()))
}
