//! In-memory store backed by a YAML snapshot
//!
//! Snapshots describe whole rounds: the round with its season and circuit,
//! its sessions, and every entrant with their per-session results.
//!
//! ```yaml
//! rounds:
//!   - round:
//!       id: round_monza_2024
//!       season: { id: season_2024, year: 2024 }
//!       circuit: { id: monza, name: Autodromo Nazionale Monza }
//!     sessions:
//!       - { id: monza_r, type: R, number: 1, timestamp: 2024-09-01T13:00:00Z }
//!     entries:
//!       - id: entry_leclerc
//!         car_number: 16
//!         driver: { id: leclerc, forename: Charles, surname: Leclerc }
//!         team: { id: ferrari, name: Ferrari }
//!         session_entries:
//!           - session: monza_r
//!             position: 1
//!             time: "1:14:40.727"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::store::{ResultStore, RoundEntryRecord, RoundRecord, SessionRecord};
use crate::{Result, ResultsError};

/// One round in a snapshot
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoundSnapshot {
    pub round: RoundRecord,
    pub sessions: Vec<SessionRecord>,
    pub entries: Vec<RoundEntryRecord>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
struct Snapshot {
    rounds: Vec<RoundSnapshot>,
}

/// Store that answers queries from rounds held in memory
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    rounds: Vec<RoundSnapshot>,
}

impl MemoryStore {
    pub fn new(rounds: Vec<RoundSnapshot>) -> Self {
        Self { rounds }
    }

    /// Parse a YAML snapshot.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_yaml_ng::from_str(yaml).map_err(|e| {
            ResultsError::store_failed_with_source("parse results snapshot", Box::new(e))
        })?;
        let store = Self::new(snapshot.rounds);
        store.validate()?;
        Ok(store)
    }

    /// Read a YAML snapshot from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            ResultsError::store_failed_with_source(
                format!("read results snapshot {}", path.display()),
                Box::new(e),
            )
        })?;
        let store = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), rounds = store.rounds.len(), "Loaded results snapshot");
        Ok(store)
    }

    /// Add a round, replacing any round with the same identifier.
    pub fn insert(&mut self, round: RoundSnapshot) {
        self.rounds.retain(|existing| existing.round.id != round.round.id);
        self.rounds.push(round);
    }

    pub fn rounds(&self) -> &[RoundSnapshot] {
        &self.rounds
    }

    /// Check that every session entry points at a session of its own round
    /// and that session type codes are present.
    fn validate(&self) -> Result<()> {
        for snapshot in &self.rounds {
            let session_ids: HashSet<&str> =
                snapshot.sessions.iter().map(|session| session.id.as_str()).collect();

            if let Some(session) = snapshot.sessions.iter().find(|s| s.session_type.is_empty()) {
                return Err(ResultsError::store_failed(format!(
                    "session {} in round {} has no type code",
                    session.id, snapshot.round.id
                )));
            }

            for entry in &snapshot.entries {
                for session_entry in &entry.session_entries {
                    if !session_ids.contains(session_entry.session.as_str()) {
                        return Err(ResultsError::store_failed(format!(
                            "entry {} references unknown session {} in round {}",
                            entry.id, session_entry.session, snapshot.round.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn snapshot(&self, round_id: &str) -> Option<&RoundSnapshot> {
        self.rounds.iter().find(|snapshot| snapshot.round.id == round_id)
    }
}

impl ResultStore for MemoryStore {
    fn find_round(&self, round_id: &str) -> Result<Option<RoundRecord>> {
        Ok(self.snapshot(round_id).map(|snapshot| snapshot.round.clone()))
    }

    fn sessions_for_round(&self, round_id: &str, type_prefix: &str) -> Result<Vec<SessionRecord>> {
        Ok(self
            .snapshot(round_id)
            .map(|snapshot| {
                snapshot
                    .sessions
                    .iter()
                    .filter(|session| session.session_type.starts_with(type_prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn entries_for_sessions(&self, session_ids: &[String]) -> Result<Vec<RoundEntryRecord>> {
        let wanted: HashSet<&str> = session_ids.iter().map(String::as_str).collect();
        let mut entries = Vec::new();

        for snapshot in &self.rounds {
            for entry in &snapshot.entries {
                let session_entries: Vec<_> = entry
                    .session_entries
                    .iter()
                    .filter(|se| wanted.contains(se.session.as_str()))
                    .map(|se| {
                        let mut se = se.clone();
                        se.laps.retain(|lap| lap.is_entry_fastest_lap);
                        se
                    })
                    .collect();

                if session_entries.is_empty() {
                    continue;
                }
                entries.push(RoundEntryRecord { session_entries, ..entry.clone() });
            }
        }

        debug!(sessions = session_ids.len(), entries = entries.len(), "Resolved round entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"
rounds:
  - round:
      id: round_a
      name: Test Grand Prix
      season: { id: season_2024, year: 2024 }
      circuit: { id: circuit_a, name: Test Circuit }
    sessions:
      - { id: a_fp1, type: FP1, number: 1 }
      - { id: a_q1, type: Q1, number: 2 }
      - { id: a_r, type: R, number: 3 }
    entries:
      - id: entry_one
        car_number: 1
        driver: { id: one, forename: Driver, surname: One }
        team: { id: team_one, name: Team One }
        session_entries:
          - session: a_q1
            position: 1
            laps:
              - { number: 3, time: "1:20.000", is_entry_fastest_lap: true }
              - { number: 4, time: "1:21.000", is_entry_fastest_lap: false }
          - session: a_r
            position: 2
      - id: entry_two
        car_number: 2
        driver: { id: two, forename: Driver, surname: Two }
        team: { id: team_one, name: Team One }
        session_entries:
          - session: a_fp1
            position: 1
"#;

    #[test]
    fn filters_sessions_by_prefix() {
        let store = MemoryStore::from_yaml(SNAPSHOT).unwrap();
        let sessions = store.sessions_for_round("round_a", "Q").unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "a_q1");
        assert_eq!(store.sessions_for_round("round_a", "").unwrap().len(), 3);
        assert!(store.sessions_for_round("missing", "").unwrap().is_empty());
    }

    #[test]
    fn entries_only_carry_requested_sessions_and_fastest_laps() {
        let store = MemoryStore::from_yaml(SNAPSHOT).unwrap();
        let entries = store.entries_for_sessions(&["a_q1".to_string()]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "entry_one");
        assert_eq!(entries[0].session_entries.len(), 1);
        assert_eq!(entries[0].session_entries[0].laps.len(), 1);
        assert_eq!(entries[0].session_entries[0].laps[0].number, Some(3));
    }

    #[test]
    fn unknown_round_is_none() {
        let store = MemoryStore::from_yaml(SNAPSHOT).unwrap();
        assert!(store.find_round("missing").unwrap().is_none());
        assert_eq!(store.find_round("round_a").unwrap().unwrap().season.year, 2024);
    }

    #[test]
    fn dangling_session_reference_is_rejected() {
        let yaml = r#"
rounds:
  - round: { id: round_b }
    sessions: []
    entries:
      - id: entry
        session_entries:
          - session: nowhere
"#;
        let error = MemoryStore::from_yaml(yaml).unwrap_err();
        assert!(matches!(error, ResultsError::Store { .. }));
    }

    #[test]
    fn insert_replaces_existing_round() {
        let mut store = MemoryStore::from_yaml(SNAPSHOT).unwrap();
        let mut replacement = store.rounds()[0].clone();
        replacement.sessions.truncate(1);
        store.insert(replacement);
        assert_eq!(store.rounds().len(), 1);
        assert_eq!(store.sessions_for_round("round_a", "").unwrap().len(), 1);
    }
}
