//! Store trait for results data sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;
use crate::types::SessionStatus;
use crate::types::time::optional_duration;

/// Read-only access to the relational results data
///
/// Stores abstract over where rounds, sessions and entries live (a database,
/// an in-memory snapshot). Each call is expected to read from one consistent
/// snapshot; the loader issues them in sequence for a single request.
pub trait ResultStore {
    /// Look up a round together with its season and circuit.
    ///
    /// Returns:
    /// - `Ok(Some(round))` - Round exists
    /// - `Ok(None)` - No round with this identifier
    /// - `Err(e)` - Store failure
    fn find_round(&self, round_id: &str) -> Result<Option<RoundRecord>>;

    /// Sessions of a round whose type code starts with `type_prefix`.
    ///
    /// An empty prefix returns every session of the round. Ordering is not
    /// part of the contract; the loader orders sessions by start time.
    fn sessions_for_round(&self, round_id: &str, type_prefix: &str) -> Result<Vec<SessionRecord>>;

    /// Entrants that took part in any of the given sessions.
    ///
    /// Each returned entry only carries its session entries for those
    /// sessions, each with the laps flagged as the entry's fastest.
    fn entries_for_sessions(&self, session_ids: &[String]) -> Result<Vec<RoundEntryRecord>>;
}

impl<S: ResultStore + ?Sized> ResultStore for &S {
    fn find_round(&self, round_id: &str) -> Result<Option<RoundRecord>> {
        (**self).find_round(round_id)
    }

    fn sessions_for_round(&self, round_id: &str, type_prefix: &str) -> Result<Vec<SessionRecord>> {
        (**self).sessions_for_round(round_id, type_prefix)
    }

    fn entries_for_sessions(&self, session_ids: &[String]) -> Result<Vec<RoundEntryRecord>> {
        (**self).entries_for_sessions(session_ids)
    }
}

/// Round row joined with its season and circuit
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoundRecord {
    pub id: String,
    pub name: Option<String>,
    pub number: Option<i32>,
    pub race_number: Option<i32>,
    pub wikipedia: Option<String>,
    pub is_cancelled: bool,
    pub season: SeasonRecord,
    pub circuit: CircuitRecord,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeasonRecord {
    pub id: String,
    pub year: i32,
    pub wikipedia: Option<String>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CircuitRecord {
    pub id: String,
    pub name: String,
    pub locality: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub wikipedia: Option<String>,
}

/// One timed session of a round
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionRecord {
    pub id: String,
    /// Session order number; absent when the session never took place
    pub number: Option<i32>,
    /// Session type code (R, Q1, FP2, ...)
    #[serde(rename = "type")]
    pub session_type: String,
    /// Scheduled start
    pub timestamp: Option<DateTime<Utc>>,
}

/// A car entered for a round: one driver with one team
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoundEntryRecord {
    pub id: String,
    pub car_number: Option<i32>,
    pub driver: DriverRecord,
    pub team: TeamRecord,
    pub session_entries: Vec<SessionEntryRecord>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverRecord {
    pub id: String,
    pub forename: String,
    pub surname: String,
    pub abbreviation: Option<String>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub primary_color: Option<String>,
}

/// One entrant's result in one session
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionEntryRecord {
    /// Identifier of the session this entry belongs to
    pub session: String,
    pub position: Option<i32>,
    pub grid: Option<i32>,
    pub is_classified: Option<bool>,
    pub is_eligible_for_points: Option<bool>,
    pub status: Option<SessionStatus>,
    pub points: Option<f64>,
    pub laps_completed: Option<i32>,
    /// Finishing or elapsed time
    #[serde(with = "optional_duration")]
    pub time: Option<Duration>,
    /// Laps flagged as this entry's fastest lap
    pub laps: Vec<LapRecord>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LapRecord {
    pub number: Option<i32>,
    #[serde(with = "optional_duration")]
    pub time: Option<Duration>,
    pub is_entry_fastest_lap: bool,
}
