//! Denormalized row model consumed by the result strategies.
//!
//! The loader flattens a round's relational data into one [`ResultRow`] per
//! entrant, holding a [`SessionEntryRow`] for every matching session that
//! entrant took part in. Optional fields mean "not recorded", never zero.

use std::time::Duration;

use crate::schema::{BasicDriver, BasicSession, BasicTeam, Circuit, Round, Season};

/// One entrant's data for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntryRow {
    /// Session order number within the round; absent when the session did not run
    pub session_order_number: Option<i32>,
    /// Session type code, never empty
    pub session_type: String,
    pub session_id: String,
    pub position: Option<i32>,
    pub grid_position: Option<i32>,
    pub is_classified: Option<bool>,
    pub is_eligible_for_points: Option<bool>,
    pub status: Option<String>,
    pub points: Option<f64>,
    pub laps_completed: Option<i32>,
    /// Finishing or elapsed time
    pub time: Option<Duration>,
    pub fastest_lap_time: Option<Duration>,
}

impl SessionEntryRow {
    pub fn is_type(&self, prefix: &str) -> bool {
        self.session_type.starts_with(prefix)
    }
}

/// Stable ordering key for a row: car number, given name, then entry id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    pub car_number: Option<i32>,
    pub given_name: String,
    pub entry_id: String,
}

/// One entrant's data across every matching session of a round
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub key: RowKey,
    /// Session entries in no particular order
    pub session_entries: Vec<SessionEntryRow>,
    pub car_number: Option<i32>,
    pub driver: BasicDriver,
    pub team: BasicTeam,
}

impl ResultRow {
    /// Session entries whose type starts with `prefix`.
    ///
    /// The items borrow from the row only, so they outlive a short-lived prefix.
    pub fn entries_of_type<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = &'a SessionEntryRow> {
        self.session_entries.iter().filter(move |se| se.is_type(prefix))
    }

    pub fn entry_for_session(&self, session_id: &str) -> Option<&SessionEntryRow> {
        self.session_entries.iter().find(|se| se.session_id == session_id)
    }
}

/// Everything needed to render one round's results for one result type
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    pub rows: Vec<ResultRow>,
    pub round: Round,
    pub season: Season,
    pub circuit: Circuit,
    /// Matching sessions in start time order
    pub sessions: Vec<BasicSession>,
}

impl ResultData {
    /// Type codes of the loaded sessions, in session order.
    pub fn session_types(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(|session| session.session_type.as_str())
    }
}
