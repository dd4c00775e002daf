//! Builds the row model for one round and session filter.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use super::rows::{ResultData, ResultRow, RowKey, SessionEntryRow};
use crate::config::{LinkBuilder, ResultsConfig};
use crate::schema::{BasicDriver, BasicSession, BasicTeam, Circuit, Round, Season};
use crate::store::{LapRecord, ResultStore, RoundEntryRecord, RoundRecord, SessionRecord};
use crate::types::SessionType;
use crate::{Result, ResultsError};

/// Loads [`ResultData`] from a [`ResultStore`]
///
/// The session filter is a type prefix: `"Q"` selects Q1, Q2, Q3, QA, QB and
/// QO sessions, `"FP"` selects every practice session, `"R"` the race.
pub struct ResultDataLoader<'a, S: ResultStore + ?Sized> {
    store: &'a S,
    links: LinkBuilder<'a>,
}

impl<'a, S: ResultStore + ?Sized> ResultDataLoader<'a, S> {
    pub fn new(store: &'a S, config: &'a ResultsConfig) -> Self {
        Self { store, links: config.links() }
    }

    /// Load one round's rows for sessions matching `session_filter`.
    ///
    /// # Errors
    ///
    /// - [`ResultsError::NotFound`] if the round does not exist
    /// - [`ResultsError::NoData`] if no entrant took part in a matching session
    /// - [`ResultsError::Store`] if the store fails or returns entries for
    ///   sessions that were not asked for
    pub fn load(&self, round_id: &str, session_filter: &str) -> Result<ResultData> {
        let round = self
            .store
            .find_round(round_id)?
            .ok_or_else(|| ResultsError::not_found("round", round_id))?;

        let mut sessions = self.store.sessions_for_round(round_id, session_filter)?;
        order_sessions(&mut sessions);

        let session_ids: Vec<String> = sessions.iter().map(|s| s.id.clone()).collect();
        let entries = if session_ids.is_empty() {
            Vec::new()
        } else {
            self.store.entries_for_sessions(&session_ids)?
        };

        if entries.is_empty() {
            return Err(ResultsError::no_data(round_id, session_filter));
        }

        let sessions_by_id: HashMap<&str, &SessionRecord> =
            sessions.iter().map(|session| (session.id.as_str(), session)).collect();

        let mut rows = entries
            .into_iter()
            .map(|entry| self.build_row(entry, &sessions_by_id))
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        debug!(
            round_id,
            session_filter,
            sessions = sessions.len(),
            rows = rows.len(),
            "Loaded result rows"
        );

        let basic_sessions = sessions.iter().map(|session| self.basic_session(session)).collect();
        let (round, season, circuit) = self.round_summaries(round);

        Ok(ResultData { rows, round, season, circuit, sessions: basic_sessions })
    }

    fn build_row(
        &self,
        entry: RoundEntryRecord,
        sessions_by_id: &HashMap<&str, &SessionRecord>,
    ) -> Result<ResultRow> {
        let mut session_entries = Vec::with_capacity(entry.session_entries.len());

        for se in &entry.session_entries {
            let session = sessions_by_id.get(se.session.as_str()).ok_or_else(|| {
                ResultsError::store_failed(format!(
                    "entry {} returned for unrequested session {}",
                    entry.id, se.session
                ))
            })?;

            session_entries.push(SessionEntryRow {
                session_order_number: session.number,
                session_type: session.session_type.clone(),
                session_id: session.id.clone(),
                position: se.position,
                grid_position: se.grid,
                is_classified: se.is_classified,
                is_eligible_for_points: se.is_eligible_for_points,
                status: se.status.map(|status| status.name().to_string()),
                points: se.points,
                laps_completed: se.laps_completed,
                time: se.time,
                fastest_lap_time: fastest_lap_time(&entry.id, &session.id, &se.laps),
            });
        }

        let driver = entry.driver;
        let team = entry.team;
        Ok(ResultRow {
            key: RowKey {
                car_number: entry.car_number,
                given_name: driver.forename.clone(),
                entry_id: entry.id,
            },
            session_entries,
            car_number: entry.car_number,
            driver: BasicDriver {
                url: self.links.driver(&driver.id),
                id: driver.id,
                abbreviation: driver.abbreviation,
                given_name: driver.forename,
                family_name: driver.surname,
            },
            team: BasicTeam {
                url: self.links.team(&team.id),
                id: team.id,
                name: team.name,
                primary_color: team.primary_color,
            },
        })
    }

    fn basic_session(&self, session: &SessionRecord) -> BasicSession {
        BasicSession {
            id: session.id.clone(),
            url: self.links.session(&session.id),
            number: session.number,
            session_type: session.session_type.clone(),
            type_display: SessionType::display_for_code(&session.session_type),
        }
    }

    fn round_summaries(&self, record: RoundRecord) -> (Round, Season, Circuit) {
        let round = Round {
            url: self.links.round(&record.id),
            id: record.id,
            number: record.number,
            name: record.name,
            race_number: record.race_number,
            wikipedia: record.wikipedia,
            is_cancelled: record.is_cancelled,
        };
        let season = Season {
            url: self.links.season(&record.season.id),
            id: record.season.id,
            year: record.season.year,
            wikipedia: record.season.wikipedia,
        };
        let circuit = Circuit {
            url: self.links.circuit(&record.circuit.id),
            id: record.circuit.id,
            name: record.circuit.name,
            locality: record.circuit.locality,
            country_code: record.circuit.country_code,
            country: record.circuit.country,
            latitude: record.circuit.latitude,
            longitude: record.circuit.longitude,
            altitude: record.circuit.altitude,
            wikipedia: record.circuit.wikipedia,
        };
        (round, season, circuit)
    }
}

/// Order sessions by start time, unscheduled sessions last, then by number.
pub(crate) fn order_sessions(sessions: &mut [SessionRecord]) {
    sessions.sort_by_key(|session| {
        (session.timestamp.is_none(), session.timestamp, session.number.is_none(), session.number)
    });
}

/// Time of the lap flagged as the entry's fastest.
///
/// More than one flagged lap is a data quality problem upstream. The quickest
/// flagged lap wins, ties going to the earlier lap number.
fn fastest_lap_time(entry_id: &str, session_id: &str, laps: &[LapRecord]) -> Option<Duration> {
    let flagged: Vec<&LapRecord> = laps.iter().filter(|lap| lap.is_entry_fastest_lap).collect();

    if flagged.len() > 1 {
        warn!(
            entry_id,
            session_id,
            flagged = flagged.len(),
            "multiple laps flagged as entry fastest lap, using the quickest"
        );
    }

    flagged
        .into_iter()
        .min_by_key(|lap| (lap.time.is_none(), lap.time, lap.number.is_none(), lap.number))
        .and_then(|lap| lap.time)
}
