//! Test utilities for fixture paths and row builders
//!
//! Provides helpers for locating the YAML round snapshots under `test-data/`
//! and terse constructors for the row model, used by unit tests and benches.

use std::path::{Path, PathBuf};

use crate::results::{ResultRow, RowKey, SessionEntryRow};
use crate::schema::{BasicDriver, BasicSession, BasicTeam};
use crate::types::SessionType;

/// Guidance shown when snapshot fixtures are missing from the checkout.
pub const FIXTURE_GUIDANCE: &str =
    "Round snapshots are stored under test-data/rounds/ next to Cargo.toml.";

/// Error returned when a required fixture cannot be located.
#[derive(Debug, Clone)]
pub struct FixtureError {
    message: String,
}

impl FixtureError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FixtureError {}

/// Require that a specific fixture exists on disk.
pub fn require_fixture<P: AsRef<Path>>(path: P) -> Result<PathBuf, FixtureError> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        Ok(path_ref.to_path_buf())
    } else {
        Err(FixtureError::new(format!(
            "Missing fixture: {}. {}",
            path_ref.display(),
            FIXTURE_GUIDANCE
        )))
    }
}

/// The crate's `test-data` directory, independent of the working directory.
pub fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// Every `.yaml` round snapshot in `test-data/rounds`, sorted by file name.
pub fn round_snapshot_files() -> Vec<PathBuf> {
    let rounds_dir = test_data_dir().join("rounds");

    let mut files = vec![];
    if let Ok(entries) = std::fs::read_dir(&rounds_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("yaml") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// Require a named snapshot within `test-data/rounds` and return its path.
pub fn require_round_snapshot(file_name: &str) -> Result<PathBuf, FixtureError> {
    require_fixture(test_data_dir().join("rounds").join(file_name))
}

/// Session entry with only the session fields set.
pub fn entry(session_type: &str, session_id: &str, order: Option<i32>) -> SessionEntryRow {
    SessionEntryRow {
        session_order_number: order,
        session_type: session_type.to_string(),
        session_id: session_id.to_string(),
        position: None,
        grid_position: None,
        is_classified: None,
        is_eligible_for_points: None,
        status: None,
        points: None,
        laps_completed: None,
        time: None,
        fastest_lap_time: None,
    }
}

pub fn driver(given_name: &str) -> BasicDriver {
    let id = given_name.to_lowercase();
    BasicDriver {
        url: format!("http://localhost:8000/api/alpha/drivers/{}/", id),
        id,
        abbreviation: None,
        given_name: given_name.to_string(),
        family_name: "Tester".to_string(),
    }
}

pub fn team(name: &str) -> BasicTeam {
    let id = name.to_lowercase().replace(' ', "_");
    BasicTeam {
        url: format!("http://localhost:8000/api/alpha/teams/{}/", id),
        id,
        name: name.to_string(),
        primary_color: None,
    }
}

/// Row for car `car_number` driven by `given_name`.
pub fn row(car_number: i32, given_name: &str, entries: Vec<SessionEntryRow>) -> ResultRow {
    ResultRow {
        key: RowKey {
            car_number: Some(car_number),
            given_name: given_name.to_string(),
            entry_id: format!("entry_{}", car_number),
        },
        session_entries: entries,
        car_number: Some(car_number),
        driver: driver(given_name),
        team: team("Test Team"),
    }
}

pub fn session(id: &str, session_type: &str, number: Option<i32>) -> BasicSession {
    BasicSession {
        id: id.to_string(),
        url: format!("http://localhost:8000/api/alpha/sessions/{}/", id),
        number,
        session_type: session_type.to_string(),
        type_display: SessionType::display_for_code(session_type),
    }
}
