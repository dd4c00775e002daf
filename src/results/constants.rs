//! Display lookup tables for result types and component columns.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Titles for each result type code.
pub static RESULT_TYPE_TITLES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("Q", "Qualifying"),
            ("SQ", "Sprint Qualifying"),
            ("R", "Race"),
            ("SR", "Sprint Race"),
            ("FP", "Free Practice"),
            ("FP1", "Practice 1"),
            ("FP2", "Practice 2"),
            ("FP3", "Practice 3"),
        ])
    });

/// Display names for component keys.
pub static COMPONENT_DISPLAY_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("FP1", "Practice 1"),
            ("FP2", "Practice 2"),
            ("FP3", "Practice 3"),
            ("Q1", "Qualifying 1"),
            ("Q2", "Qualifying 2"),
            ("Q3", "Qualifying 3"),
            ("SQ1", "Sprint Qualifying 1"),
            ("SQ2", "Sprint Qualifying 2"),
            ("SQ3", "Sprint Qualifying 3"),
            ("GRID", "Grid Position"),
            ("SGRID", "Sprint Grid Position"),
        ])
    });

/// Result types every round offers, even before any session has run.
pub const ALWAYS_AVAILABLE_RESULT_TYPES: [&str; 2] = ["R", "Q"];

/// Result types offered when a session with a matching type prefix exists.
pub const OPTIONAL_RESULT_TYPES: [&str; 6] = ["SQ", "SR", "FP", "FP1", "FP2", "FP3"];

pub fn result_type_title(code: &str) -> Option<&'static str> {
    RESULT_TYPE_TITLES.get(code).copied()
}

pub fn component_display_name(key: &str) -> Option<&'static str> {
    COMPONENT_DISPLAY_NAMES.get(key).copied()
}
