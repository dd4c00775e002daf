//! Summary records embedded in result payloads
//!
//! Drivers, teams, seasons, rounds, circuits and sessions appear in every
//! results response in a reduced form with a link to their full resource.

use serde::{Deserialize, Serialize};

/// Driver summary
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct BasicDriver {
    /// API identifier
    pub id: String,
    /// Link to the driver resource
    pub url: String,
    /// Three letter abbreviation (e.g. "VER")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    /// Given name
    pub given_name: String,
    /// Family name
    pub family_name: String,
}

/// Team summary
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct BasicTeam {
    /// API identifier
    pub id: String,
    /// Link to the team resource
    pub url: String,
    /// Team name
    pub name: String,
    /// Livery colour (hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

/// Season summary
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct Season {
    pub id: String,
    pub url: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
}

/// Round summary
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct Round {
    pub id: String,
    pub url: String,
    /// Round number within the season
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    /// Event name (e.g. "Italian Grand Prix")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overall championship race number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    pub is_cancelled: bool,
}

/// Circuit summary
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct Circuit {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// ISO 3166-1 alpha-3 country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
}

/// Session summary
///
/// Lists of sessions are always ordered by start time; that order numbers
/// qualifying stages and practice sessions downstream.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct BasicSession {
    pub id: String,
    pub url: String,
    /// Session order number within the round
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    /// Session type code (e.g. R, Q1, FP1)
    #[serde(rename = "type")]
    pub session_type: String,
    /// Display name for the session type
    pub type_display: String,
}
