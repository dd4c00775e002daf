//! Rendered results payloads

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::shared::{BasicDriver, BasicSession, BasicTeam, Circuit, Round, Season};

/// A named sub-measurement shown next to a result line, such as a Q2 time or
/// the starting grid slot.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct ResultComponent {
    /// Column key, unique within one result line
    pub key: String,
    /// Display name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Formatted time (e.g. "1:24.319")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// One entrant's line in a results table
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct ResultItem {
    pub driver: BasicDriver,
    pub team: BasicTeam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Position for display: the number, "NC" when not classified, or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_classified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_number: Option<i32>,
    /// Components keyed by [`ResultComponent::key`], in render order
    pub components: IndexMap<String, ResultComponent>,
}

/// Complete results table for one round and result type
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct Results {
    pub season: Season,
    pub round: Round,
    pub circuit: Circuit,
    /// Sessions the results were drawn from, in start time order
    pub sessions: Vec<BasicSession>,
    /// Display title (e.g. "Qualifying")
    pub title: String,
    /// Result type code (e.g. "Q")
    pub code: String,
    /// Component columns, in display order
    pub component_keys: Vec<String>,
    /// Result lines ordered by position, unpositioned lines last
    pub results: Vec<ResultItem>,
}

/// One result type offered for a round
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct AvailableResultsItem {
    /// Link to the rendered results
    pub url: String,
    /// Result type code
    #[serde(rename = "type")]
    pub result_type: String,
    pub title: String,
}

/// Result types offered for a round
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(default)]
pub struct AvailableResultsForRound {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_number: Option<i32>,
    pub available_results: Vec<AvailableResultsItem>,
}

/// Error body returned to API callers
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
pub struct ErrorBody {
    pub error: String,
}

impl From<&crate::ResultsError> for ErrorBody {
    fn from(error: &crate::ResultsError) -> Self {
        Self { error: error.public_message() }
    }
}
