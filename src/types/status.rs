//! Classification status of a session entry.

use serde::{Deserialize, Serialize};

/// How an entrant's session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Finished,
    Lapped,
    Retired,
    Disqualified,
    DidNotStart,
    DidNotQualify,
    DidNotPrequalify,
    Withdrawn,
    NotClassified,
}

impl SessionStatus {
    /// Name exposed on rendered results.
    pub fn name(self) -> &'static str {
        match self {
            SessionStatus::Finished => "FINISHED",
            SessionStatus::Lapped => "LAPPED",
            SessionStatus::Retired => "RETIRED",
            SessionStatus::Disqualified => "DISQUALIFIED",
            SessionStatus::DidNotStart => "DID_NOT_START",
            SessionStatus::DidNotQualify => "DID_NOT_QUALIFY",
            SessionStatus::DidNotPrequalify => "DID_NOT_PREQUALIFY",
            SessionStatus::Withdrawn => "WITHDRAWN",
            SessionStatus::NotClassified => "NOT_CLASSIFIED",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
