//! Session type codes used across a race weekend.

use serde::{Deserialize, Serialize};

/// Kind of timed session within a round.
///
/// The code is the string stored against each session (`R`, `Q2`, `FP1`, ...)
/// and the prefix of a code identifies its family: `Q` for qualifying, `SQ`
/// for sprint qualifying, `FP` for practice, `R` and `SR` for races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
pub enum SessionType {
    #[serde(rename = "R")]
    Race,
    #[serde(rename = "SR")]
    SprintRace,
    #[serde(rename = "Q1")]
    QualifyingOne,
    #[serde(rename = "Q2")]
    QualifyingTwo,
    #[serde(rename = "Q3")]
    QualifyingThree,
    /// Historical format where times from several sessions are summed.
    #[serde(rename = "QA")]
    QualifyingAggregate,
    /// Historical format where the best single lap across the session counts.
    #[serde(rename = "QB")]
    QualifyingBest,
    /// One-lap qualifying.
    #[serde(rename = "QO")]
    QualifyingOrder,
    #[serde(rename = "SQ1")]
    SprintQualifyingOne,
    #[serde(rename = "SQ2")]
    SprintQualifyingTwo,
    #[serde(rename = "SQ3")]
    SprintQualifyingThree,
    #[serde(rename = "FP1")]
    PracticeOne,
    #[serde(rename = "FP2")]
    PracticeTwo,
    #[serde(rename = "FP3")]
    PracticeThree,
}

impl SessionType {
    pub const ALL: [SessionType; 14] = [
        SessionType::Race,
        SessionType::SprintRace,
        SessionType::QualifyingOne,
        SessionType::QualifyingTwo,
        SessionType::QualifyingThree,
        SessionType::QualifyingAggregate,
        SessionType::QualifyingBest,
        SessionType::QualifyingOrder,
        SessionType::SprintQualifyingOne,
        SessionType::SprintQualifyingTwo,
        SessionType::SprintQualifyingThree,
        SessionType::PracticeOne,
        SessionType::PracticeTwo,
        SessionType::PracticeThree,
    ];

    /// Stored session code.
    pub fn code(self) -> &'static str {
        match self {
            SessionType::Race => "R",
            SessionType::SprintRace => "SR",
            SessionType::QualifyingOne => "Q1",
            SessionType::QualifyingTwo => "Q2",
            SessionType::QualifyingThree => "Q3",
            SessionType::QualifyingAggregate => "QA",
            SessionType::QualifyingBest => "QB",
            SessionType::QualifyingOrder => "QO",
            SessionType::SprintQualifyingOne => "SQ1",
            SessionType::SprintQualifyingTwo => "SQ2",
            SessionType::SprintQualifyingThree => "SQ3",
            SessionType::PracticeOne => "FP1",
            SessionType::PracticeTwo => "FP2",
            SessionType::PracticeThree => "FP3",
        }
    }

    /// Human readable session name.
    pub fn display_name(self) -> &'static str {
        match self {
            SessionType::Race => "Race",
            SessionType::SprintRace => "Sprint Race",
            SessionType::QualifyingOne => "Qualifying 1",
            SessionType::QualifyingTwo => "Qualifying 2",
            SessionType::QualifyingThree => "Qualifying 3",
            SessionType::QualifyingAggregate => "Aggregate Qualifying",
            SessionType::QualifyingBest => "Best Lap Qualifying",
            SessionType::QualifyingOrder => "One Lap Qualifying",
            SessionType::SprintQualifyingOne => "Sprint Qualifying 1",
            SessionType::SprintQualifyingTwo => "Sprint Qualifying 2",
            SessionType::SprintQualifyingThree => "Sprint Qualifying 3",
            SessionType::PracticeOne => "Practice 1",
            SessionType::PracticeTwo => "Practice 2",
            SessionType::PracticeThree => "Practice 3",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|session_type| session_type.code() == code)
    }

    /// Display name for a stored code, falling back to the code itself.
    pub fn display_for_code(code: &str) -> String {
        Self::from_code(code).map_or_else(|| code.to_string(), |t| t.display_name().to_string())
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_round_trip() {
        for session_type in SessionType::ALL {
            assert_eq!(SessionType::from_code(session_type.code()), Some(session_type));
        }
        assert_eq!(SessionType::from_code("Q4"), None);
    }

    #[test]
    fn unknown_codes_display_as_themselves() {
        assert_eq!(SessionType::display_for_code("FP2"), "Practice 2");
        assert_eq!(SessionType::display_for_code("XX"), "XX");
    }
}
