//! Picks a result strategy for a session filter and renders the table.

use std::cmp::Ordering;

use tracing::{debug, error};

use super::constants::result_type_title;
use super::rows::ResultData;
use super::strategies::{
    AggregateQualifyingStrategy, BestLapQualifyingStrategy, KnockoutQualifyingStrategy,
    PracticeResultStrategy, RaceResultStrategy, ResultRenderer, ResultStrategy,
};
use crate::Result;
use crate::schema::{BasicSession, ResultItem, Results};

/// Choose the result strategy for `session_filter` given the loaded sessions.
///
/// | Filter | Sessions present | Strategy |
/// |--------|------------------|----------|
/// | `Q`, `SQ` | any `QA` | aggregate qualifying |
/// | `Q`, `SQ` | any `QB` | best lap qualifying |
/// | `Q`, `SQ` | otherwise | knockout qualifying |
/// | `FP`, `FP1`, `FP2`, `FP3` | | practice |
/// | anything else | | race |
///
/// One-hour qualifying (`QO`) has no dedicated format yet and falls back to
/// knockout rendering with an error logged.
pub fn select_strategy(session_filter: &str, sessions: &[BasicSession]) -> Result<ResultStrategy> {
    let has_type =
        |code: &str| sessions.iter().any(|session| session.session_type.starts_with(code));

    let strategy = match session_filter {
        "Q" | "SQ" if has_type("QA") => {
            ResultStrategy::AggregateQualifying(AggregateQualifyingStrategy::new(sessions))
        }
        "Q" | "SQ" if has_type("QB") => {
            ResultStrategy::BestLapQualifying(BestLapQualifyingStrategy::new(sessions))
        }
        "Q" | "SQ" => {
            if has_type("QO") {
                error!(
                    session_filter,
                    "QO sessions are not supported yet, rendering as knockout qualifying"
                );
            }
            ResultStrategy::KnockoutQualifying(KnockoutQualifyingStrategy::new(
                sessions,
                session_filter,
            )?)
        }
        "FP" | "FP1" | "FP2" | "FP3" => {
            ResultStrategy::Practice(PracticeResultStrategy::new(sessions, session_filter))
        }
        _ => ResultStrategy::Race(RaceResultStrategy::new(session_filter)?),
    };

    debug!(session_filter, strategy = strategy.name(), "Selected result strategy");
    Ok(strategy)
}

/// Renders a [`Results`] table from loaded [`ResultData`]
#[derive(Debug)]
pub struct ResultsOrchestrator {
    session_filter: String,
    data: ResultData,
}

impl ResultsOrchestrator {
    pub fn new(session_filter: impl Into<String>, data: ResultData) -> Self {
        Self { session_filter: session_filter.into(), data }
    }

    /// Render every row the selected strategy accepts, ordered by position.
    ///
    /// Rows without a position keep their relative order and go last.
    pub fn render(self) -> Result<Results> {
        let strategy = select_strategy(&self.session_filter, &self.data.sessions)?;

        let mut results = Vec::with_capacity(self.data.rows.len());
        for row in &self.data.rows {
            if strategy.should_render(row)? {
                results.push(strategy.render(row)?);
            }
        }
        results.sort_by(compare_positions);

        let title = match result_type_title(&self.session_filter) {
            Some(title) => title.to_string(),
            None => {
                error!(session_filter = %self.session_filter, "missing title for result type");
                self.session_filter.clone()
            }
        };

        Ok(Results {
            season: self.data.season,
            round: self.data.round,
            circuit: self.data.circuit,
            sessions: self.data.sessions,
            title,
            code: self.session_filter,
            component_keys: strategy.component_keys(),
            results,
        })
    }
}

fn compare_positions(a: &ResultItem, b: &ResultItem) -> Ordering {
    match (a.position, b.position) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultsError;
    use crate::results::rows::ResultRow;
    use crate::schema::{Circuit, Round, Season};
    use crate::test_utils::{entry, row, session};

    fn data(sessions: Vec<BasicSession>, rows: Vec<ResultRow>) -> ResultData {
        ResultData {
            rows,
            round: Round {
                id: "round_1".into(),
                name: Some("Test Grand Prix".into()),
                ..Default::default()
            },
            season: Season { id: "season_2024".into(), year: 2024, ..Default::default() },
            circuit: Circuit {
                id: "circuit_1".into(),
                name: "Test Circuit".into(),
                ..Default::default()
            },
            sessions,
        }
    }

    fn race_row(car: i32, name: &str, position: Option<i32>) -> ResultRow {
        let mut race = entry("R", "race", Some(1));
        race.position = position;
        row(car, name, vec![race])
    }

    #[test]
    fn results_sort_by_position_with_unpositioned_last() {
        let sessions = vec![session("race", "R", Some(1))];
        let rows =
            vec![race_row(1, "A", Some(3)), race_row(2, "B", None), race_row(3, "C", Some(1))];

        let results = ResultsOrchestrator::new("R", data(sessions, rows)).render().unwrap();
        let positions: Vec<Option<i32>> =
            results.results.iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![Some(1), Some(3), None]);
        assert_eq!(results.title, "Race");
        assert_eq!(results.code, "R");
        assert_eq!(results.component_keys, vec!["GRID"]);
        assert_eq!(results.season.year, 2024);
    }

    #[test]
    fn unpositioned_rows_keep_their_order() {
        let sessions = vec![session("race", "R", Some(1))];
        let rows = vec![race_row(5, "E", None), race_row(6, "F", None), race_row(7, "G", Some(2))];

        let results = ResultsOrchestrator::new("R", data(sessions, rows)).render().unwrap();
        let cars: Vec<Option<i32>> = results.results.iter().map(|item| item.car_number).collect();
        assert_eq!(cars, vec![Some(7), Some(5), Some(6)]);
    }

    #[test]
    fn rows_without_race_entry_are_skipped() {
        let sessions = vec![session("race", "R", Some(1))];
        let rows = vec![race_row(1, "A", Some(1)), row(2, "B", vec![])];

        let results = ResultsOrchestrator::new("R", data(sessions, rows)).render().unwrap();
        assert_eq!(results.results.len(), 1);
    }

    #[test]
    fn qualifying_dispatch_follows_session_types() {
        let knockout = vec![session("q1", "Q1", Some(1)), session("q2", "Q2", Some(2))];
        assert_eq!(select_strategy("Q", &knockout).unwrap().name(), "knockout_qualifying");

        let aggregate = vec![session("qa1", "QA", Some(1)), session("qa2", "QA", Some(2))];
        assert_eq!(select_strategy("Q", &aggregate).unwrap().name(), "aggregate_qualifying");

        let best_lap = vec![session("qb", "QB", Some(1))];
        assert_eq!(select_strategy("Q", &best_lap).unwrap().name(), "best_lap_qualifying");

        let sprint = vec![session("sq1", "SQ1", Some(1))];
        assert_eq!(select_strategy("SQ", &sprint).unwrap().name(), "knockout_qualifying");
    }

    #[test]
    fn other_filters_dispatch_to_practice_or_race() {
        let practice = vec![session("fp1", "FP1", Some(1))];
        assert_eq!(select_strategy("FP1", &practice).unwrap().name(), "practice");
        assert_eq!(select_strategy("FP", &practice).unwrap().name(), "practice");

        let race = vec![session("sr", "SR", Some(1))];
        assert_eq!(select_strategy("SR", &race).unwrap().name(), "race");
    }

    #[test]
    fn unknown_filter_fails_race_setup() {
        let sessions = vec![session("x", "X", Some(1))];
        assert!(matches!(
            select_strategy("X", &sessions),
            Err(ResultsError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn one_hour_qualifying_falls_back_to_knockout() {
        let sessions = vec![session("qo", "QO", Some(1))];
        let mut qo = entry("QO", "qo", Some(1));
        qo.position = Some(1);
        let rows = vec![row(27, "Nico", vec![qo])];

        let results = ResultsOrchestrator::new("Q", data(sessions, rows)).render().unwrap();
        assert_eq!(results.component_keys, vec!["Q1"]);
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].components["Q1"].name, "Qualifying 1");
    }

    #[test]
    fn integrity_errors_abort_rendering() {
        let sessions = vec![session("race_a", "R", Some(1)), session("race_b", "R", Some(2))];
        let rows = vec![row(
            1,
            "Max",
            vec![entry("R", "race_a", Some(1)), entry("R", "race_b", Some(2))],
        )];

        let error = ResultsOrchestrator::new("R", data(sessions, rows)).render().unwrap_err();
        assert!(matches!(error, ResultsError::DataIntegrity { .. }));
    }
}
