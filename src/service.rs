//! Request-level entry points: available result types and rendered results.

use tracing::{error, info};

use crate::config::ResultsConfig;
use crate::results::constants::{
    ALWAYS_AVAILABLE_RESULT_TYPES, OPTIONAL_RESULT_TYPES, result_type_title,
};
use crate::results::{ResultDataLoader, ResultsOrchestrator};
use crate::schema::{AvailableResultsForRound, AvailableResultsItem, Results};
use crate::store::ResultStore;
use crate::{Result, ResultsError};

/// Result type codes offered for a round with the given session types.
///
/// `R` and `Q` are always offered so a round's pages exist before any session
/// has run. Optional types follow in a fixed order when some session type
/// starts with the code.
pub fn available_result_types<'a, I>(session_types: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let session_types: Vec<&str> = session_types.into_iter().collect();

    let mut codes = ALWAYS_AVAILABLE_RESULT_TYPES.to_vec();
    codes.extend(
        OPTIONAL_RESULT_TYPES
            .into_iter()
            .filter(|code| session_types.iter().any(|session_type| session_type.starts_with(code))),
    );
    codes
}

/// Serves results for rounds held in a [`ResultStore`]
///
/// ```rust
/// use f1_results::{MemoryStore, ResultsConfig, ResultsService};
///
/// let store = MemoryStore::from_yaml(r#"
/// rounds:
///   - round:
///       id: round_1
///       season: { id: season_2024, year: 2024 }
///       circuit: { id: bahrain, name: Bahrain International Circuit }
///     sessions:
///       - { id: r1, type: R, number: 1 }
///     entries:
///       - id: entry_1
///         car_number: 1
///         driver: { id: verstappen, forename: Max, surname: Verstappen }
///         team: { id: red_bull, name: Red Bull }
///         session_entries:
///           - { session: r1, position: 1, grid: 1 }
/// "#)?;
///
/// let service = ResultsService::new(store, ResultsConfig::default());
/// let results = service.results("round_1", "R")?;
/// assert_eq!(results.title, "Race");
/// assert_eq!(results.results[0].position_text.as_deref(), Some("1"));
/// # Ok::<(), f1_results::ResultsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ResultsService<S: ResultStore> {
    store: S,
    config: ResultsConfig,
}

impl<S: ResultStore> ResultsService<S> {
    pub fn new(store: S, config: ResultsConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ResultsConfig {
        &self.config
    }

    /// Result types a round offers, with titles and links.
    pub fn available_result_types(&self, round_id: &str) -> Result<AvailableResultsForRound> {
        let round = self
            .store
            .find_round(round_id)?
            .ok_or_else(|| ResultsError::not_found("round", round_id))?;
        let sessions = self.store.sessions_for_round(round_id, "")?;

        let links = self.config.links();
        let available_results = available_result_types(
            sessions.iter().map(|session| session.session_type.as_str()),
        )
        .into_iter()
        .map(|code| AvailableResultsItem {
            url: links.results(round_id, code),
            result_type: code.to_string(),
            title: result_type_title(code).unwrap_or(code).to_string(),
        })
        .collect();

        Ok(AvailableResultsForRound {
            year: round.season.year,
            round_name: round.name,
            round_number: round.number,
            available_results,
        })
    }

    /// Render one round's results for the result type `code`.
    ///
    /// # Errors
    ///
    /// - [`ResultsError::NotFound`] if the round does not exist
    /// - [`ResultsError::InvalidResultType`] if the round does not offer `code`
    /// - [`ResultsError::NoData`] if nobody took part in a matching session
    /// - [`ResultsError::DataIntegrity`] if stored results contradict the format
    pub fn results(&self, round_id: &str, code: &str) -> Result<Results> {
        let available = self.available_result_types(round_id)?;
        if !available.available_results.iter().any(|item| item.result_type == code) {
            return Err(ResultsError::invalid_result_type(round_id, code));
        }

        let rendered = ResultDataLoader::new(&self.store, &self.config)
            .load(round_id, code)
            .and_then(|data| ResultsOrchestrator::new(code, data).render());

        match rendered {
            Ok(results) => {
                info!(round_id, code, rows = results.results.len(), "Rendered results");
                Ok(results)
            }
            Err(e @ ResultsError::DataIntegrity { .. }) => {
                error!(
                    round_id,
                    session_filter = code,
                    error = %e,
                    "Results data failed integrity checks"
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ErrorBody;
    use crate::stores::MemoryStore;

    const SNAPSHOT: &str = r#"
rounds:
  - round:
      id: round_imola
      name: Emilia Romagna Grand Prix
      number: 7
      season: { id: season_2024, year: 2024 }
      circuit: { id: imola, name: Autodromo Enzo e Dino Ferrari }
    sessions:
      - { id: imola_fp1, type: FP1, number: 1 }
      - { id: imola_fp2, type: FP2, number: 2 }
      - { id: imola_r, type: R, number: 6 }
    entries:
      - id: entry_1
        car_number: 1
        driver: { id: verstappen, forename: Max, surname: Verstappen }
        team: { id: red_bull, name: Red Bull }
        session_entries:
          - { session: imola_r, position: 1, grid: 1 }
          - session: imola_r
            position: 2
  - round:
      id: round_future
      name: Future Grand Prix
      season: { id: season_2030, year: 2030 }
      circuit: { id: future, name: Future Circuit }
"#;

    fn service() -> ResultsService<MemoryStore> {
        ResultsService::new(MemoryStore::from_yaml(SNAPSHOT).unwrap(), ResultsConfig::default())
    }

    #[test]
    fn available_types_include_defaults_and_present_sessions() {
        assert_eq!(available_result_types(["FP1", "FP2", "R"]), vec!["R", "Q", "FP", "FP1", "FP2"]);
        assert_eq!(available_result_types(["SQ1", "SR"]), vec!["R", "Q", "SQ", "SR"]);
        assert_eq!(available_result_types(Vec::<&str>::new()), vec!["R", "Q"]);
    }

    #[test]
    fn available_types_for_round() {
        let available = service().available_result_types("round_imola").unwrap();
        assert_eq!(available.year, 2024);
        assert_eq!(available.round_name.as_deref(), Some("Emilia Romagna Grand Prix"));
        assert_eq!(available.round_number, Some(7));

        let codes: Vec<&str> =
            available.available_results.iter().map(|item| item.result_type.as_str()).collect();
        assert_eq!(codes, vec!["R", "Q", "FP", "FP1", "FP2"]);
        assert_eq!(available.available_results[2].title, "Free Practice");
        assert_eq!(
            available.available_results[0].url,
            "http://localhost:8000/api/alpha/results/round_imola/R/"
        );
    }

    #[test]
    fn unknown_round_is_not_found() {
        let error = service().results("round_missing", "R").unwrap_err();
        assert_eq!(error.status_code(), 404);
        assert_eq!(ErrorBody::from(&error).error, "Round not found");
    }

    #[test]
    fn unavailable_code_is_rejected() {
        let error = service().results("round_imola", "SQ").unwrap_err();
        assert!(matches!(error, ResultsError::InvalidResultType { .. }));
        assert_eq!(ErrorBody::from(&error).error, "Invalid session filter for this round");
    }

    #[test]
    fn always_available_code_without_sessions_has_no_data() {
        let error = service().results("round_future", "Q").unwrap_err();
        assert!(matches!(error, ResultsError::NoData { .. }));
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn integrity_failures_are_server_errors() {
        let error = service().results("round_imola", "R").unwrap_err();
        assert!(matches!(error, ResultsError::DataIntegrity { .. }));
        assert_eq!(error.status_code(), 500);
        assert_eq!(ErrorBody::from(&error).error, "Failed to render results");
    }
}
