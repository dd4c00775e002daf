//! Error types for results loading and rendering.
//!
//! All failures in this crate are terminal for the request that produced them:
//! nothing here is retried. Errors carry enough context for operators while
//! [`ResultsError::public_message`] gives the text that is safe to hand back to
//! an API caller.
//!
//! ## Error Categories
//!
//! - **Not found**: the round does not exist, or the requested result type is
//!   not available for it
//! - **No data**: the round exists but no entrant took part in a matching session
//! - **Data integrity**: the stored results contradict the rules of the
//!   selected result format (e.g. two race rows for one car)
//! - **Configuration**: a renderer was built with arguments it cannot support
//! - **Store**: the persistence collaborator failed
//!
//! ```rust
//! use f1_results::ResultsError;
//!
//! let error = ResultsError::not_found("round", "round_monza_2024");
//! assert!(error.is_client_error());
//! assert_eq!(error.status_code(), 404);
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Result type alias for results operations.
pub type Result<T, E = ResultsError> = std::result::Result<T, E>;

/// Main error type for results operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Result type '{code}' is not available for round {round_id}")]
    InvalidResultType { round_id: String, code: String },

    #[error("No entrants found for round {round_id} matching session filter '{filter}'")]
    NoData { round_id: String, filter: String },

    #[error("Data integrity error in {context}: {details}")]
    DataIntegrity { context: String, details: String },

    #[error("No session entry found for component session {session_id}")]
    Lookup { session_id: String },

    #[error("Invalid renderer configuration: {details}")]
    InvalidConfiguration { details: String },

    #[error("Result store operation failed: {operation}")]
    Store {
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl ResultsError {
    /// Results rendering is a single synchronous pass over one snapshot, so
    /// no failure is worth retrying at this layer.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns whether the caller asked for something that does not exist.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResultsError::NotFound { .. }
                | ResultsError::InvalidResultType { .. }
                | ResultsError::NoData { .. }
        )
    }

    /// HTTP-equivalent status for the transport boundary.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 404 } else { 500 }
    }

    /// Message that can be shown to API callers.
    ///
    /// Server-side failures collapse to a generic message so internal
    /// identifiers never leak through the response body.
    pub fn public_message(&self) -> String {
        match self {
            ResultsError::NotFound { resource, .. } => {
                let mut chars = resource.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "Not found".to_string(),
                }
            }
            ResultsError::InvalidResultType { .. } => {
                "Invalid session filter for this round".to_string()
            }
            ResultsError::NoData { .. } => "No results available for this round yet".to_string(),
            _ => "Failed to render results".to_string(),
        }
    }

    /// Helper constructor for missing resources.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        ResultsError::NotFound { resource: resource.into(), id: id.into() }
    }

    /// Helper constructor for result types that a round does not offer.
    pub fn invalid_result_type(round_id: impl Into<String>, code: impl Into<String>) -> Self {
        ResultsError::InvalidResultType { round_id: round_id.into(), code: code.into() }
    }

    /// Helper constructor for rounds without any matching entrants.
    pub fn no_data(round_id: impl Into<String>, filter: impl Into<String>) -> Self {
        ResultsError::NoData { round_id: round_id.into(), filter: filter.into() }
    }

    /// Helper constructor for data integrity failures.
    pub fn data_integrity(context: impl Into<String>, details: impl Into<String>) -> Self {
        ResultsError::DataIntegrity { context: context.into(), details: details.into() }
    }

    /// Helper constructor for invalid renderer configuration.
    pub fn invalid_configuration(details: impl Into<String>) -> Self {
        ResultsError::InvalidConfiguration { details: details.into() }
    }

    /// Helper constructor for store failures.
    pub fn store_failed(operation: impl Into<String>) -> Self {
        ResultsError::Store { operation: operation.into(), source: None }
    }

    /// Helper constructor for store failures with source.
    pub fn store_failed_with_source(
        operation: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        ResultsError::Store { operation: operation.into(), source: Some(source) }
    }
}

impl From<serde_yaml_ng::Error> for ResultsError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ResultsError::Config { details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn messages_include_their_context(
            round_id in "[a-z_0-9]{1,20}",
            code in "[A-Z0-9]{1,4}",
            details in ".*",
        ) {
            let no_data = ResultsError::no_data(round_id.clone(), code.clone());
            prop_assert!(no_data.to_string().contains(&round_id));
            prop_assert!(no_data.to_string().contains(&code));

            let invalid = ResultsError::invalid_result_type(round_id.clone(), code.clone());
            prop_assert!(invalid.to_string().contains(&code));

            let integrity = ResultsError::data_integrity("aggregate qualifying", details.clone());
            prop_assert!(integrity.to_string().contains(&details));
        }

        #[test]
        fn server_errors_never_leak_details(details in "[a-z]{5,30}") {
            let integrity = ResultsError::data_integrity("race", details.clone());
            prop_assert!(!integrity.public_message().contains(&details));
            prop_assert_eq!(integrity.status_code(), 500);
        }
    }

    #[test]
    fn client_errors_map_to_not_found() {
        assert_eq!(ResultsError::not_found("round", "x").status_code(), 404);
        assert_eq!(ResultsError::invalid_result_type("x", "SR").status_code(), 404);
        assert_eq!(ResultsError::no_data("x", "R").status_code(), 404);
        assert_eq!(ResultsError::invalid_configuration("bad").status_code(), 500);
        assert_eq!(ResultsError::Lookup { session_id: "s".into() }.status_code(), 500);
    }

    #[test]
    fn public_messages_distinguish_missing_round_from_missing_results() {
        let missing = ResultsError::not_found("round", "round_x");
        let empty = ResultsError::no_data("round_x", "FP1");
        assert_eq!(missing.public_message(), "Round not found");
        assert_ne!(missing.public_message(), empty.public_message());
    }

    #[test]
    fn nothing_is_retryable() {
        assert!(!ResultsError::store_failed("find_round").is_retryable());
        assert!(!ResultsError::data_integrity("race", "dup").is_retryable());
    }

    #[test]
    fn store_errors_chain_their_source() {
        let source = std::io::Error::other("disk gone");
        let error = ResultsError::store_failed_with_source("load fixture", Box::new(source));
        let chained = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(chained.as_deref(), Some("disk gone"));
    }

    #[test]
    fn error_is_send_sync_static() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<ResultsError>();
    }
}
