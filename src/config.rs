//! Service configuration and resource link building.
//!
//! Every summary in a results payload carries an absolute link to its full
//! resource. The base URL and per-resource paths come from [`ResultsConfig`],
//! which is usually read from a YAML file:
//!
//! ```yaml
//! base_url: https://api.example.com
//! paths:
//!   drivers: /api/alpha/drivers/
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ResultsError};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResultsConfig {
    /// Scheme and host prepended to every link (no trailing slash needed)
    pub base_url: String,
    /// Path prefixes per resource
    pub paths: LinkPaths,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000".to_string(), paths: LinkPaths::default() }
    }
}

/// Path prefix for each linked resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkPaths {
    pub drivers: String,
    pub teams: String,
    pub rounds: String,
    pub seasons: String,
    pub circuits: String,
    pub sessions: String,
    pub results: String,
}

impl Default for LinkPaths {
    fn default() -> Self {
        Self {
            drivers: "/api/alpha/drivers/".to_string(),
            teams: "/api/alpha/teams/".to_string(),
            rounds: "/api/alpha/rounds/".to_string(),
            seasons: "/api/alpha/seasons/".to_string(),
            circuits: "/api/alpha/circuits/".to_string(),
            sessions: "/api/alpha/sessions/".to_string(),
            results: "/api/alpha/results/".to_string(),
        }
    }
}

impl ResultsConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ResultsConfig = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading results configuration");
        let yaml = std::fs::read_to_string(path).map_err(|e| ResultsError::Config {
            details: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&yaml)
    }

    /// Reject configurations that cannot produce absolute links.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ResultsError::Config {
                details: format!("base_url must be an http(s) URL, got '{}'", self.base_url),
            });
        }
        Ok(())
    }

    pub fn links(&self) -> LinkBuilder<'_> {
        LinkBuilder { config: self }
    }
}

/// Builds absolute resource links from a [`ResultsConfig`].
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    config: &'a ResultsConfig,
}

impl LinkBuilder<'_> {
    fn join(&self, path: &str, segments: &[&str]) -> String {
        let mut url = self.config.base_url.trim_end_matches('/').to_string();
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
        for segment in segments {
            if !url.ends_with('/') {
                url.push('/');
            }
            url.push_str(segment);
        }
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }

    pub fn driver(&self, id: &str) -> String {
        self.join(&self.config.paths.drivers, &[id])
    }

    pub fn team(&self, id: &str) -> String {
        self.join(&self.config.paths.teams, &[id])
    }

    pub fn round(&self, id: &str) -> String {
        self.join(&self.config.paths.rounds, &[id])
    }

    pub fn season(&self, id: &str) -> String {
        self.join(&self.config.paths.seasons, &[id])
    }

    pub fn circuit(&self, id: &str) -> String {
        self.join(&self.config.paths.circuits, &[id])
    }

    pub fn session(&self, id: &str) -> String {
        self.join(&self.config.paths.sessions, &[id])
    }

    /// Link to a rendered result type for a round.
    pub fn results(&self, round_id: &str, code: &str) -> String {
        self.join(&self.config.paths.results, &[round_id, code])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = ResultsConfig::from_yaml("").unwrap();
        assert_eq!(config, ResultsConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config = ResultsConfig::from_yaml(
            "base_url: https://api.example.com/\npaths:\n  drivers: /v2/drivers\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.paths.drivers, "/v2/drivers");
        assert_eq!(config.paths.teams, LinkPaths::default().teams);
    }

    #[test]
    fn links_are_absolute_with_single_slashes() {
        let config = ResultsConfig::from_yaml(
            "base_url: https://api.example.com/\npaths:\n  drivers: /v2/drivers\n",
        )
        .unwrap();
        let links = config.links();
        assert_eq!(links.driver("norris"), "https://api.example.com/v2/drivers/norris/");
        assert_eq!(
            links.results("round_monza", "Q"),
            "https://api.example.com/api/alpha/results/round_monza/Q/"
        );
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let error = ResultsConfig::from_yaml("base_url: [unclosed").unwrap_err();
        assert!(matches!(error, ResultsError::Config { .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let error = ResultsConfig::from_yaml("base_url: ftp://example.com").unwrap_err();
        assert!(matches!(error, ResultsError::Config { .. }));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/results.yaml");
        assert_eq!(ResultsConfig::load(path).unwrap(), ResultsConfig::default());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let error = ResultsConfig::load("/nonexistent/f1-results.yml").unwrap_err();
        assert!(matches!(error, ResultsError::Config { .. }));
    }
}
