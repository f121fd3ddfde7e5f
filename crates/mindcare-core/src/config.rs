//! Clinic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{SessionType, DEFAULT_CATEGORIES};
use crate::router::Screen;

/// Application-level constants
pub const APP_NAME: &str = "MindCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "mindcare_core=info";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime configuration. Missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicConfig {
    /// Screen shown at startup
    pub initial_screen: Screen,
    /// Session type given to newly added patients
    pub default_session_type: SessionType,
    /// Category suggestions for the ledger entry form
    pub transaction_categories: Vec<String>,
    /// Category preselected in a fresh entry form
    pub default_category: String,
    /// Simulated upload duration
    pub upload_delay_ms: u64,
    /// Simulated voice-note processing duration
    pub recording_delay_ms: u64,
    pub log_filter: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            initial_screen: Screen::Dashboard,
            default_session_type: SessionType::InPerson,
            transaction_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            default_category: DEFAULT_CATEGORIES[0].to_string(),
            upload_delay_ms: 2000,
            recording_delay_ms: 1500,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClinicConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClinicConfig::default();
        assert_eq!(config.initial_screen, Screen::Dashboard);
        assert_eq!(config.default_category, "Session Fee");
        assert_eq!(config.transaction_categories.len(), 6);
        assert_eq!(config.upload_delay_ms, 2000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ClinicConfig::from_json(r#"{"initialScreen": "patients", "uploadDelayMs": 10}"#)
                .unwrap();
        assert_eq!(config.initial_screen, Screen::Patients);
        assert_eq!(config.upload_delay_ms, 10);
        assert_eq!(config.recording_delay_ms, 1500);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ClinicConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"defaultSessionType": "remote"}}"#).unwrap();

        let config = ClinicConfig::load(file.path()).unwrap();
        assert_eq!(config.default_session_type, SessionType::Remote);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ClinicConfig::load("/nonexistent/mindcare.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ClinicConfig::default();
        let parsed = ClinicConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "MindCare");
    }
}
