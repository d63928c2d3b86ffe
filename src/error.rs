use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RechargeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid request: {0}")]
    Preference(#[from] PreferenceError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("retry.max_attempts must be at least 1")]
    NoAttempts,

    #[error("ranking.max_validity_multiple must be at least 1 (use null to disable)")]
    ZeroValidityMultiple,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Plan '{name}' from '{provider}' is invalid: {reason}")]
    InvalidPlan {
        provider: String,
        name: String,
        reason: String,
    },

    #[error("Duplicate plan '{name}' for provider '{provider}'")]
    DuplicatePlan { provider: String, name: String },
}

/// Caller-input errors, raised before any catalog lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceError {
    #[error("daily data must be a positive number of GB, got {0}")]
    NonPositiveData(f64),

    #[error("validity must be a positive number of days, got {0}")]
    NonPositiveValidity(i64),

    #[error("validity of {0} days is out of range")]
    ValidityOutOfRange(i64),

    #[error("telecom provider must not be empty")]
    EmptyProvider,

    #[error("Failed to read request file '{path}': {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// The collaborator is temporarily unable to answer; worth retrying.
    #[error("Advisor unavailable: {0}")]
    Unavailable(String),

    #[error("Advisor timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Advisor exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Advisor response could not be used: {0}")]
    InvalidResponse(String),
}

impl AdvisorError {
    pub fn is_transient(&self) -> bool {
        matches!(self, AdvisorError::Unavailable(_))
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
