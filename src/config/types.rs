use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Catalog file (JSON or YAML). The bundled catalog is used when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub ranking: RankingPolicy,

    #[serde(default)]
    pub advisor: AdvisorConfig,

    #[serde(default)]
    pub retry: RetryConfig,
}

/// Caps and bounds applied by the classifier and value analyzer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct RankingPolicy {
    #[serde(default = "default_max_exact_matches")]
    pub max_exact_matches: usize,

    #[serde(default = "default_max_similar_plans")]
    pub max_similar_plans: usize,

    #[serde(default = "default_max_value_plans")]
    pub max_value_plans: usize,

    /// Longest candidate validity considered, as a multiple of the baseline's.
    /// `null` removes the bound.
    #[serde(default = "default_max_validity_multiple")]
    pub max_validity_multiple: Option<u32>,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            max_exact_matches: default_max_exact_matches(),
            max_similar_plans: default_max_similar_plans(),
            max_value_plans: default_max_value_plans(),
            max_validity_multiple: default_max_validity_multiple(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub kind: AdvisorKind,

    #[serde(default = "default_advisor_binary")]
    pub binary: PathBuf,

    #[serde(default = "default_advisor_model")]
    pub model: String,

    /// Extra arguments passed to a `command` advisor.
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-attempt timeout.
    #[serde(default = "default_advisor_timeout_sec")]
    pub timeout_sec: u64,

    /// Overall budget for the enrichment step, retries included.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: AdvisorKind::default(),
            binary: default_advisor_binary(),
            model: default_advisor_model(),
            args: Vec::new(),
            timeout_sec: default_advisor_timeout_sec(),
            deadline_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorKind {
    #[default]
    ClaudeCli,
    Command,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}
