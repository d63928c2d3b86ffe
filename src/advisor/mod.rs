//! Optional advisory collaborators that rewrite reasoning text.
//!
//! An advisor only ever sees plans the engine already selected, and its
//! answer is only used to replace the reasoning string of those plans.

mod claude;
mod command;
mod prompt;
mod response;

pub use claude::ClaudeAdvisor;
pub use command::CommandAdvisor;

use crate::catalog::Plan;
use crate::config::{AdvisorConfig, AdvisorKind};
use crate::engine::{Preference, ValuePlan};
use crate::error::AdvisorError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Advisor answer: one note per plan it has something to say about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    pub value_for_money_plans: Vec<AdvisoryNote>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdvisoryNote {
    #[serde(rename = "planName")]
    pub plan_name: String,
    pub reasoning: String,
}

#[async_trait]
pub trait Advisor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return [`AdvisorError::Unavailable`] for conditions worth retrying.
    async fn enrich(
        &self,
        preference: &Preference,
        baseline: &Plan,
        candidates: &[ValuePlan],
    ) -> Result<Enrichment, AdvisorError>;
}

/// Build the configured advisor, or `None` when advisory enrichment is off
pub fn create_advisor(config: &AdvisorConfig) -> Option<Arc<dyn Advisor>> {
    if !config.enabled {
        return None;
    }

    let timeout = Duration::from_secs(config.timeout_sec);
    let advisor: Arc<dyn Advisor> = match config.kind {
        AdvisorKind::ClaudeCli => Arc::new(ClaudeAdvisor {
            binary: config.binary.clone(),
            model: config.model.clone(),
            timeout,
        }),
        AdvisorKind::Command => Arc::new(CommandAdvisor {
            binary: config.binary.clone(),
            args: config.args.clone(),
            timeout,
        }),
    };
    Some(advisor)
}
