use super::prompt::build_prompt;
use super::response::{classify_failure, parse_enrichment};
use super::{Advisor, Enrichment};
use crate::catalog::Plan;
use crate::engine::{Preference, ValuePlan};
use crate::error::AdvisorError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Runs the Claude CLI in print mode with JSON output.
pub struct ClaudeAdvisor {
    pub binary: PathBuf,
    pub model: String,
    pub timeout: Duration,
}

#[async_trait]
impl Advisor for ClaudeAdvisor {
    fn name(&self) -> &'static str {
        "claude_cli"
    }

    async fn enrich(
        &self,
        preference: &Preference,
        baseline: &Plan,
        candidates: &[ValuePlan],
    ) -> Result<Enrichment, AdvisorError> {
        let prompt = build_prompt(preference, baseline, candidates);

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-p")
            .arg(&prompt)
            .arg("--model")
            .arg(&self.model)
            .arg("--output-format")
            .arg("json");
        cmd.kill_on_drop(true);

        let start = std::time::Instant::now();

        let output = tokio_timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout))?
            .map_err(AdvisorError::Io)?;

        debug!("claude_cli answered in {:?}", start.elapsed());

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(output.status.code().unwrap_or(-1), &stderr));
        }

        parse_enrichment(&String::from_utf8_lossy(&output.stdout))
    }
}
