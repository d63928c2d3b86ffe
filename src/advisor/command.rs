use super::prompt::build_prompt;
use super::response::{classify_failure, parse_enrichment};
use super::{Advisor, Enrichment};
use crate::catalog::Plan;
use crate::engine::{Preference, ValuePlan};
use crate::error::AdvisorError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Any executable that reads the prompt on stdin and prints its answer.
///
/// Exit status 75 or a stderr mentioning overload/unavailability is treated
/// as a transient failure.
pub struct CommandAdvisor {
    pub binary: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
}

#[async_trait]
impl Advisor for CommandAdvisor {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn enrich(
        &self,
        preference: &Preference,
        baseline: &Plan,
        candidates: &[ValuePlan],
    ) -> Result<Enrichment, AdvisorError> {
        let prompt = build_prompt(preference, baseline, candidates);

        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let start = std::time::Instant::now();

        let mut child = cmd.spawn()?;

        // Write prompt to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = tokio_timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout))??;

        debug!(
            "{} answered in {:?}",
            self.binary.display(),
            start.elapsed()
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(output.status.code().unwrap_or(-1), &stderr));
        }

        parse_enrichment(&String::from_utf8_lossy(&output.stdout))
    }
}
