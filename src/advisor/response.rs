use super::Enrichment;
use crate::error::AdvisorError;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Conventional "temporary failure, try again" exit status.
const EX_TEMPFAIL: i32 = 75;

fn transient_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)\b(503|529|overloaded|service unavailable|temporarily unavailable|rate limit(ed)?|too many requests)\b",
            )
            .ok()
        })
        .as_ref()
}

fn looks_transient(text: &str) -> bool {
    transient_pattern()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Map a failed advisor process to an error, flagging retryable conditions
pub fn classify_failure(code: i32, stderr: &str) -> AdvisorError {
    if code == EX_TEMPFAIL || looks_transient(stderr) {
        let reason = stderr.lines().next().unwrap_or("temporary failure").trim();
        return AdvisorError::Unavailable(format!("exit code {}: {}", code, reason));
    }
    AdvisorError::NonZeroExit {
        code,
        stderr: stderr.to_string(),
    }
}

/// Parse an advisor answer, unwrapping the Claude CLI envelope if present
pub fn parse_enrichment(raw: &str) -> Result<Enrichment, AdvisorError> {
    #[derive(Deserialize)]
    struct Envelope {
        result: String,
        #[serde(default)]
        is_error: bool,
    }

    let body = match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) if envelope.is_error => {
            return Err(if looks_transient(&envelope.result) {
                AdvisorError::Unavailable(envelope.result)
            } else {
                AdvisorError::InvalidResponse(envelope.result)
            });
        }
        Ok(envelope) => envelope.result,
        Err(_) => raw.to_string(),
    };

    json_candidates(&body)
        .into_iter()
        .find_map(|candidate| match serde_json::from_str::<Enrichment>(candidate) {
            Ok(enrichment) => Some(enrichment),
            Err(e) => {
                tracing::debug!("Skipping advisor JSON candidate: {}", e);
                None
            }
        })
        .ok_or_else(|| {
            AdvisorError::InvalidResponse(
                "no valueForMoneyPlans object in advisor output".to_string(),
            )
        })
}

fn fence_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").ok())
        .as_ref()
}

/// Slices of `text` that may hold the answer object, most likely first:
/// the whole text, fenced code blocks, then the outermost brace span.
fn json_candidates(text: &str) -> Vec<&str> {
    let mut candidates = vec![text.trim()];

    if let Some(re) = fence_pattern() {
        candidates.extend(
            re.captures_iter(text)
                .filter_map(|cap| cap.get(1))
                .map(|m| m.as_str().trim()),
        );
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            candidates.push(&text[start..=end]);
        }
    }

    candidates
}
