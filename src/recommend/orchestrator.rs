use super::clock::{Clock, TokioClock};
use super::retry::retry_transient;
use crate::advisor::{Advisor, Enrichment};
use crate::catalog::{Plan, PlanSource};
use crate::config::{RankingPolicy, RetryConfig};
use crate::engine::{
    analyze_value, classify, is_exact_match, select_baseline, Preference, ReasoningSource,
    ValuePlan,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "exactMatchPlans")]
    pub exact_matches: Vec<Plan>,
    pub similar_plans: Vec<Plan>,
    pub value_for_money_plans: Vec<ValuePlan>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty()
            && self.similar_plans.is_empty()
            && self.value_for_money_plans.is_empty()
    }
}

pub struct Recommender {
    source: Arc<dyn PlanSource>,
    policy: RankingPolicy,
    advisor: Option<Arc<dyn Advisor>>,
    retry: RetryConfig,
    clock: Arc<dyn Clock>,
    deadline: Option<Duration>,
}

impl Recommender {
    pub fn new(source: Arc<dyn PlanSource>, policy: RankingPolicy) -> Self {
        Self {
            source,
            policy,
            advisor: None,
            retry: RetryConfig::default(),
            clock: Arc::new(TokioClock),
            deadline: None,
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn Advisor>, retry: RetryConfig) -> Self {
        self.advisor = Some(advisor);
        self.retry = retry;
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Upper bound on the whole enrichment step, retries and delays included.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// The deterministic recommendation plus the baseline it was built on.
    pub fn recommend_local(&self, preference: &Preference) -> (Recommendation, Option<Plan>) {
        let plans = self.source.plans_for_provider(preference.provider());
        if plans.is_empty() {
            info!("No plans found for provider '{}'", preference.provider());
        }

        let classification = classify(preference, plans, &self.policy);

        let baseline = select_baseline(preference, plans).cloned();
        let value_for_money_plans = match &baseline {
            Some(baseline) => {
                debug!(
                    "Baseline: {} ({} for {} days)",
                    baseline.name, baseline.price, baseline.validity_days
                );
                let pool = plans.iter().filter(|p| !is_exact_match(p, preference));
                analyze_value(baseline, pool, preference.daily_data_gb(), &self.policy)
            }
            None => {
                debug!("No exact match; skipping value analysis");
                Vec::new()
            }
        };

        let recommendation = Recommendation {
            exact_matches: classification.exact_matches,
            similar_plans: classification.similar_plans,
            value_for_money_plans,
        };
        (recommendation, baseline)
    }

    /// Recommend plans for `preference`, letting the advisor reword the
    /// value-for-money reasoning when one is configured. Advisory failures
    /// and deadline expiry leave the deterministic result untouched.
    pub async fn recommend(&self, preference: &Preference) -> Recommendation {
        let (mut recommendation, baseline) = self.recommend_local(preference);

        let (Some(advisor), Some(baseline)) = (&self.advisor, baseline) else {
            return recommendation;
        };
        if recommendation.value_for_money_plans.is_empty() {
            return recommendation;
        }

        let outcome = {
            let baseline = &baseline;
            let candidates = recommendation.value_for_money_plans.as_slice();
            let attempt = retry_transient(&self.retry, self.clock.as_ref(), move || {
                debug!("Consulting advisor {}", advisor.name());
                advisor.enrich(preference, baseline, candidates)
            });

            match self.deadline {
                Some(deadline) => tokio_timeout(deadline, attempt).await.ok(),
                None => Some(attempt.await),
            }
        };

        let Some(outcome) = outcome else {
            warn!(
                "Advisor deadline of {:?} elapsed; using computed reasoning",
                self.deadline.unwrap_or_default()
            );
            return recommendation;
        };

        match outcome {
            Ok(enrichment) => apply_enrichment(&mut recommendation, enrichment),
            Err(e) => warn!("Advisor unavailable ({}); using computed reasoning", e),
        }

        recommendation
    }
}

/// Replace reasoning text of already-selected plans. Selection, order and
/// savings are left as computed.
fn apply_enrichment(recommendation: &mut Recommendation, enrichment: Enrichment) {
    for note in enrichment.value_for_money_plans {
        let reasoning = note.reasoning.trim();
        if reasoning.is_empty() {
            continue;
        }
        match recommendation
            .value_for_money_plans
            .iter_mut()
            .find(|v| v.plan.name == note.plan_name)
        {
            Some(value_plan) => {
                value_plan.reasoning = reasoning.to_string();
                value_plan.reasoning_source = ReasoningSource::Advisory;
            }
            None => warn!("Ignoring advisor note for unselected plan '{}'", note.plan_name),
        }
    }
}
