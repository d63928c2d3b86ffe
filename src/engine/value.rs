use crate::catalog::Plan;
use crate::config::RankingPolicy;
use serde::Serialize;
use tracing::debug;

/// Auditable comparison of a candidate against repeatedly buying the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    /// Baseline purchases needed to cover the candidate's validity, rounded up.
    pub repeats: u32,
    pub equivalent_baseline_cost: u64,
    /// `equivalent_baseline_cost - candidate.price`, always positive.
    pub amount: u64,
    /// Cost-per-day difference scaled to the candidate's validity.
    /// Informational; never used for inclusion or ranking.
    pub per_day_estimate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningSource {
    #[default]
    Computed,
    Advisory,
}

/// A longer-validity plan that costs less than repurchasing the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePlan {
    #[serde(flatten)]
    pub plan: Plan,
    pub reasoning: String,
    pub savings: Savings,
    pub reasoning_source: ReasoningSource,
}

/// Savings of `candidate` over `baseline`, or `None` when the candidate is
/// not longer than the baseline or does not save anything.
pub fn compute_savings(baseline: &Plan, candidate: &Plan) -> Option<Savings> {
    if candidate.validity_days <= baseline.validity_days {
        return None;
    }

    let repeats = candidate.validity_days.div_ceil(baseline.validity_days);
    let equivalent_baseline_cost = baseline.price.saturating_mul(u64::from(repeats));
    if equivalent_baseline_cost <= candidate.price {
        return None;
    }

    let baseline_per_day = baseline.price as f64 / f64::from(baseline.validity_days);
    let candidate_per_day = candidate.price as f64 / f64::from(candidate.validity_days);

    Some(Savings {
        repeats,
        equivalent_baseline_cost,
        amount: equivalent_baseline_cost - candidate.price,
        per_day_estimate: (baseline_per_day - candidate_per_day)
            * f64::from(candidate.validity_days),
    })
}

pub fn computed_reasoning(baseline: &Plan, candidate: &Plan, savings: &Savings) -> String {
    format!(
        "Choosing this {}-day plan for {} is cheaper than buying the {}-day plan {} times \
         (which would cost {}). You save {}.",
        candidate.validity_days,
        candidate.price,
        baseline.validity_days,
        savings.repeats,
        savings.equivalent_baseline_cost,
        savings.amount
    )
}

fn within_validity_bound(baseline: &Plan, candidate: &Plan, policy: &RankingPolicy) -> bool {
    match policy.max_validity_multiple {
        Some(multiple) => {
            u64::from(candidate.validity_days)
                <= u64::from(baseline.validity_days) * u64::from(multiple)
        }
        None => true,
    }
}

/// Rank the candidates that beat repeatedly buying `baseline`.
///
/// A candidate qualifies when it offers at least `requested_daily_gb`, is
/// strictly longer than the baseline, stays within the policy's validity
/// bound, and saves a strictly positive amount. Results are ordered by
/// savings (largest first), then by price, and capped at
/// `max_value_plans`. The baseline itself never qualifies.
pub fn analyze_value<'a, I>(
    baseline: &Plan,
    candidate_pool: I,
    requested_daily_gb: f64,
    policy: &RankingPolicy,
) -> Vec<ValuePlan>
where
    I: IntoIterator<Item = &'a Plan>,
{
    let mut considered = 0usize;
    let mut qualified: Vec<(&Plan, Savings)> = candidate_pool
        .into_iter()
        .filter(|candidate| !candidate.same_identity(baseline))
        .filter(|candidate| {
            considered += 1;
            candidate.daily_data_gb >= requested_daily_gb
                && within_validity_bound(baseline, candidate, policy)
        })
        .filter_map(|candidate| compute_savings(baseline, candidate).map(|s| (candidate, s)))
        .collect();

    qualified.sort_by(|(a, sa), (b, sb)| {
        sb.amount
            .cmp(&sa.amount)
            .then_with(|| a.price.cmp(&b.price))
    });

    debug!(
        "Value analysis against {}: {} candidates considered, {} qualified",
        baseline.name,
        considered,
        qualified.len()
    );

    qualified
        .into_iter()
        .take(policy.max_value_plans)
        .map(|(candidate, savings)| ValuePlan {
            reasoning: computed_reasoning(baseline, candidate, &savings),
            plan: candidate.clone(),
            savings,
            reasoning_source: ReasoningSource::Computed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::plan;

    fn unbounded() -> RankingPolicy {
        RankingPolicy {
            max_value_plans: 10,
            max_validity_multiple: None,
            ..RankingPolicy::default()
        }
    }

    #[test]
    fn test_exact_multiple_of_baseline() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let candidate = plan("Airtel", "84D", 859, 84, 1.5);

        let savings = compute_savings(&baseline, &candidate).unwrap();
        assert_eq!(savings.repeats, 3);
        assert_eq!(savings.equivalent_baseline_cost, 897);
        assert_eq!(savings.amount, 38);

        let reasoning = computed_reasoning(&baseline, &candidate, &savings);
        assert_eq!(
            reasoning,
            "Choosing this 84-day plan for 859 is cheaper than buying the 28-day plan 3 times \
             (which would cost 897). You save 38."
        );
    }

    #[test]
    fn test_repeats_round_up() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let candidate = plan("Airtel", "90D", 929, 90, 1.5);

        let savings = compute_savings(&baseline, &candidate).unwrap();
        assert_eq!(savings.repeats, 4);
        assert_eq!(savings.equivalent_baseline_cost, 1196);
        assert_eq!(savings.amount, 267);
    }

    #[test]
    fn test_zero_savings_excluded() {
        let baseline = plan("Jio", "28D", 300, 28, 2.0);
        let even = plan("Jio", "56D", 600, 56, 2.0);
        let worse = plan("Jio", "56D plus", 650, 56, 2.0);
        assert!(compute_savings(&baseline, &even).is_none());
        assert!(compute_savings(&baseline, &worse).is_none());
    }

    #[test]
    fn test_same_or_shorter_validity_excluded() {
        let baseline = plan("Jio", "28D", 300, 28, 2.0);
        let same = plan("Jio", "28D cheap", 100, 28, 2.0);
        let shorter = plan("Jio", "14D", 50, 14, 2.0);
        assert!(compute_savings(&baseline, &same).is_none());
        assert!(compute_savings(&baseline, &shorter).is_none());
    }

    #[test]
    fn test_per_day_estimate() {
        let baseline = plan("Airtel", "28D", 280, 28, 1.5);
        let candidate = plan("Airtel", "56D", 420, 56, 1.5);
        let savings = compute_savings(&baseline, &candidate).unwrap();
        assert_eq!(savings.amount, 140);
        assert!((savings.per_day_estimate - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_requires_enough_daily_data() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let pool = vec![
            plan("Airtel", "Low data", 500, 84, 1.0),
            plan("Airtel", "More data", 859, 84, 2.0),
        ];
        let result = analyze_value(&baseline, &pool, 1.5, &unbounded());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].plan.name, "More data");
    }

    #[test]
    fn test_never_includes_baseline() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let pool = vec![baseline.clone(), plan("Airtel", "84D", 859, 84, 1.5)];
        let result = analyze_value(&baseline, &pool, 1.5, &unbounded());
        assert!(result.iter().all(|v| !v.plan.same_identity(&baseline)));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_ranked_by_savings_then_price() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let pool = vec![
            plan("Airtel", "84D", 859, 84, 1.5),   // saves 38
            plan("Airtel", "90D", 929, 90, 1.5),   // saves 267
            plan("Airtel", "56D a", 498, 56, 2.0), // saves 100
            plan("Airtel", "56D b", 498, 56, 1.5), // saves 100
            plan("Airtel", "60D", 797, 60, 1.5),   // saves 100, pricier
        ];
        let result = analyze_value(&baseline, &pool, 1.5, &unbounded());
        let ranked: Vec<(&str, u64)> = result
            .iter()
            .map(|v| (v.plan.name.as_str(), v.savings.amount))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("90D", 267),
                ("56D a", 100),
                ("56D b", 100),
                ("60D", 100),
                ("84D", 38)
            ]
        );
        assert!(result.iter().all(|v| v.savings.amount > 0));
    }

    #[test]
    fn test_capped_at_max_value_plans() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let pool = vec![
            plan("Airtel", "84D", 859, 84, 1.5),
            plan("Airtel", "90D", 929, 90, 1.5),
            plan("Airtel", "56D", 498, 56, 1.5),
        ];
        let result = analyze_value(&baseline, &pool, 1.5, &RankingPolicy::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].plan.name, "90D");
        assert_eq!(result[1].plan.name, "56D");
    }

    #[test]
    fn test_validity_multiple_bound() {
        let baseline = plan("Airtel", "28D", 349, 28, 1.5);
        let pool = vec![
            plan("Airtel", "Annual", 3599, 365, 2.0),
            plan("Airtel", "112D", 1000, 112, 1.5),
        ];
        let bounded = analyze_value(&baseline, &pool, 1.5, &RankingPolicy::default());
        let names: Vec<_> = bounded.iter().map(|v| v.plan.name.as_str()).collect();
        assert_eq!(names, vec!["112D"]);

        let result = analyze_value(&baseline, &pool, 1.5, &unbounded());
        assert_eq!(result[0].plan.name, "Annual");
        assert_eq!(result[0].savings.repeats, 14);
    }

    #[test]
    fn test_empty_pool() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        assert!(analyze_value(&baseline, std::iter::empty(), 1.5, &RankingPolicy::default()).is_empty());
    }

    #[test]
    fn test_serializes_flat_plan_with_reasoning() {
        let baseline = plan("Airtel", "28D", 299, 28, 1.5);
        let candidate = plan("Airtel", "84D", 859, 84, 1.5);
        let result = analyze_value(&baseline, [&candidate], 1.5, &RankingPolicy::default());
        let value = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(value["planName"], "84D");
        assert_eq!(value["savings"]["amount"], 38);
        assert_eq!(value["savings"]["equivalentBaselineCost"], 897);
        assert_eq!(value["reasoningSource"], "computed");
        assert!(value["reasoning"].as_str().unwrap().contains("897"));
    }
}
