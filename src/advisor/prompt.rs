use crate::catalog::Plan;
use crate::engine::{Preference, ValuePlan};

/// Prompt asking the advisor to explain plans that were already chosen.
pub fn build_prompt(preference: &Preference, baseline: &Plan, candidates: &[ValuePlan]) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You help mobile users understand why a longer recharge plan is better value.\n\n",
    );
    prompt.push_str("## Request\n\n");
    prompt.push_str(&format!(
        "- Provider: {}\n- Daily data: {} GB\n- Validity: {} days\n",
        preference.provider(),
        preference.daily_data_gb(),
        preference.validity_days()
    ));
    if let Some(location) = preference.location() {
        prompt.push_str(&format!("- Location: {}\n", location));
    }

    prompt.push_str("\n## Baseline plan\n\n");
    prompt.push_str(&format!(
        "{}: price {}, {} days, {} GB/day\n",
        baseline.name, baseline.price, baseline.validity_days, baseline.daily_data_gb
    ));

    prompt.push_str("\n## Selected plans\n\n");
    for candidate in candidates {
        prompt.push_str(&format!(
            "- {}: price {}, {} days, {} GB/day, benefits: {}. {}\n",
            candidate.plan.name,
            candidate.plan.price,
            candidate.plan.validity_days,
            candidate.plan.daily_data_gb,
            candidate.plan.benefits.as_deref().unwrap_or("none"),
            candidate.reasoning
        ));
    }

    prompt.push_str(
        "\n## Instructions\n\n\
         Write one or two sentences per selected plan explaining its value. \
         Use the exact figures above; do not recompute or change any price or saving, \
         and do not suggest other plans.\n\n\
         Respond with JSON only:\n\
         {\"valueForMoneyPlans\": [{\"planName\": \"...\", \"reasoning\": \"...\"}]}\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::plan;
    use crate::config::RankingPolicy;
    use crate::engine::analyze_value;

    #[test]
    fn test_prompt_carries_computed_figures() {
        let preference = Preference::new(1.5, 28, "Airtel", Some("Delhi".to_string())).unwrap();
        let baseline = plan("Airtel", "HelloTunes 28D", 299, 28, 1.5);
        let candidate = plan("Airtel", "RewardsMini 84D", 859, 84, 1.5);
        let selected = analyze_value(&baseline, [&candidate], 1.5, &RankingPolicy::default());

        let prompt = build_prompt(&preference, &baseline, &selected);
        assert!(prompt.contains("Location: Delhi"));
        assert!(prompt.contains("HelloTunes 28D: price 299"));
        assert!(prompt.contains("RewardsMini 84D: price 859"));
        assert!(prompt.contains("You save 38."));
        assert!(prompt.contains("valueForMoneyPlans"));
    }
}
