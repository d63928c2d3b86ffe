use super::Preference;
use crate::catalog::Plan;
use crate::config::RankingPolicy;
use tracing::debug;

/// Exact and near matches for a preference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Cheapest first, capped at `max_exact_matches`.
    pub exact_matches: Vec<Plan>,
    /// Closest validity first, capped at `max_similar_plans`.
    pub similar_plans: Vec<Plan>,
}

/// A plan paired with its ranking score. Lives only for one sort.
struct Scored<'a> {
    plan: &'a Plan,
    score: u32,
}

/// Same daily data and same validity, compared exactly.
pub fn is_exact_match(plan: &Plan, preference: &Preference) -> bool {
    plan.daily_data_gb == preference.daily_data_gb()
        && plan.validity_days == preference.validity_days()
}

/// Every exact match, cheapest first. Equal prices keep input order.
fn exact_matches<'a>(preference: &Preference, plans: &'a [Plan]) -> Vec<&'a Plan> {
    let mut exact: Vec<&Plan> = plans
        .iter()
        .filter(|p| is_exact_match(p, preference))
        .collect();
    exact.sort_by_key(|p| p.price);
    exact
}

/// The comparison anchor for value analysis: the cheapest exact match.
pub fn select_baseline<'a>(preference: &Preference, plans: &'a [Plan]) -> Option<&'a Plan> {
    exact_matches(preference, plans).into_iter().next()
}

pub fn classify(
    preference: &Preference,
    plans: &[Plan],
    policy: &RankingPolicy,
) -> Classification {
    let exact: Vec<Plan> = exact_matches(preference, plans)
        .into_iter()
        .take(policy.max_exact_matches)
        .cloned()
        .collect();

    let mut similar: Vec<Scored> = plans
        .iter()
        .filter(|p| {
            p.daily_data_gb == preference.daily_data_gb()
                && p.validity_days != preference.validity_days()
        })
        .map(|plan| Scored {
            plan,
            score: plan.validity_days.abs_diff(preference.validity_days()),
        })
        .collect();
    similar.sort_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.plan.price.cmp(&b.plan.price))
    });

    let similar: Vec<Plan> = similar
        .into_iter()
        .take(policy.max_similar_plans)
        .map(|s| s.plan.clone())
        .collect();

    debug!(
        "Classified {} plans: {} exact, {} similar",
        plans.len(),
        exact.len(),
        similar.len()
    );

    Classification {
        exact_matches: exact,
        similar_plans: similar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::plan;

    fn pref(daily: f64, validity: i64) -> Preference {
        Preference::new(daily, validity, "Airtel", None).unwrap()
    }

    fn names(plans: &[Plan]) -> Vec<&str> {
        plans.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_exact_sorted_by_price_and_capped() {
        let plans = vec![
            plan("Airtel", "C", 399, 28, 1.5),
            plan("Airtel", "A", 299, 28, 1.5),
            plan("Airtel", "B", 349, 28, 1.5),
        ];
        let result = classify(&pref(1.5, 28), &plans, &RankingPolicy::default());
        assert_eq!(names(&result.exact_matches), vec!["A", "B"]);

        let policy = RankingPolicy {
            max_exact_matches: 3,
            ..RankingPolicy::default()
        };
        let result = classify(&pref(1.5, 28), &plans, &policy);
        assert_eq!(names(&result.exact_matches), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_exact_price_ties_keep_input_order() {
        let plans = vec![
            plan("Airtel", "Second", 299, 28, 1.5),
            plan("Airtel", "First", 299, 28, 1.5),
        ];
        let result = classify(&pref(1.5, 28), &plans, &RankingPolicy::default());
        assert_eq!(names(&result.exact_matches), vec!["Second", "First"]);
    }

    #[test]
    fn test_exact_has_no_tolerance() {
        let plans = vec![
            plan("Airtel", "Near", 299, 28, 1.49),
            plan("Airtel", "Exact", 349, 28, 1.5),
        ];
        let result = classify(&pref(1.5, 28), &plans, &RankingPolicy::default());
        assert_eq!(names(&result.exact_matches), vec!["Exact"]);
    }

    #[test]
    fn test_similar_excludes_requested_validity() {
        let plans = vec![
            plan("Airtel", "Exact", 349, 28, 1.5),
            plan("Airtel", "Long", 859, 84, 1.5),
            plan("Airtel", "OtherData", 449, 30, 2.0),
        ];
        let result = classify(&pref(1.5, 28), &plans, &RankingPolicy::default());
        assert_eq!(names(&result.similar_plans), vec!["Long"]);
        assert!(result
            .similar_plans
            .iter()
            .all(|p| p.validity_days != 28));
    }

    #[test]
    fn test_similar_sorted_by_distance_then_price() {
        let plans = vec![
            plan("Airtel", "90D", 929, 90, 1.5),
            plan("Airtel", "24D", 249, 24, 1.5),
            plan("Airtel", "32D", 319, 32, 1.5),
            plan("Airtel", "56D", 579, 56, 1.5),
            plan("Airtel", "32D cheap", 299, 32, 1.5),
        ];
        let result = classify(&pref(1.5, 28), &plans, &RankingPolicy::default());
        assert_eq!(
            names(&result.similar_plans),
            vec!["24D", "32D cheap", "32D", "56D", "90D"]
        );
    }

    #[test]
    fn test_similar_capped() {
        let plans: Vec<Plan> = (1..=8)
            .map(|i| plan("Airtel", &format!("P{}", i), 100 * i, 28 + i as u32, 1.0))
            .collect();
        let result = classify(&pref(1.0, 28), &plans, &RankingPolicy::default());
        assert_eq!(result.similar_plans.len(), 5);
        assert_eq!(result.similar_plans[0].name, "P1");
    }

    #[test]
    fn test_empty_catalog() {
        let result = classify(&pref(1.0, 28), &[], &RankingPolicy::default());
        assert_eq!(result, Classification::default());
        assert!(select_baseline(&pref(1.0, 28), &[]).is_none());
    }

    #[test]
    fn test_baseline_is_cheapest_exact() {
        let plans = vec![
            plan("Airtel", "Pricey", 399, 28, 1.5),
            plan("Airtel", "Cheap", 299, 28, 1.5),
            plan("Airtel", "Cheaper but short", 199, 24, 1.5),
        ];
        let baseline = select_baseline(&pref(1.5, 28), &plans).unwrap();
        assert_eq!(baseline.name, "Cheap");
    }
}
