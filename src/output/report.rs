use crate::catalog::Plan;
use crate::engine::{Preference, ReasoningSource};
use crate::error::OutputError;
use crate::recommend::Recommendation;
use std::fs;
use std::path::Path;

/// JSON rendering of a recommendation
pub fn render_json(recommendation: &Recommendation) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(recommendation)?)
}

/// Markdown table of plans
pub fn render_plan_table(plans: &[Plan]) -> String {
    let mut content = String::new();
    content.push_str("| Plan | Provider | Price | Validity | Data/day | Total data | Benefits |\n");
    content.push_str("|------|----------|-------|----------|----------|------------|----------|\n");
    for plan in plans {
        let name = match &plan.link {
            Some(link) => format!("[{}]({})", plan.name, link),
            None => plan.name.clone(),
        };
        content.push_str(&format!(
            "| {} | {} | {} | {} days | {} GB | {} GB | {} |\n",
            name,
            plan.provider,
            plan.price,
            plan.validity_days,
            plan.daily_data_gb,
            plan.total_data_gb,
            plan.benefits.as_deref().unwrap_or("-")
        ));
    }
    content
}

/// Markdown report of a recommendation
pub fn render_markdown(preference: &Preference, recommendation: &Recommendation) -> String {
    let mut content = String::new();

    // Header
    content.push_str(&format!(
        "# Recharge plans for {}\n\n",
        preference.provider()
    ));

    content.push_str("| Request | Value |\n");
    content.push_str("|---------|-------|\n");
    content.push_str(&format!(
        "| Data per day | {} GB |\n",
        preference.daily_data_gb()
    ));
    content.push_str(&format!(
        "| Validity | {} days |\n",
        preference.validity_days()
    ));
    if let Some(location) = preference.location() {
        content.push_str(&format!("| Location | {} |\n", location));
    }
    content.push_str("\n---\n\n");

    content.push_str("## Exact matches\n\n");
    if recommendation.exact_matches.is_empty() {
        content.push_str("*No plan matches this data and validity exactly*\n\n");
    } else {
        content.push_str(&render_plan_table(&recommendation.exact_matches));
        content.push('\n');
    }

    content.push_str("## Value for money\n\n");
    if recommendation.value_for_money_plans.is_empty() {
        content.push_str("*No longer plan beats recharging the best match repeatedly*\n\n");
    } else {
        for value_plan in &recommendation.value_for_money_plans {
            let plan = &value_plan.plan;
            content.push_str(&format!(
                "### {} ({} for {} days)\n\n",
                plan.name, plan.price, plan.validity_days
            ));
            content.push_str(&format!("- **Saves:** {}\n", value_plan.savings.amount));
            content.push_str(&format!(
                "- **Instead of:** {} recharges costing {}\n",
                value_plan.savings.repeats, value_plan.savings.equivalent_baseline_cost
            ));
            content.push_str(&format!("- **Data per day:** {} GB\n", plan.daily_data_gb));
            if let Some(benefits) = &plan.benefits {
                content.push_str(&format!("- **Benefits:** {}\n", benefits));
            }
            if let Some(link) = &plan.link {
                content.push_str(&format!("- **Recharge:** {}\n", link));
            }
            content.push('\n');
            content.push_str(&format!("{}\n", value_plan.reasoning));
            if value_plan.reasoning_source == ReasoningSource::Advisory {
                content.push_str("\n*Explanation written by the advisor; figures computed locally.*\n");
            }
            content.push('\n');
        }
    }

    content.push_str("## Similar plans\n\n");
    if recommendation.similar_plans.is_empty() {
        content.push_str("*No plans with the same daily data and a different validity*\n");
    } else {
        content.push_str(&render_plan_table(&recommendation.similar_plans));
    }

    content
}

/// Write rendered output to `path`, or stdout when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), OutputError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(OutputError::CreateDir)?;
            }
            fs::write(path, content).map_err(OutputError::WriteReport)
        }
        None => {
            println!("{}", content.trim_end());
            Ok(())
        }
    }
}
