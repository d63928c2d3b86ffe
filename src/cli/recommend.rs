use crate::advisor::create_advisor;
use crate::cli::{load_sources, OutputFormat, RecommendArgs};
use crate::engine::{Preference, PreferenceRequest};
use crate::error::PreferenceError;
use crate::output::{render_json, render_markdown, write_output};
use crate::recommend::Recommender;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub async fn execute(args: RecommendArgs) -> anyhow::Result<()> {
    // Reject malformed input before touching config or catalog
    let preference = parse_preference(&args)?;

    let (mut config, catalog) = load_sources(&args.source)?;

    // Apply CLI overrides
    if let Some(max_exact) = args.max_exact {
        config.ranking.max_exact_matches = max_exact;
    }
    if args.no_advisor {
        config.advisor.enabled = false;
    }
    if let Some(deadline_ms) = args.deadline_ms {
        config.advisor.deadline_ms = Some(deadline_ms);
    }

    let mut recommender = Recommender::new(Arc::new(catalog), config.ranking.clone())
        .with_deadline(config.advisor.deadline_ms.map(Duration::from_millis));
    if let Some(advisor) = create_advisor(&config.advisor) {
        info!("Advisory enrichment via {}", advisor.name());
        recommender = recommender.with_advisor(advisor, config.retry.clone());
    }

    let recommendation = recommender.recommend(&preference).await;
    if recommendation.is_empty() {
        warn!(
            "Nothing to recommend for {} at {} GB/day",
            preference.provider(),
            preference.daily_data_gb()
        );
    }
    info!(
        "{} exact, {} similar, {} value-for-money plans",
        recommendation.exact_matches.len(),
        recommendation.similar_plans.len(),
        recommendation.value_for_money_plans.len()
    );

    let content = match args.format {
        OutputFormat::Json => render_json(&recommendation)?,
        OutputFormat::Markdown => render_markdown(&preference, &recommendation),
    };
    write_output(args.out.as_deref(), &content)?;

    if let Some(out) = &args.out {
        info!("Wrote report to {:?}", out);
    }

    Ok(())
}

fn parse_preference(args: &RecommendArgs) -> Result<Preference, PreferenceError> {
    let request = match &args.request {
        Some(path) => {
            let mut request = PreferenceRequest::load(path)?;
            if args.location.is_some() {
                request.location = args.location.clone();
            }
            request
        }
        None => PreferenceRequest {
            daily_data_usage_gb: args.data.unwrap_or_default(),
            validity_days: args.validity.unwrap_or_default(),
            telecom_provider: args.provider.clone().unwrap_or_default(),
            location: args.location.clone(),
        },
    };
    request.validate()
}
