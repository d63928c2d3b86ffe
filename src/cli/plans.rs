use crate::catalog::PlanSource;
use crate::cli::{load_sources, PlansArgs};
use crate::output::{render_plan_table, write_output};
use tracing::warn;

pub fn execute(args: PlansArgs) -> anyhow::Result<()> {
    let (_, catalog) = load_sources(&args.source)?;

    if catalog.is_empty() {
        warn!("Catalog has no plans");
    }

    let providers: Vec<&str> = match &args.provider {
        Some(provider) => vec![provider.as_str()],
        None => catalog.providers(),
    };

    let mut content = String::new();
    for provider in providers {
        let plans = catalog.plans_for_provider(provider);
        content.push_str(&format!("## {} ({} plans)\n\n", provider, plans.len()));
        if plans.is_empty() {
            content.push_str("*No plans*\n\n");
        } else {
            content.push_str(&render_plan_table(plans));
            content.push('\n');
        }
    }

    write_output(None, &content)?;
    Ok(())
}
