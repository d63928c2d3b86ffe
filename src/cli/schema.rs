use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::engine::PreferenceRequest;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = if args.request {
        schema_for!(PreferenceRequest)
    } else {
        schema_for!(Config)
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
