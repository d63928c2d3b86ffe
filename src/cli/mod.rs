pub mod plans;
pub mod recommend;
pub mod schema;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::RechargeError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = "rechargeace.yaml";

#[derive(Parser)]
#[command(name = "rechargeace")]
#[command(
    author,
    version,
    about = "Find the recharge plan that fits, and the longer one that saves money"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend plans for a data and validity preference
    Recommend(RecommendArgs),

    /// List catalog plans
    Plans(PlansArgs),

    /// Print JSON Schema for the config file (or the request document)
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct SourceArgs {
    /// Path to config file
    #[arg(short, long, env = "RECHARGEACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog file (JSON or YAML), overrides the config
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON request document ({"dailyDataUsageGB", "validityDays", "telecomProvider", "location"})
    #[arg(long, conflicts_with_all = ["data", "validity", "provider"])]
    pub request: Option<PathBuf>,

    /// Daily data needed, in GB
    #[arg(short, long, allow_negative_numbers = true, required_unless_present = "request")]
    pub data: Option<f64>,

    /// Validity needed, in days
    #[arg(long, allow_negative_numbers = true, required_unless_present = "request")]
    pub validity: Option<i64>,

    /// Telecom provider (case-insensitive)
    #[arg(short, long, required_unless_present = "request")]
    pub provider: Option<String>,

    /// Location, shown in the report only
    #[arg(long)]
    pub location: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Override the number of exact matches returned
    #[arg(long)]
    pub max_exact: Option<usize>,

    /// Skip advisory enrichment even if configured
    #[arg(long)]
    pub no_advisor: bool,

    /// Overall deadline for advisory enrichment, in milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

#[derive(Parser, Clone)]
pub struct PlansArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only list this provider's plans
    #[arg(short, long)]
    pub provider: Option<String>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the request document schema instead
    #[arg(long)]
    pub request: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

/// Load and validate config, then the catalog it points at
pub fn load_sources(source: &SourceArgs) -> Result<(Config, Catalog), RechargeError> {
    let (path, explicit) = match &source.config {
        Some(path) => (path.as_path(), true),
        None => (Path::new(DEFAULT_CONFIG), false),
    };

    let mut config = Config::load_or_default(path, explicit)?;
    if let Some(catalog) = &source.catalog {
        config.catalog = Some(catalog.clone());
    }
    config.validate()?;

    let catalog = match &config.catalog {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            Catalog::load(path)?
        }
        None => Catalog::bundled()?,
    };

    Ok((config, catalog))
}
