//! Read-only plan catalog, indexed once by lower-cased provider name.

mod plan;

pub use plan::{provider_key, Plan};

#[cfg(test)]
pub(crate) use plan::plan;

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_CATALOG: &str = include_str!("bundled.yaml");

/// Where the recommender gets a provider's plans from.
pub trait PlanSource: Send + Sync {
    /// Plans of `provider` (case-insensitive), empty when unknown.
    fn plans_for_provider(&self, provider: &str) -> &[Plan];

    /// Provider names as first seen in the source.
    fn providers(&self) -> Vec<&str>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Plan>),
    Wrapped { plans: Vec<Plan> },
}

impl CatalogDocument {
    fn into_plans(self) -> Vec<Plan> {
        match self {
            CatalogDocument::List(plans) => plans,
            CatalogDocument::Wrapped { plans } => plans,
        }
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    by_provider: HashMap<String, Vec<Plan>>,
    provider_names: Vec<String>,
}

impl Catalog {
    /// Validate and index a list of plans. Order within a provider is kept.
    pub fn from_plans(plans: Vec<Plan>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for plan in plans {
            plan.check().map_err(|reason| CatalogError::InvalidPlan {
                provider: plan.provider.clone(),
                name: plan.name.clone(),
                reason,
            })?;

            let expected_total = plan.daily_data_gb * plan.validity_days as f64;
            if (plan.total_data_gb - expected_total).abs() > 1e-9 {
                debug!(
                    "Plan {} ({}) lists {} GB total, expected {}",
                    plan.name, plan.provider, plan.total_data_gb, expected_total
                );
            }

            let key = provider_key(&plan.provider);
            let entries = catalog.by_provider.entry(key).or_default();
            if entries.is_empty() {
                catalog.provider_names.push(plan.provider.clone());
            }
            if entries.iter().any(|p| p.name == plan.name) {
                return Err(CatalogError::DuplicatePlan {
                    provider: plan.provider,
                    name: plan.name,
                });
            }
            entries.push(plan);
        }

        info!(
            "Catalog loaded: {} plans across {} providers",
            catalog.len(),
            catalog.provider_names.len()
        );
        Ok(catalog)
    }

    /// Load from a JSON (`.json`) or YAML file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let document: CatalogDocument = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::from_plans(document.into_plans())
    }

    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(BUNDLED_CATALOG)?;
        Self::from_plans(document.into_plans())
    }

    pub fn len(&self) -> usize {
        self.by_provider.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_provider.is_empty()
    }
}

impl PlanSource for Catalog {
    fn plans_for_provider(&self, provider: &str) -> &[Plan] {
        self.by_provider
            .get(&provider_key(provider))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn providers(&self) -> Vec<&str> {
        self.provider_names.iter().map(String::as_str).collect()
    }
}
