use serde::{Deserialize, Serialize};

/// A provider's recharge offer. Identity is `(provider, name)`, with the
/// provider compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub provider: String,

    #[serde(rename = "planName")]
    pub name: String,

    /// Price in the catalog's currency unit, never converted.
    pub price: u64,

    #[serde(rename = "validity")]
    pub validity_days: u32,

    #[serde(rename = "dailyData")]
    pub daily_data_gb: f64,

    /// Informational only; not checked against `daily_data_gb * validity_days`.
    #[serde(rename = "totalData", default)]
    pub total_data_gb: f64,

    #[serde(
        rename = "otherBenefits",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub benefits: Option<String>,

    #[serde(
        rename = "rechargeLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
}

/// Case-folded provider name used for indexing, lookup and identity.
pub fn provider_key(provider: &str) -> String {
    provider.to_lowercase()
}

impl Plan {
    pub fn same_identity(&self, other: &Plan) -> bool {
        self.name == other.name
            && provider_key(&self.provider) == provider_key(&other.provider)
    }

    /// Load-time checks for a single record.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.provider.trim().is_empty() {
            return Err("provider is empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("plan name is empty".to_string());
        }
        if self.validity_days == 0 {
            return Err("validity must be greater than zero".to_string());
        }
        if !self.daily_data_gb.is_finite() || self.daily_data_gb < 0.0 {
            return Err(format!(
                "daily data must be a non-negative number, got {}",
                self.daily_data_gb
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn plan(provider: &str, name: &str, price: u64, validity_days: u32, daily: f64) -> Plan {
    Plan {
        provider: provider.to_string(),
        name: name.to_string(),
        price,
        validity_days,
        daily_data_gb: daily,
        total_data_gb: daily * validity_days as f64,
        benefits: None,
        link: None,
    }
}
