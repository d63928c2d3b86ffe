use crate::error::PreferenceError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recommendation request as it arrives from a caller.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRequest {
    #[serde(rename = "dailyDataUsageGB")]
    pub daily_data_usage_gb: f64,

    pub validity_days: i64,

    pub telecom_provider: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl PreferenceRequest {
    /// Read a JSON request document
    pub fn load(path: &Path) -> Result<Self, PreferenceError> {
        let unreadable = |reason: String| PreferenceError::Unreadable {
            path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))
    }

    pub fn validate(self) -> Result<Preference, PreferenceError> {
        Preference::new(
            self.daily_data_usage_gb,
            self.validity_days,
            &self.telecom_provider,
            self.location,
        )
    }
}

/// A validated request. Only constructible through [`Preference::new`], so
/// everything downstream can rely on positive data and validity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    daily_data_gb: f64,
    validity_days: u32,
    provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Preference {
    pub fn new(
        daily_data_gb: f64,
        validity_days: i64,
        provider: &str,
        location: Option<String>,
    ) -> Result<Self, PreferenceError> {
        if !daily_data_gb.is_finite() || daily_data_gb <= 0.0 {
            return Err(PreferenceError::NonPositiveData(daily_data_gb));
        }
        if validity_days <= 0 {
            return Err(PreferenceError::NonPositiveValidity(validity_days));
        }
        let validity = u32::try_from(validity_days)
            .map_err(|_| PreferenceError::ValidityOutOfRange(validity_days))?;

        let provider = provider.trim();
        if provider.is_empty() {
            return Err(PreferenceError::EmptyProvider);
        }

        Ok(Self {
            daily_data_gb,
            validity_days: validity,
            provider: provider.to_string(),
            location: location.filter(|l| !l.trim().is_empty()),
        })
    }

    pub fn daily_data_gb(&self) -> f64 {
        self.daily_data_gb
    }

    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Carried for display; never used for matching.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_preference() {
        let pref = Preference::new(1.5, 28, " Airtel ", Some("Pune".to_string())).unwrap();
        assert_eq!(pref.daily_data_gb(), 1.5);
        assert_eq!(pref.validity_days(), 28);
        assert_eq!(pref.provider(), "Airtel");
        assert_eq!(pref.location(), Some("Pune"));
    }

    #[test]
    fn test_rejects_non_positive_data() {
        assert_eq!(
            Preference::new(0.0, 28, "Jio", None),
            Err(PreferenceError::NonPositiveData(0.0))
        );
        assert!(Preference::new(-1.0, 28, "Jio", None).is_err());
        assert!(Preference::new(f64::INFINITY, 28, "Jio", None).is_err());
        assert!(Preference::new(f64::NAN, 28, "Jio", None).is_err());
    }

    #[test]
    fn test_rejects_non_positive_validity() {
        assert_eq!(
            Preference::new(1.0, 0, "Jio", None),
            Err(PreferenceError::NonPositiveValidity(0))
        );
        assert_eq!(
            Preference::new(1.0, -28, "Jio", None),
            Err(PreferenceError::NonPositiveValidity(-28))
        );
        assert_eq!(
            Preference::new(1.0, i64::MAX, "Jio", None),
            Err(PreferenceError::ValidityOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_rejects_blank_provider() {
        assert_eq!(
            Preference::new(1.0, 28, "   ", None),
            Err(PreferenceError::EmptyProvider)
        );
    }

    #[test]
    fn test_request_document() {
        let json = r#"{"dailyDataUsageGB": 2, "validityDays": 84, "telecomProvider": "jio"}"#;
        let request: PreferenceRequest = serde_json::from_str(json).unwrap();
        let pref = request.validate().unwrap();
        assert_eq!(pref.daily_data_gb(), 2.0);
        assert_eq!(pref.validity_days(), 84);
        assert_eq!(pref.location(), None);
    }

    #[test]
    fn test_blank_location_dropped() {
        let pref = Preference::new(1.0, 28, "Jio", Some(" ".to_string())).unwrap();
        assert_eq!(pref.location(), None);
    }
}
