//! Pure matching and value analysis over catalog plans.

mod classifier;
mod preference;
mod value;

pub use classifier::{classify, is_exact_match, select_baseline};
pub use preference::{Preference, PreferenceRequest};
pub use value::{analyze_value, ReasoningSource, ValuePlan};
