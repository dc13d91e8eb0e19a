use crate::parser::traits::{FieldCategory, FieldMatcher};

/// Integer or decimal seconds, no unit suffix.
pub struct DurationMatcher;

impl DurationMatcher {
    /// Parse a duration token. Only finite, non-negative values are accepted.
    pub fn parse(token: &str) -> Option<f64> {
        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
    }
}

impl FieldMatcher for DurationMatcher {
    fn matches(&self, token: &str) -> bool {
        Self::parse(token).is_some()
    }

    fn category(&self) -> FieldCategory {
        FieldCategory::Duration
    }
}
