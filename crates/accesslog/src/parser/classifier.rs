use super::fields::*;
use super::traits::*;
use crate::filter::FilterError;

/// Field classifier with ordered matchers.
///
/// Matchers are held in assignment priority order (IP, duration, datetime,
/// URL). The classifier itself never resolves overlaps; it reports every
/// category a token fits and the normalizer picks.
pub struct FieldClassifier {
    matchers: Vec<Box<dyn FieldMatcher>>,
}

impl FieldClassifier {
    pub fn new() -> Result<Self, FilterError> {
        let matchers: Vec<Box<dyn FieldMatcher>> = vec![
            // Order matters! Assignment priority
            Box::new(IpMatcher::new()?),
            Box::new(DurationMatcher),
            Box::new(DateTimeMatcher::new()?),
            Box::new(UrlMatcher::new()?), // Loosest shape last
        ];

        Ok(Self { matchers })
    }

    /// Every category whose shape the token fits, in priority order.
    pub fn classify(&self, token: &str) -> Vec<FieldCategory> {
        let token = token.trim();
        self.matchers
            .iter()
            .filter(|m| m.matches(token))
            .map(|m| m.category())
            .collect()
    }

    /// First category in priority order that is still open and fits the token.
    pub fn first_open(&self, token: &str, is_open: impl Fn(FieldCategory) -> bool) -> Option<FieldCategory> {
        self.matchers
            .iter()
            .filter(|m| is_open(m.category()))
            .find(|m| m.matches(token))
            .map(|m| m.category())
    }
}
