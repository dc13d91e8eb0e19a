use crate::filter::{FilterError, PatternMatcher};
use crate::parser::traits::{FieldCategory, FieldMatcher};

/// Four dotted decimal groups, each 0-255 (leading zeros allowed).
pub const IP_PATTERN: &str =
    r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

pub struct IpMatcher {
    pattern: PatternMatcher,
}

impl IpMatcher {
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self {
            pattern: PatternMatcher::new(IP_PATTERN)?,
        })
    }
}

impl FieldMatcher for IpMatcher {
    fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }

    fn category(&self) -> FieldCategory {
        FieldCategory::Ip
    }
}
