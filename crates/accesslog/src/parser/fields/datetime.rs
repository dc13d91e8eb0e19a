use crate::filter::{FilterError, PatternMatcher};
use crate::parser::datetime;
use crate::parser::traits::{FieldCategory, FieldMatcher};

/// Years 2000-2017; unpadded one or two digit month, day, hour, minute and second.
pub const DATETIME_PATTERN: &str = concat!(
    r"^(200[0-9]|201[0-7])",
    r"-(0?[1-9]|1[012])-(0?[1-9]|[12][0-9]|3[01])",
    r"T([01]?[0-9]|2[0-3]):([0-5]?[0-9]):([0-5]?[0-9])$",
);

pub struct DateTimeMatcher {
    pattern: PatternMatcher,
}

impl DateTimeMatcher {
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self {
            pattern: PatternMatcher::new(DATETIME_PATTERN)?,
        })
    }
}

impl FieldMatcher for DateTimeMatcher {
    // acceptance must never run ahead of what the parser can construct
    fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token) && datetime::parse(token).is_ok()
    }

    fn category(&self) -> FieldCategory {
        FieldCategory::DateTime
    }
}
