use crate::filter::{FilterError, PatternMatcher};
use crate::parser::traits::{FieldCategory, FieldMatcher};

/// Optional `http://`, `https://` or `www.` prefix, then either a path with
/// at least one `/` or a bare token containing a `.`.
///
/// Deliberately loose: overlaps with other categories are settled by the
/// normalizer's priority order.
pub const URL_PATTERN: &str = r"^(http://|https://|www.)?((((\S+/)+\S)(\S*))|(\S*\.\S*))$";

pub struct UrlMatcher {
    pattern: PatternMatcher,
}

impl UrlMatcher {
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self {
            pattern: PatternMatcher::new(URL_PATTERN)?,
        })
    }
}

impl FieldMatcher for UrlMatcher {
    fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }

    fn category(&self) -> FieldCategory {
        FieldCategory::Url
    }
}
