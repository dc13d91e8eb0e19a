use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

/// Whole-token pattern matcher.
///
/// Patterns are expected to carry their own `^...$` anchors; the matcher is
/// built with multi-line mode off so the anchors bind to the token edges.
pub struct PatternMatcher {
    matcher: RegexMatcher,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(false)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex(e.to_string()))?;

        Ok(Self { matcher })
    }

    #[inline]
    pub fn is_match(&self, token: &str) -> bool {
        self.matcher.is_match(token.as_bytes()).unwrap_or(false)
    }
}
