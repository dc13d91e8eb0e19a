/// Per-category token matchers

pub mod ip;
pub mod duration;
pub mod datetime;
pub mod url;

pub use ip::IpMatcher;
pub use duration::DurationMatcher;
pub use datetime::DateTimeMatcher;
pub use url::UrlMatcher;
