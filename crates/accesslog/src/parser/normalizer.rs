//! Normalizer: raw CSV access line to [`NormalizedRecord`].
//!
//! Tokens arrive in any order. Each token is offered to the categories in
//! priority order and claims the first open one it fits; a category, once
//! filled, is skipped for later tokens. Assignment state lives on the stack
//! of each call, so one normalizer can be shared across threads.

use super::classifier::FieldClassifier;
use super::datetime;
use super::fields::DurationMatcher;
use super::traits::*;
use super::{FIELD_COUNT, FIELD_SEPARATOR};
use crate::filter::FilterError;

pub struct RecordNormalizer {
    classifier: FieldClassifier,
}

impl RecordNormalizer {
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self::with_classifier(FieldClassifier::new()?))
    }

    pub fn with_classifier(classifier: FieldClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &FieldClassifier {
        &self.classifier
    }

    /// Normalize one raw line. All-or-nothing: no partial record is ever built.
    pub fn normalize(&self, raw: &str) -> Result<NormalizedRecord, ValidationError> {
        let tokens: Vec<&str> = raw.split(FIELD_SEPARATOR).map(str::trim).collect();
        if tokens.len() != FIELD_COUNT {
            return Err(ValidationError::WrongArity { found: tokens.len() });
        }

        let mut slots: [Option<&str>; FIELD_COUNT] = [None; FIELD_COUNT];
        for token in tokens {
            let category = self
                .classifier
                .first_open(token, |c| slots[c.slot()].is_none())
                .ok_or_else(|| ValidationError::UnclassifiableToken(token.to_string()))?;
            slots[category.slot()] = Some(token);
        }

        let [Some(ip), Some(duration_token), Some(datetime_token), Some(url)] = slots else {
            let found = slots.iter().flatten().count();
            return Err(ValidationError::WrongArity { found });
        };

        let duration = DurationMatcher::parse(duration_token)
            .ok_or_else(|| ValidationError::UnclassifiableToken(duration_token.to_string()))?;
        let datetime = datetime::parse(datetime_token)?;

        Ok(NormalizedRecord::new(ip, url, duration, datetime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new().unwrap()
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_normalize_padded_line() {
        let record = normalizer()
            .normalize("      111.35.120.105, https://regex101.com, 50.9  , 2017-3-2T21:22:7")
            .unwrap();
        assert_eq!(record.ip(), "111.35.120.105");
        assert_eq!(record.url(), "https://regex101.com");
        assert_eq!(record.duration(), 50.9);
        assert_eq!(record.datetime(), ts(2017, 3, 2, 21, 22, 7));
    }

    #[test]
    fn test_normalize_url_first_with_leading_zero_ip() {
        let record = normalizer()
            .normalize("https://drive.google.com/drive/folders/0B4FNpNP6fq8LaE9iODAyY3pHZGM, 12, 2017-09-04T5:10:04, 02.66.01.00")
            .unwrap();
        assert_eq!(record.url(), "https://drive.google.com/drive/folders/0B4FNpNP6fq8LaE9iODAyY3pHZGM");
        assert_eq!(record.ip(), "02.66.01.00");
        assert_eq!(record.duration(), 12.0);
        assert_eq!(record.datetime(), ts(2017, 9, 4, 5, 10, 4));
    }

    #[test]
    fn test_normalize_every_permutation() {
        let fields = ["10.0.0.1", "example.com/index.html", "3.25", "2016-12-31T23:59:59"];
        let normalizer = normalizer();

        let mut count = 0;
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let mut seen = [a, b, c, d];
                        seen.sort_unstable();
                        if seen != [0, 1, 2, 3] {
                            continue;
                        }
                        let line = format!("{}, {}, {}, {}", fields[a], fields[b], fields[c], fields[d]);
                        let record = normalizer.normalize(&line).unwrap();
                        assert_eq!(record.ip(), "10.0.0.1", "line: {}", line);
                        assert_eq!(record.url(), "example.com/index.html", "line: {}", line);
                        assert_eq!(record.duration(), 3.25, "line: {}", line);
                        assert_eq!(record.datetime(), ts(2016, 12, 31, 23, 59, 59), "line: {}", line);
                        count += 1;
                    }
                }
            }
        }
        assert_eq!(count, 24);
    }

    #[test]
    fn test_wrong_arity() {
        let normalizer = normalizer();
        assert_eq!(
            normalizer.normalize("").unwrap_err(),
            ValidationError::WrongArity { found: 1 }
        );
        assert_eq!(
            normalizer.normalize("111.35.120.105, https://regex101.com, 50.9").unwrap_err(),
            ValidationError::WrongArity { found: 3 }
        );
        assert_eq!(
            normalizer
                .normalize("1.1.1.1, a.com, 1, 2017-1-1T0:0:0, extra")
                .unwrap_err(),
            ValidationError::WrongArity { found: 5 }
        );
    }

    #[test]
    fn test_unclassifiable_token() {
        let err = normalizer()
            .normalize("111.35.120.105, dfhhjhg, 50.9, 111.35.120.105")
            .unwrap_err();
        assert_eq!(err, ValidationError::UnclassifiableToken("dfhhjhg".into()));
    }

    #[test]
    fn test_out_of_range_octet_rejected() {
        // the bad IP is claimed as a URL, so the real URL has nowhere to go
        let err = normalizer()
            .normalize("111.35.300.105, https://regex101.com, 50.9, 111.35.120.105")
            .unwrap_err();
        assert_eq!(err, ValidationError::UnclassifiableToken("https://regex101.com".into()));
    }

    #[test]
    fn test_empty_token_unclassifiable() {
        let err = normalizer().normalize("1.1.1.1, a.com, 1,").unwrap_err();
        assert_eq!(err, ValidationError::UnclassifiableToken(String::new()));
    }

    #[test]
    fn test_number_claimed_by_duration_before_url() {
        let record = normalizer()
            .normalize("2017-1-1T0:0:0, 7.5, 1.1.1.1, host.example")
            .unwrap();
        assert_eq!(record.duration(), 7.5);
        assert_eq!(record.url(), "host.example");
    }

    #[test]
    fn test_second_number_falls_through_to_url() {
        let record = normalizer()
            .normalize("7.5, 8.25, 1.1.1.1, 2017-1-1T0:0:0")
            .unwrap();
        assert_eq!(record.duration(), 7.5);
        assert_eq!(record.url(), "8.25");
    }

    #[test]
    fn test_fields_reclassify_to_assigned_category() {
        let normalizer = normalizer();
        let record = normalizer
            .normalize("www.tutorialspoint.com/mongodb/mongodb_java.htm, 2017-10-1T1:2:3, 123.23.13.2, 4")
            .unwrap();
        let classifier = normalizer.classifier();

        assert_eq!(classifier.classify(record.ip()).first(), Some(&FieldCategory::Ip));
        assert_eq!(
            classifier.classify(&record.duration().to_string()).first(),
            Some(&FieldCategory::Duration)
        );
        let datetime_text = record.datetime().format("%Y-%m-%dT%H:%M:%S").to_string();
        assert_eq!(datetime_text, "2017-10-01T01:02:03");
        assert_eq!(
            classifier.classify(&datetime_text).first(),
            Some(&FieldCategory::DateTime)
        );
        assert!(classifier.classify(record.url()).contains(&FieldCategory::Url));
        assert!(!classifier.classify(record.url()).contains(&FieldCategory::Ip));
    }

    #[test]
    fn test_shared_across_threads() {
        let normalizer = std::sync::Arc::new(normalizer());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let normalizer = std::sync::Arc::clone(&normalizer);
                std::thread::spawn(move || {
                    let line = format!("10.0.0.{}, site.com/{}, {}, 2017-1-1T0:0:{}", i, i, i, i);
                    normalizer.normalize(&line)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let record = handle.join().unwrap().unwrap();
            assert_eq!(record.ip(), format!("10.0.0.{}", i));
            assert_eq!(record.duration(), i as f64);
        }
    }
}
