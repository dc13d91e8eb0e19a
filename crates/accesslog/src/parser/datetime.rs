//! DateTime: the `YYYY-M-DTh:m:s` grammar.
//!
//! Components may be one or two digits and unpadded. A fractional part on
//! the seconds component is dropped before conversion. Day-of-month is only
//! range-checked against 1..=31; a day past the end of its month rolls over
//! into the next month (`2017-4-31` is `2017-05-01`).

use chrono::{Days, NaiveDate, NaiveTime};

use super::model::{Timestamp, ValidationError};

pub fn parse(text: &str) -> Result<Timestamp, ValidationError> {
    let malformed = || ValidationError::MalformedDateTime(text.to_string());

    let (date, time) = text.trim().split_once('T').ok_or_else(malformed)?;

    let [year, month, day] = split_three(date, '-').ok_or_else(malformed)?;
    let [hour, minute, second] = split_three(time, ':').ok_or_else(malformed)?;

    // fractional seconds are truncated
    let second = second.split_once('.').map_or(second, |(whole, _)| whole);

    let year: i32 = parse_number(year).ok_or_else(malformed)?;
    let month: u32 = parse_number(month).ok_or_else(malformed)?;
    let day: u32 = parse_number(day).ok_or_else(malformed)?;
    let hour: u32 = parse_number(hour).ok_or_else(malformed)?;
    let minute: u32 = parse_number(minute).ok_or_else(malformed)?;
    let second: u32 = parse_number(second).ok_or_else(malformed)?;

    if !(1..=31).contains(&day) {
        return Err(malformed());
    }

    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .ok_or_else(malformed)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(malformed)?;

    Ok(date.and_time(time))
}

fn split_three(text: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = text.split(separator).map(str::trim);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

/// Plain ASCII digits only: no sign, no whitespace.
fn parse_number<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
