//! Reads how long a role lasted from the free-text duration on a resume.

use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate};
use regex::Regex;

/// "18 months", "2 years", "1.5 yrs", "2 years 3 months".
static PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(years?|yrs?|months?|mos?)\b")
        .expect("valid tenure phrase regex")
});

/// "Jan 2020 - Mar 2021", "March 2022 – Present", "2019 to 2020".
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:([a-z]{3,9})\.?\s+)?(\d{4})\s*(?:-|–|—|to)\s*(?:(present|current|now)|(?:([a-z]{3,9})\.?\s+)?(\d{4}))",
    )
    .expect("valid tenure range regex")
});

/// Whole months covered by `duration`, or `None` when it cannot be read.
/// `today` stands in for "Present".
pub fn tenure_months(duration: &str, today: NaiveDate) -> Option<u32> {
    from_phrases(duration).or_else(|| from_range(duration, today))
}

/// A role shorter than a year. Unreadable durations are never short.
pub fn is_short_tenure(duration: &str, today: NaiveDate) -> bool {
    matches!(tenure_months(duration, today), Some(months) if months < 12)
}

fn from_phrases(duration: &str) -> Option<u32> {
    let mut total = 0.0;
    let mut matched = false;

    for caps in PHRASE_RE.captures_iter(duration) {
        let amount: f64 = caps[1].parse().ok()?;
        let unit = caps[2].to_lowercase();
        total += if unit.starts_with('y') { amount * 12.0 } else { amount };
        matched = true;
    }

    matched.then(|| total.round() as u32)
}

fn from_range(duration: &str, today: NaiveDate) -> Option<u32> {
    let caps = RANGE_RE.captures(duration)?;

    let start_year: i32 = caps[2].parse().ok()?;
    let start_month = month_number(caps.get(1).map(|m| m.as_str()))?;

    let (end_year, end_month) = if caps.get(3).is_some() {
        (today.year(), today.month())
    } else {
        let year: i32 = caps.get(5)?.as_str().parse().ok()?;
        (year, month_number(caps.get(4).map(|m| m.as_str()))?)
    };

    let months = (end_year - start_year) * 12 + end_month as i32 - start_month as i32;
    u32::try_from(months).ok()
}

/// A missing month reads as January. A present but unknown one fails the parse.
fn month_number(name: Option<&str>) -> Option<u32> {
    match name {
        None => Some(1),
        Some(name) => name
            .parse::<Month>()
            .ok()
            .or_else(|| name.get(..3).and_then(|abbr| abbr.parse::<Month>().ok()))
            .map(|m| m.number_from_month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_phrases() {
        assert_eq!(tenure_months("8 months", today()), Some(8));
        assert_eq!(tenure_months("2 years", today()), Some(24));
        assert_eq!(tenure_months("1 year 3 months", today()), Some(15));
        assert_eq!(tenure_months("1.5 yrs", today()), Some(18));
    }

    #[test]
    fn test_month_ranges() {
        assert_eq!(tenure_months("Jan 2020 - Mar 2021", today()), Some(14));
        assert_eq!(tenure_months("September 2023 – Present", today()), Some(9));
        assert_eq!(tenure_months("Feb. 2022 to Aug. 2022", today()), Some(6));
    }

    #[test]
    fn test_year_ranges() {
        assert_eq!(tenure_months("2019 - 2021", today()), Some(24));
        assert_eq!(tenure_months("2023 - 2023", today()), Some(0));
    }

    #[test]
    fn test_unreadable_durations() {
        assert_eq!(tenure_months("a while", today()), None);
        assert_eq!(tenure_months("", today()), None);
        assert_eq!(tenure_months("Smarch 2020 - Present", today()), None);
        assert_eq!(tenure_months("2022 - 2020", today()), None);
        assert!(!is_short_tenure("a while", today()));
    }

    #[test]
    fn test_short_tenure_boundary() {
        assert!(is_short_tenure("11 months", today()));
        assert!(!is_short_tenure("12 months", today()));
        assert!(!is_short_tenure("18 months", today()));
        assert!(is_short_tenure("Jan 2024 - Present", today()));
    }
}
