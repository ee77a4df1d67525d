//! Review date normalization
//!
//! Listing pages show either relative phrases ("3 days ago") or absolute
//! dates ("December 14, 2024"). Both resolve to a calendar date against a
//! fixed reference day; text that cannot be read resolves to that day.
//!
//! Units are checked in the order day, week, month, year, so text that
//! mentions several units ("Monday, 2 months ago") is read as days.

use chrono::{DateTime, Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static DAYS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*days?\s*ago").unwrap());
static WEEKS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*weeks?\s*ago").unwrap());
static MONTHS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*months?\s*ago").unwrap());
static YEARS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*years?\s*ago").unwrap());

/// Absolute formats tried in order against lowercased text
const ABSOLUTE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelativeUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Resolves raw date text to a calendar date. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    today: NaiveDate,
}

impl DateNormalizer {
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn normalize(&self, raw: &str) -> NaiveDate {
        let text = raw.trim().to_lowercase();

        if let Some((unit, amount)) = Self::relative(&text) {
            return self.subtract(unit, amount).unwrap_or(self.today);
        }

        Self::parse_absolute(&text).unwrap_or(self.today)
    }

    fn relative(text: &str) -> Option<(RelativeUnit, u32)> {
        let (unit, pattern) = if text.contains("day") {
            (RelativeUnit::Day, &*DAYS_AGO)
        } else if text.contains("week") {
            (RelativeUnit::Week, &*WEEKS_AGO)
        } else if text.contains("month") {
            (RelativeUnit::Month, &*MONTHS_AGO)
        } else if text.contains("year") {
            (RelativeUnit::Year, &*YEARS_AGO)
        } else {
            return None;
        };

        // "a day ago", "last week": no number means one unit
        let amount = pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(1);

        Some((unit, amount))
    }

    fn subtract(&self, unit: RelativeUnit, amount: u32) -> Option<NaiveDate> {
        match unit {
            RelativeUnit::Day => self.today.checked_sub_days(Days::new(u64::from(amount))),
            RelativeUnit::Week => self.today.checked_sub_days(Days::new(u64::from(amount) * 7)),
            RelativeUnit::Month => self.today.checked_sub_months(Months::new(amount)),
            RelativeUnit::Year => self
                .today
                .checked_sub_months(Months::new(amount.checked_mul(12)?)),
        }
    }

    fn parse_absolute(text: &str) -> Option<NaiveDate> {
        if text.is_empty() {
            return None;
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Some(datetime.date_naive());
        }

        ABSOLUTE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("3 days ago", date(2024, 1, 7))]
    #[case("1 day ago", date(2024, 1, 9))]
    #[case("a day ago", date(2024, 1, 9))]
    #[case("2 weeks ago", date(2023, 12, 27))]
    #[case("1 month ago", date(2023, 12, 10))]
    #[case("2 months ago", date(2023, 11, 10))]
    #[case("2 years ago", date(2022, 1, 10))]
    #[case("  5 Days Ago ", date(2024, 1, 5))]
    #[case("December 14, 2023", date(2023, 12, 14))]
    #[case("January 5, 2024", date(2024, 1, 5))]
    #[case("2023-11-02", date(2023, 11, 2))]
    #[case("garbled text", date(2024, 1, 10))]
    #[case("", date(2024, 1, 10))]
    fn test_normalize(#[case] raw: &str, #[case] expected: NaiveDate) {
        let normalizer = DateNormalizer::new(date(2024, 1, 10));
        assert_eq!(normalizer.normalize(raw), expected);
    }

    #[test]
    fn test_day_takes_precedence_over_month() {
        let normalizer = DateNormalizer::new(date(2024, 1, 10));
        // Mentions both units; the day check wins and finds no "N days ago"
        assert_eq!(normalizer.normalize("Monday, 2 months ago"), date(2024, 1, 9));
    }

    #[test]
    fn test_month_subtraction_clamps_to_month_end() {
        let normalizer = DateNormalizer::new(date(2024, 3, 31));
        assert_eq!(normalizer.normalize("1 month ago"), date(2024, 2, 29));
    }
}
