//! Calendar month token (`YYYY-MM`) that keys monthly ledgers.
//!
//! Every ledger operation is scoped to a `(user, month)` pair, so the token
//! is validated once at the edge and passed around as a value type instead
//! of a raw string.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Error returned when a month token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month token '{0}': expected YYYY-MM with month 01-12")]
pub struct MonthParseError(pub String);

/// A calendar month, parsed from and displayed as a `YYYY-MM` token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month from numeric parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(MonthParseError(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month number (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // Safe: year/month validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.first_day() + Months::new(1) - Days::new(1)
    }

    /// Inclusive date range for aggregating incidental daily expenses.
    ///
    /// For the month containing `today` the range is capped at `today`;
    /// other months span the full calendar month.
    #[must_use]
    pub fn expense_window(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = if Self::containing(today) == self {
            today
        } else {
            self.last_day()
        };
        (self.first_day(), end)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !shape_ok {
            return Err(MonthParseError(s.to_string()));
        }

        let year: i32 = s[..4].parse().map_err(|_| MonthParseError(s.to_string()))?;
        let month: u32 = s[5..].parse().map_err(|_| MonthParseError(s.to_string()))?;
        Self::new(year, month).map_err(|_| MonthParseError(s.to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tokens() {
        let april: Month = "2025-04".parse().unwrap();
        assert_eq!(april.year(), 2025);
        assert_eq!(april.month(), 4);
        assert_eq!(april.to_string(), "2025-04");

        assert!("2025-01".parse::<Month>().is_ok());
        assert!("2025-12".parse::<Month>().is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!("2025-4".parse::<Month>().is_err());
        assert!("25-04".parse::<Month>().is_err());
        assert!("2025-13".parse::<Month>().is_err());
        assert!("2025-00".parse::<Month>().is_err());
        assert!("2025/04".parse::<Month>().is_err());
        assert!("2025-04-01".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
        assert!("abcd-ef".parse::<Month>().is_err());
    }

    #[test]
    fn test_day_boundaries() {
        let feb: Month = "2024-02".parse().unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        // 2024 is a leap year
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec: Month = "2025-12".parse().unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_expense_window_caps_current_month_at_today() {
        let april: Month = "2025-04".parse().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        assert_eq!(
            april.expense_window(today),
            (
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
            )
        );

        // A past month spans its full calendar range.
        let march: Month = "2025-03".parse().unwrap();
        assert_eq!(
            march.expense_window(today),
            (
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
            )
        );
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let a: Month = "2024-12".parse().unwrap();
        let b: Month = "2025-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_round_trip() {
        let month: Month = "2025-04".parse().unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-04\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);

        assert!(serde_json::from_str::<Month>("\"2025-4\"").is_err());
    }
}
