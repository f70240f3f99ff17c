use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, stored as the first day of that month. All ledger
/// operations take one of these explicitly; `current()` is only called at
/// route boundaries when the caller omits the month.
///
/// Wire format is `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillingMonth(NaiveDate);

impl BillingMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Normalize any date to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 exists in every month, so with_day(1) cannot fail here.
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for BillingMonth {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").map(Self)
    }
}

impl Serialize for BillingMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BillingMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("invalid month '{s}', expected YYYY-MM")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_month() {
        let m: BillingMonth = "2025-06".parse().unwrap();
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(m.to_string(), "2025-06");
    }

    #[test]
    fn rejects_garbage() {
        assert!("2025-13".parse::<BillingMonth>().is_err());
        assert!("junk".parse::<BillingMonth>().is_err());
        assert!("2025-06-01".parse::<BillingMonth>().is_err());
    }

    #[test]
    fn from_date_normalizes_to_first_day() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
        assert_eq!(
            BillingMonth::from_date(date),
            BillingMonth::new(2025, 6).unwrap()
        );
    }

    #[test]
    fn months_order_chronologically() {
        let may = BillingMonth::new(2025, 5).unwrap();
        let june = BillingMonth::new(2025, 6).unwrap();
        assert!(may < june);
    }

    #[test]
    fn serde_round_trip() {
        let m = BillingMonth::new(2025, 6).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"2025-06\"");
        let back: BillingMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
