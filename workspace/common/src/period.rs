use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bucket size for sales trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendInterval {
    Day,
    Week,
    Month,
}

impl TrendInterval {
    /// Parse a query-string value; unknown values fall back to `Month`,
    /// matching the lenient behavior of the dashboard clients.
    pub fn from_param(value: &str) -> Self {
        match value {
            "day" => Self::Day,
            "week" => Self::Week,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Label for the bucket a date falls into. Weeks use ISO week numbering.
    pub fn bucket_label(&self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => date.format("%G-W%V").to_string(),
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }
}

/// Rolling window for summary reports: current month, quarter or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Month,
    Quarter,
    Year,
}

impl SummaryPeriod {
    /// Parse a query-string value; unknown values fall back to `Month`.
    pub fn from_param(value: &str) -> Self {
        match value {
            "quarter" => Self::Quarter,
            "year" => Self::Year,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// First day of the period containing `today`.
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Month => month_start(today),
            Self::Quarter => {
                let quarter_month = ((today.month0() / 3) * 3) + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_month, 1)
                    .expect("first day of quarter is always valid")
            }
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .expect("first day of year is always valid"),
        }
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first day of month is always valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_start_truncates() {
        assert_eq!(month_start(d(2025, 7, 19)), d(2025, 7, 1));
        assert_eq!(month_start(d(2025, 1, 1)), d(2025, 1, 1));
    }

    #[test]
    fn summary_period_starts() {
        let today = d(2025, 8, 17);
        assert_eq!(SummaryPeriod::Month.start(today), d(2025, 8, 1));
        assert_eq!(SummaryPeriod::Quarter.start(today), d(2025, 7, 1));
        assert_eq!(SummaryPeriod::Year.start(today), d(2025, 1, 1));

        // Quarter boundaries
        assert_eq!(SummaryPeriod::Quarter.start(d(2025, 3, 31)), d(2025, 1, 1));
        assert_eq!(SummaryPeriod::Quarter.start(d(2025, 4, 1)), d(2025, 4, 1));
        assert_eq!(SummaryPeriod::Quarter.start(d(2025, 12, 31)), d(2025, 10, 1));
    }

    #[test]
    fn trend_bucket_labels() {
        let date = d(2025, 2, 3);
        assert_eq!(TrendInterval::Day.bucket_label(date), "2025-02-03");
        assert_eq!(TrendInterval::Month.bucket_label(date), "2025-02");
        assert_eq!(TrendInterval::Week.bucket_label(date), "2025-W06");

        // ISO week years differ from calendar years around January 1st
        assert_eq!(TrendInterval::Week.bucket_label(d(2027, 1, 1)), "2026-W53");
    }

    #[test]
    fn lenient_param_parsing() {
        assert_eq!(TrendInterval::from_param("day"), TrendInterval::Day);
        assert_eq!(TrendInterval::from_param("bogus"), TrendInterval::Month);
        assert_eq!(SummaryPeriod::from_param("year"), SummaryPeriod::Year);
        assert_eq!(SummaryPeriod::from_param(""), SummaryPeriod::Month);
    }
}
