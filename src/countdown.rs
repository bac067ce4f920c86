//! Countdown to the configured target date.
//!
//! Months are 30 days and years are 12 months, so the segmented view and the
//! total-days view always agree with each other.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Serialize;

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_MONTH: i64 = 30;
const MONTHS_PER_YEAR: i64 = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Decompose a difference in milliseconds. Non-positive input is all zeros.
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::default();
        }
        let mut total = diff_ms / 1000;

        let seconds = total % SECONDS_PER_MINUTE;
        total /= SECONDS_PER_MINUTE;
        let minutes = total % MINUTES_PER_HOUR;
        total /= MINUTES_PER_HOUR;
        let hours = total % HOURS_PER_DAY;
        total /= HOURS_PER_DAY;
        let days = total % DAYS_PER_MONTH;
        total /= DAYS_PER_MONTH;
        let months = total % MONTHS_PER_YEAR;
        let years = total / MONTHS_PER_YEAR;

        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_days(&self) -> i64 {
        self.years * MONTHS_PER_YEAR * DAYS_PER_MONTH + self.months * DAYS_PER_MONTH + self.days
    }

    /// `YY : MM : DD : HH : MM : SS`
    pub fn segmented(&self) -> String {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" : ")
    }
}

pub fn time_left<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> TimeLeft {
    let diff = target.clone().signed_duration_since(now.clone());
    TimeLeft::from_millis(diff.num_milliseconds())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownDisplay {
    #[default]
    Segmented,
    TotalDays,
}

impl CountdownDisplay {
    pub fn toggled(self) -> Self {
        match self {
            CountdownDisplay::Segmented => CountdownDisplay::TotalDays,
            CountdownDisplay::TotalDays => CountdownDisplay::Segmented,
        }
    }

    pub fn render(self, left: &TimeLeft) -> String {
        match self {
            CountdownDisplay::Segmented => left.segmented(),
            CountdownDisplay::TotalDays => left.total_days().to_string(),
        }
    }
}

/// Parse a target in local time, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
pub fn parse_target(text: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_zero_when_past() {
        assert_eq!(TimeLeft::from_millis(0), TimeLeft::default());
        assert_eq!(TimeLeft::from_millis(-5_000), TimeLeft::default());
    }

    #[test]
    fn test_decomposition() {
        let secs = ((((1 * 12 + 2) * 30 + 3) * 24 + 4) * 60 + 5) * 60 + 6;
        let left = TimeLeft::from_millis(secs * 1000 + 999);
        assert_eq!(
            left,
            TimeLeft {
                years: 1,
                months: 2,
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
        assert_eq!(left.total_days(), 360 + 60 + 3);
    }

    #[test]
    fn test_segmented_padding() {
        let left = TimeLeft {
            years: 1,
            months: 0,
            days: 12,
            hours: 3,
            minutes: 0,
            seconds: 9,
        };
        assert_eq!(left.segmented(), "01 : 00 : 12 : 03 : 00 : 09");
        assert_eq!(CountdownDisplay::TotalDays.render(&left), "372");
    }

    #[test]
    fn test_time_left_between_dates() {
        let now = Utc::now();
        let target = now + Duration::days(45) + Duration::hours(2);
        let left = time_left(&target, &now);
        assert_eq!(left.months, 1);
        assert_eq!(left.days, 15);
        assert_eq!(left.hours, 2);
    }

    #[test]
    fn test_display_toggle() {
        let display = CountdownDisplay::default();
        assert_eq!(display.toggled(), CountdownDisplay::TotalDays);
        assert_eq!(display.toggled().toggled(), display);
    }

    #[test]
    fn test_parse_target() {
        assert!(parse_target("2027-02-01T00:00:00").is_some());
        assert!(parse_target("2027-02-01").is_some());
        assert!(parse_target("next tuesday").is_none());
    }
}
