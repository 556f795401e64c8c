//! Window resolution
//!
//! Every metric is computed over a fixed, contiguous run of calendar days
//! ending at a reference date ("today"). Weeks are 7 days and months are a
//! flat 30 days; months are not calendar-aware.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of a week window in days.
pub const WEEK_DAYS: u32 = 7;
/// Length of a month window in days.
pub const MONTH_DAYS: u32 = 30;

/// Report period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Week,
    Month,
}

impl ReportPeriod {
    /// Number of days covered by this period.
    pub fn days(&self) -> u32 {
        match self {
            ReportPeriod::Week => WEEK_DAYS,
            ReportPeriod::Month => MONTH_DAYS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
        }
    }

    /// Get display name for this period.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "Last 7 days",
            ReportPeriod::Month => "Last 30 days",
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            other => Err(Error::InvalidParameter(format!(
                "unknown report period '{}' (expected 'week' or 'month')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date range the metrics are computed over.
///
/// `ordered_dates` runs oldest to newest and always ends at `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub ordered_dates: Vec<NaiveDate>,
}

impl Window {
    /// Resolve the window for `period` ending at `reference_date` inclusive.
    pub fn resolve(period: ReportPeriod, reference_date: NaiveDate) -> Self {
        Self::ending_at(reference_date, period.days())
    }

    /// A window of `days` contiguous days ending at `end_date` inclusive.
    ///
    /// Near the start of the calendar the window is clamped to
    /// `NaiveDate::MIN` and holds fewer than `days` dates.
    pub fn ending_at(end_date: NaiveDate, days: u32) -> Self {
        if days == 0 {
            return Self::empty(end_date);
        }
        let start_date = end_date
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        let ordered_dates = start_date
            .iter_days()
            .take_while(|&date| date <= end_date)
            .collect::<Vec<_>>();
        Self {
            start_date,
            end_date,
            ordered_dates,
        }
    }

    /// A window with no dates. Every rate over it is zero.
    pub fn empty(reference_date: NaiveDate) -> Self {
        Self {
            start_date: reference_date,
            end_date: reference_date,
            ordered_dates: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ordered_dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_dates.is_empty()
    }
}
