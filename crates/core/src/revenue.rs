//! # Revenue Aggregator
//!
//! Walks a calendar period day by day and sums the salary of every occurrence
//! the resolver reports for that day, grouping the sums into buckets suited to
//! the period: days for a week, Monday-aligned weeks for a month, months for a
//! quarter or a year.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{days_between, days_of_week, end_of_month, first_of_month, week_start_of},
    errors::TimetableError,
    models::slot::Slot,
    occurrence::occurrence_on,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodKind {
    /// First and last day (inclusive) of the period containing `reference`.
    pub fn range(self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            PeriodKind::Week => {
                let monday = week_start_of(reference);
                (monday, monday + Duration::days(6))
            }
            PeriodKind::Month => {
                let start = first_of_month(reference.year(), reference.month());
                (start, end_of_month(start))
            }
            PeriodKind::Quarter => {
                let first_month = quarter_of(reference) * 3 - 2;
                let start = first_of_month(reference.year(), first_month);
                let end = end_of_month(first_of_month(reference.year(), first_month + 2));
                (start, end)
            }
            PeriodKind::Year => (
                first_of_month(reference.year(), 1),
                end_of_month(first_of_month(reference.year(), 12)),
            ),
        }
    }

    /// Human-readable name of the period containing `reference`.
    pub fn label(self, reference: NaiveDate) -> String {
        match self {
            PeriodKind::Week => {
                let (start, end) = self.range(reference);
                week_range_label(start, end)
            }
            PeriodKind::Month => format!("Month {}", reference.format("%m/%Y")),
            PeriodKind::Quarter => format!("Quarter {}/{}", quarter_of(reference), reference.year()),
            PeriodKind::Year => format!("Year {}", reference.year()),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
            PeriodKind::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for PeriodKind {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "quarter" => Ok(PeriodKind::Quarter),
            "year" => Ok(PeriodKind::Year),
            other => Err(TimetableError::Validation(format!(
                "Unknown period '{other}', expected week, month, quarter or year"
            ))),
        }
    }
}

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueBucket {
    pub label: String,
    /// First day summed into this bucket.
    pub start: NaiveDate,
    /// Last day summed into this bucket.
    pub end: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub period: PeriodKind,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub buckets: Vec<RevenueBucket>,
    pub total: f64,
}

fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

fn week_range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("Week ({} - {})", start.format("%d/%m"), end.format("%d/%m"))
}

/// Salary earned on `date` across all paid occurrences.
pub fn daily_revenue(slots: &[Slot], date: NaiveDate) -> f64 {
    slots
        .iter()
        .filter(|slot| slot.salary > 0.0)
        .filter(|slot| occurrence_on(slot, date).is_some())
        .map(|slot| slot.salary)
        .sum()
}

/// Salary earned from `start` to `end`, both inclusive.
pub fn revenue_between(slots: &[Slot], start: NaiveDate, end: NaiveDate) -> f64 {
    days_between(start, end)
        .map(|day| daily_revenue(slots, day))
        .sum()
}

fn day_buckets(slots: &[Slot], reference: NaiveDate) -> Vec<RevenueBucket> {
    days_of_week(reference)
        .into_iter()
        .map(|day| RevenueBucket {
            label: day.format("%a %d/%m").to_string(),
            start: day,
            end: day,
            amount: daily_revenue(slots, day),
        })
        .collect()
}

/// One bucket per Monday-aligned week touching the month. Days outside the
/// month are left out, so a boundary week is never counted by two months.
fn week_buckets(slots: &[Slot], month_start: NaiveDate, month_end: NaiveDate) -> Vec<RevenueBucket> {
    let mut buckets = Vec::new();
    let mut monday = week_start_of(month_start);

    while monday <= month_end {
        let sunday = monday + Duration::days(6);
        let start = monday.max(month_start);
        let end = sunday.min(month_end);
        buckets.push(RevenueBucket {
            label: week_range_label(monday, sunday),
            start,
            end,
            amount: revenue_between(slots, start, end),
        });
        monday += Duration::days(7);
    }
    buckets
}

fn month_buckets(
    slots: &[Slot],
    start: NaiveDate,
    end: NaiveDate,
    label_format: &str,
) -> Vec<RevenueBucket> {
    let mut buckets = Vec::new();
    let mut month_start = start;

    while month_start <= end {
        let month_end = end_of_month(month_start);
        buckets.push(RevenueBucket {
            label: month_start.format(label_format).to_string(),
            start: month_start,
            end: month_end,
            amount: revenue_between(slots, month_start, month_end),
        });
        let Some(next) = month_end.succ_opt() else {
            break;
        };
        month_start = next;
    }
    buckets
}

/// Revenue for the `period` containing `reference`.
///
/// Callers pass the Monday of the week being browsed, not today's date, so the
/// statistics follow the schedule the user is looking at.
pub fn compute_revenue(slots: &[Slot], period: PeriodKind, reference: NaiveDate) -> RevenueReport {
    let (start, end) = period.range(reference);
    let buckets = match period {
        PeriodKind::Week => day_buckets(slots, reference),
        PeriodKind::Month => week_buckets(slots, start, end),
        PeriodKind::Quarter => month_buckets(slots, start, end, "%B"),
        PeriodKind::Year => month_buckets(slots, start, end, "%b"),
    };
    let total: f64 = buckets.iter().map(|bucket| bucket.amount).sum();

    tracing::trace!(%period, %start, %end, total, "computed revenue");

    RevenueReport {
        period,
        label: period.label(reference),
        start,
        end,
        buckets,
        total,
    }
}
