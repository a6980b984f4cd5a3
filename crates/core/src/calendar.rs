//! Monday-based calendar arithmetic shared by the layout and revenue paths.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

/// The Monday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates of the week containing `reference`, Monday first.
pub fn days_of_week(reference: NaiveDate) -> [NaiveDate; DAYS_IN_WEEK] {
    let monday = week_start_of(reference);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// 1 = Monday .. 7 = Sunday.
pub fn day_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

pub fn weekday_from_number(number: u8) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Every date from `start` to `end` inclusive. Yields nothing when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    first_of_month(year, month).pred_opt().unwrap_or(date)
}

pub(crate) fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}
