#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use timetable_core::models::slot::{Recurrence, Slot};
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn weekly(class_name: &str, day_of_week: Weekday, start: &str, end: &str, salary: f64) -> Slot {
    Slot {
        id: Some(Uuid::new_v4()),
        class_name: class_name.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        location: None,
        note: None,
        salary,
        color: None,
        excluded_dates: BTreeSet::new(),
        recurrence: Recurrence::Weekly {
            day_of_week,
            effective_start_date: None,
            effective_end_date: None,
        },
        created_at: None,
    }
}

pub fn one_time(class_name: &str, on: NaiveDate, start: &str, end: &str, salary: f64) -> Slot {
    Slot {
        recurrence: Recurrence::OneTime { specific_date: on },
        ..weekly(class_name, Weekday::Mon, start, end, salary)
    }
}

pub fn bounded(mut slot: Slot, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Slot {
    if let Recurrence::Weekly {
        effective_start_date,
        effective_end_date,
        ..
    } = &mut slot.recurrence
    {
        *effective_start_date = start;
        *effective_end_date = end;
    }
    slot
}

pub fn excluding(mut slot: Slot, dates: &[NaiveDate]) -> Slot {
    slot.excluded_dates.extend(dates.iter().copied());
    slot
}
