//! # Interval Compactor
//!
//! Rows of the weekly grid are not a fixed 30-minute raster. They are the gaps
//! between the distinct start and end minutes present in the week, which is
//! the fewest rows that still let every class begin and end on a row edge.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{occurrence::Occurrence, time::minutes_to_time};

/// A half-open `[start_minute, end_minute)` row of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeInterval {
    /// Half-open overlap test.
    pub fn overlaps(&self, start_minute: u32, end_minute: u32) -> bool {
        self.start_minute.max(start_minute) < self.end_minute.min(end_minute)
    }

    pub fn start_label(&self) -> String {
        minutes_to_time(self.start_minute)
    }

    pub fn end_label(&self) -> String {
        minutes_to_time(self.end_minute)
    }

    /// `"08:00 - 09:30"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.start_label(), self.end_label())
    }
}

/// Sorted, deduplicated start and end minutes of `occurrences`.
pub fn boundaries<'a, I>(occurrences: I) -> Vec<u32>
where
    I: IntoIterator<Item = &'a Occurrence<'a>>,
{
    occurrences
        .into_iter()
        .flat_map(|occurrence| [occurrence.start_minute, occurrence.end_minute])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Minimal ordered rows covering `occurrences`. Empty input gives no rows.
pub fn compact_intervals<'a, I>(occurrences: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = &'a Occurrence<'a>>,
{
    boundaries(occurrences)
        .windows(2)
        .filter(|pair| pair[0] < pair[1])
        .map(|pair| TimeInterval {
            start_minute: pair[0],
            end_minute: pair[1],
        })
        .collect()
}
