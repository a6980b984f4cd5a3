//! # Timetable Layout Builder
//!
//! Places a week's occurrences onto a grid of `intervals × 7 days`. Each
//! occurrence covers a contiguous run of rows; the cell at the top of the run
//! carries a row-span and the rows beneath it are marked invisible.
//!
//! Occurrences whose runs overlap on the same day are stacked into one cell
//! spanning the union of their runs, so no class is ever hidden under another
//! class's row-span.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    calendar::{DAYS_IN_WEEK, days_of_week, week_start_of},
    compactor::{TimeInterval, compact_intervals},
    models::slot::Slot,
    occurrence::{Occurrence, occurrences_on},
};

/// An occurrence together with the rows its own time range covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOccurrence<'a> {
    pub occurrence: Occurrence<'a>,
    pub first_interval: usize,
    pub row_span: usize,
}

impl PlacedOccurrence<'_> {
    pub fn last_interval(&self) -> usize {
        self.first_interval + self.row_span - 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableCell<'a> {
    /// Occurrences rendered in this cell, by ascending start minute.
    ///
    /// Overlapping runs share the cell of the earliest one, so a member may
    /// start at a later interval; its own `first_interval` says where.
    pub occurrences: Vec<PlacedOccurrence<'a>>,
    pub row_span: usize,
    /// `false` when the cell is covered by a row-span from above.
    pub visible: bool,
}

impl TimetableCell<'_> {
    fn empty() -> Self {
        Self {
            occurrences: Vec::new(),
            row_span: 1,
            visible: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableLayout<'a> {
    pub week_start: NaiveDate,
    pub days: [NaiveDate; DAYS_IN_WEEK],
    pub intervals: Vec<TimeInterval>,
    /// `rows[interval][day]`
    pub rows: Vec<Vec<TimetableCell<'a>>>,
}

impl<'a> TimetableLayout<'a> {
    /// No occurrences this week; callers show an empty-state message.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn cell(&self, interval: usize, day: usize) -> Option<&TimetableCell<'a>> {
        self.rows.get(interval).and_then(|row| row.get(day))
    }

    pub fn row_labels(&self) -> Vec<String> {
        self.intervals.iter().map(TimeInterval::label).collect()
    }

    /// All placed occurrences, row by row, then day by day.
    pub fn placed(&self) -> impl Iterator<Item = &PlacedOccurrence<'a>> {
        self.rows
            .iter()
            .flatten()
            .flat_map(|cell| cell.occurrences.iter())
    }
}

/// Finds the contiguous run of `intervals` overlapped by `occurrence`.
fn place<'a>(intervals: &[TimeInterval], occurrence: Occurrence<'a>) -> Option<PlacedOccurrence<'a>> {
    let overlaps = |interval: &TimeInterval| {
        interval.overlaps(occurrence.start_minute, occurrence.end_minute)
    };
    let first = intervals.iter().position(overlaps)?;
    let last = intervals.iter().rposition(overlaps)?;

    Some(PlacedOccurrence {
        occurrence,
        first_interval: first,
        row_span: last - first + 1,
    })
}

/// Groups one day's placed occurrences into cells whose runs do not overlap.
///
/// Returns `(first_interval, last_interval, members)` per cell.
fn group_overlapping(mut placed: Vec<PlacedOccurrence<'_>>) -> Vec<(usize, usize, Vec<PlacedOccurrence<'_>>)> {
    placed.sort_by_key(|p| p.first_interval);

    let mut groups: Vec<(usize, usize, Vec<PlacedOccurrence<'_>>)> = Vec::new();
    for p in placed {
        let last = p.last_interval();
        match groups.last_mut() {
            Some((_, group_last, members)) if p.first_interval <= *group_last => {
                *group_last = (*group_last).max(last);
                members.push(p);
            }
            _ => groups.push((p.first_interval, last, vec![p])),
        }
    }
    groups
}

/// Builds the grid for the Monday-based week containing `week_reference`.
pub fn compute_timetable_layout(slots: &[Slot], week_reference: NaiveDate) -> TimetableLayout<'_> {
    let days = days_of_week(week_reference);
    let per_day: Vec<Vec<Occurrence<'_>>> = days
        .iter()
        .map(|day| occurrences_on(slots, *day))
        .collect();

    let intervals = compact_intervals(per_day.iter().flatten());
    let mut rows = vec![vec![TimetableCell::empty(); DAYS_IN_WEEK]; intervals.len()];

    for (day_index, occurrences) in per_day.into_iter().enumerate() {
        let placed = occurrences
            .into_iter()
            .filter_map(|occurrence| place(&intervals, occurrence))
            .collect();

        for (first, last, mut members) in group_overlapping(placed) {
            members.sort_by_key(|p| p.occurrence.start_minute);

            let origin = &mut rows[first][day_index];
            origin.row_span = last - first + 1;
            origin.occurrences = members;

            for row in rows.iter_mut().take(last + 1).skip(first + 1) {
                row[day_index].visible = false;
            }
        }
    }

    tracing::trace!(
        week_start = %week_start_of(week_reference),
        rows = intervals.len(),
        "computed timetable layout"
    );

    TimetableLayout {
        week_start: week_start_of(week_reference),
        days,
        intervals,
        rows,
    }
}
