//! # Timetable Core
//!
//! The recurrence-resolution and timetable-layout engine behind the weekly teaching
//! schedule. Everything in this crate is a pure transformation over an immutable
//! snapshot of [`Slot`](models::slot::Slot) records:
//!
//! - [`time`] converts wall-clock strings to minute offsets and back
//! - [`occurrence`] decides whether a slot occurs on a given date
//! - [`compactor`] derives the minimal set of time rows for a week
//! - [`layout`] places occurrences onto the (row × day) grid
//! - [`revenue`] aggregates salary over weeks, months, quarters and years
//!
//! Storage, transport and presentation live in the `timetable-db` and
//! `timetable-api` crates.

pub mod backup;
pub mod calendar;
pub mod color;
pub mod compactor;
pub mod edit;
pub mod errors;
pub mod layout;
pub mod models;
pub mod occurrence;
pub mod revenue;
pub mod time;
pub mod upcoming;
