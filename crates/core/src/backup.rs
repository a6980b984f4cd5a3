//! Backup records: the slot collection minus identity and timestamps.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::{
    color::color_for_class,
    errors::{TimetableError, TimetableResult},
    models::slot::{Slot, SlotRecord},
};

/// Suggested file name for a backup taken at `now`.
pub fn backup_file_name(now: NaiveDateTime) -> String {
    format!("Backup_Config_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Records suitable for re-import, with color and note filled in.
pub fn export_records(slots: &[Slot]) -> Vec<SlotRecord> {
    slots
        .iter()
        .cloned()
        .map(|slot| {
            let color = slot.display_color();
            let mut record = SlotRecord::from(slot);
            record.id = None;
            record.created_at = None;
            record.color = Some(color);
            record.note = Some(record.note.unwrap_or_default());
            record
        })
        .collect()
}

/// Converts backup records into slots ready to be inserted.
pub fn records_to_slots(records: Vec<SlotRecord>) -> TimetableResult<Vec<Slot>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            record.id = None;
            record.created_at = None;
            record.note = Some(record.note.unwrap_or_default());
            if record.color.is_none() {
                record.color = Some(color_for_class(&record.class_name));
            }
            let slot = Slot::try_from(record).map_err(|e| prefix(index, e))?;
            slot.validate().map_err(|e| prefix(index, e))?;
            Ok(slot)
        })
        .collect()
}

fn prefix(index: usize, error: TimetableError) -> TimetableError {
    match error {
        TimetableError::Validation(message) => {
            TimetableError::Validation(format!("Record {index}: {message}"))
        }
        other => other,
    }
}

/// Parses a backup document. The top level must be an array of records.
pub fn parse_backup(json: &str) -> TimetableResult<Vec<Slot>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| TimetableError::Validation(format!("Invalid backup JSON: {e}")))?;
    if !value.is_array() {
        return Err(TimetableError::Validation(
            "Backup must be an array of slot records".to_string(),
        ));
    }
    let records: Vec<SlotRecord> = serde_json::from_value(value)
        .map_err(|e| TimetableError::Validation(format!("Invalid slot record: {e}")))?;
    records_to_slots(records)
}
