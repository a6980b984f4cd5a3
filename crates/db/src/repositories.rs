//! Storage handles for schedules and their slots.
//!
//! The API depends on these traits only; the PostgreSQL implementations are
//! built once at start-up and injected, and tests swap in the mocks from
//! [`crate::mock`].

pub mod schedule;
pub mod slot;

use async_trait::async_trait;
use eyre::Result;
use timetable_core::models::{schedule::Schedule, slot::Slot};
use uuid::Uuid;

pub use schedule::PgScheduleRepository;
pub use slot::PgSlotRepository;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create_schedule(&self, name: String) -> Result<Schedule>;

    async fn get_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Inserts a new slot and returns it with its assigned id.
    async fn create_slot(&self, schedule_id: Uuid, slot: Slot) -> Result<Slot>;

    /// Current snapshot of the schedule's slots, oldest first.
    async fn get_slots_by_schedule_id(&self, schedule_id: Uuid) -> Result<Vec<Slot>>;

    async fn get_slot_by_id(&self, schedule_id: Uuid, slot_id: Uuid) -> Result<Option<Slot>>;

    /// Overwrites the whole record identified by `slot.id`. Last write wins.
    async fn update_slot(&self, schedule_id: Uuid, slot: Slot) -> Result<Slot>;

    /// Returns whether a record was removed.
    async fn delete_slot(&self, schedule_id: Uuid, slot_id: Uuid) -> Result<bool>;

    /// Deletes every slot of the schedule and inserts `slots` in their place,
    /// atomically.
    async fn replace_all_slots(&self, schedule_id: Uuid, slots: Vec<Slot>) -> Result<Vec<Slot>>;
}
