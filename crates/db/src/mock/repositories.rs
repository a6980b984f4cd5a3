use async_trait::async_trait;
use mockall::mock;
use timetable_core::models::{schedule::Schedule, slot::Slot};
use uuid::Uuid;

use crate::repositories::{ScheduleRepository, SlotRepository};

// Mock repositories for testing
mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
        async fn create_schedule(&self, name: String) -> eyre::Result<Schedule>;

        async fn get_schedule_by_id(&self, id: Uuid) -> eyre::Result<Option<Schedule>>;
    }
}

mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn create_slot(&self, schedule_id: Uuid, slot: Slot) -> eyre::Result<Slot>;

        async fn get_slots_by_schedule_id(&self, schedule_id: Uuid) -> eyre::Result<Vec<Slot>>;

        async fn get_slot_by_id(
            &self,
            schedule_id: Uuid,
            slot_id: Uuid,
        ) -> eyre::Result<Option<Slot>>;

        async fn update_slot(&self, schedule_id: Uuid, slot: Slot) -> eyre::Result<Slot>;

        async fn delete_slot(&self, schedule_id: Uuid, slot_id: Uuid) -> eyre::Result<bool>;

        async fn replace_all_slots(
            &self,
            schedule_id: Uuid,
            slots: Vec<Slot>,
        ) -> eyre::Result<Vec<Slot>>;
    }
}
