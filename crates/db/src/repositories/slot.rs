use crate::models::{DbSlot, RecurrenceColumns};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{Result, eyre};
use sqlx::{Executor, Pool, Postgres};
use timetable_core::models::slot::Slot;
use uuid::Uuid;

use super::SlotRepository;

macro_rules! slot_columns {
    () => {
        "id, schedule_id, class_name, start_time, end_time, location, note, salary, \
         is_recurring_nature, color, day_of_week, effective_start_date, effective_end_date, \
         specific_date, excluded_dates, created_at"
    };
}

pub struct PgSlotRepository {
    pool: Pool<Postgres>,
}

impl PgSlotRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_slots(rows: Vec<DbSlot>) -> Result<Vec<Slot>> {
    rows.into_iter().map(DbSlot::into_slot).collect()
}

/// Inserts one slot through any executor, so the same statement serves both
/// single inserts and the bulk replace transaction.
async fn insert_slot<'e, E>(executor: E, schedule_id: Uuid, slot: &Slot) -> Result<DbSlot>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let columns = RecurrenceColumns::from(&slot.recurrence);
    let excluded_dates: Vec<NaiveDate> = slot.excluded_dates.iter().copied().collect();
    let row = sqlx::query_as::<_, DbSlot>(concat!(
        "INSERT INTO teaching_slots (",
        slot_columns!(),
        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) RETURNING ",
        slot_columns!()
    ))
        .bind(id)
        .bind(schedule_id)
        .bind(slot.class_name.clone())
        .bind(slot.start_time.clone())
        .bind(slot.end_time.clone())
        .bind(slot.location.clone())
        .bind(slot.note.clone())
        .bind(slot.salary)
        .bind(columns.is_recurring_nature)
        .bind(slot.display_color())
        .bind(columns.day_of_week)
        .bind(columns.effective_start_date)
        .bind(columns.effective_end_date)
        .bind(columns.specific_date)
        .bind(excluded_dates)
        .bind(slot.created_at.unwrap_or_else(Utc::now))
        .fetch_one(executor)
        .await?;

    Ok(row)
}

pub async fn create_slot(pool: &Pool<Postgres>, schedule_id: Uuid, slot: &Slot) -> Result<Slot> {
    tracing::debug!("Creating slot: schedule_id={}, class={}", schedule_id, slot.class_name);

    let row = insert_slot(pool, schedule_id, slot).await?;

    tracing::debug!("Slot created successfully: id={}", row.id);
    row.into_slot()
}

pub async fn get_slots_by_schedule_id(pool: &Pool<Postgres>, schedule_id: Uuid) -> Result<Vec<Slot>> {
    let rows = sqlx::query_as::<_, DbSlot>(concat!(
        "SELECT ",
        slot_columns!(),
        " FROM teaching_slots WHERE schedule_id = $1 ORDER BY created_at ASC"
    ))
        .bind(schedule_id)
        .fetch_all(pool)
        .await?;

    tracing::debug!("Loaded {} slots for schedule {}", rows.len(), schedule_id);
    into_slots(rows)
}

pub async fn get_slot_by_id(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
    slot_id: Uuid,
) -> Result<Option<Slot>> {
    let row = sqlx::query_as::<_, DbSlot>(concat!(
        "SELECT ",
        slot_columns!(),
        " FROM teaching_slots WHERE id = $1 AND schedule_id = $2"
    ))
        .bind(slot_id)
        .bind(schedule_id)
        .fetch_optional(pool)
        .await?;

    row.map(DbSlot::into_slot).transpose()
}

pub async fn update_slot(pool: &Pool<Postgres>, schedule_id: Uuid, slot: &Slot) -> Result<Slot> {
    let slot_id = slot.id.ok_or_else(|| eyre!("Cannot update a slot without an id"))?;
    let columns = RecurrenceColumns::from(&slot.recurrence);
    let excluded_dates: Vec<NaiveDate> = slot.excluded_dates.iter().copied().collect();

    tracing::debug!("Updating slot: id={}, schedule_id={}", slot_id, schedule_id);

    let row = sqlx::query_as::<_, DbSlot>(concat!(
        "UPDATE teaching_slots \
         SET class_name = $3, start_time = $4, end_time = $5, location = $6, note = $7, \
         salary = $8, is_recurring_nature = $9, color = $10, day_of_week = $11, \
         effective_start_date = $12, effective_end_date = $13, specific_date = $14, \
         excluded_dates = $15 \
         WHERE id = $1 AND schedule_id = $2 RETURNING ",
        slot_columns!()
    ))
        .bind(slot_id)
        .bind(schedule_id)
        .bind(slot.class_name.clone())
        .bind(slot.start_time.clone())
        .bind(slot.end_time.clone())
        .bind(slot.location.clone())
        .bind(slot.note.clone())
        .bind(slot.salary)
        .bind(columns.is_recurring_nature)
        .bind(slot.display_color())
        .bind(columns.day_of_week)
        .bind(columns.effective_start_date)
        .bind(columns.effective_end_date)
        .bind(columns.specific_date)
        .bind(excluded_dates)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| eyre!("Slot not found"))?;

    row.into_slot()
}

pub async fn delete_slot(pool: &Pool<Postgres>, schedule_id: Uuid, slot_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM teaching_slots
        WHERE id = $1 AND schedule_id = $2
        "#,
    )
    .bind(slot_id)
    .bind(schedule_id)
    .execute(pool)
    .await?;

    tracing::debug!(
        "Deleted slot: id={}, schedule_id={}, rows={}",
        slot_id,
        schedule_id,
        result.rows_affected()
    );
    Ok(result.rows_affected() > 0)
}

pub async fn replace_all_slots(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
    slots: &[Slot],
) -> Result<Vec<Slot>> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM teaching_slots
        WHERE schedule_id = $1
        "#,
    )
    .bind(schedule_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let mut rows = Vec::with_capacity(slots.len());
    for slot in slots {
        rows.push(insert_slot(&mut *tx, schedule_id, slot).await?);
    }

    tx.commit().await?;

    tracing::debug!(
        "Replaced slots for schedule {}: removed={}, inserted={}",
        schedule_id,
        removed,
        rows.len()
    );
    into_slots(rows)
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn create_slot(&self, schedule_id: Uuid, slot: Slot) -> Result<Slot> {
        create_slot(&self.pool, schedule_id, &slot).await
    }

    async fn get_slots_by_schedule_id(&self, schedule_id: Uuid) -> Result<Vec<Slot>> {
        get_slots_by_schedule_id(&self.pool, schedule_id).await
    }

    async fn get_slot_by_id(&self, schedule_id: Uuid, slot_id: Uuid) -> Result<Option<Slot>> {
        get_slot_by_id(&self.pool, schedule_id, slot_id).await
    }

    async fn update_slot(&self, schedule_id: Uuid, slot: Slot) -> Result<Slot> {
        update_slot(&self.pool, schedule_id, &slot).await
    }

    async fn delete_slot(&self, schedule_id: Uuid, slot_id: Uuid) -> Result<bool> {
        delete_slot(&self.pool, schedule_id, slot_id).await
    }

    async fn replace_all_slots(&self, schedule_id: Uuid, slots: Vec<Slot>) -> Result<Vec<Slot>> {
        replace_all_slots(&self.pool, schedule_id, &slots).await
    }
}
