use crate::models::DbSchedule;
use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::models::schedule::Schedule;
use uuid::Uuid;

use super::ScheduleRepository;

pub struct PgScheduleRepository {
    pool: Pool<Postgres>,
}

impl PgScheduleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub async fn create_schedule(pool: &Pool<Postgres>, name: &str) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating schedule: id={}, name={}", id, name);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Schedule created successfully: id={}", id);
    Ok(schedule)
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, name, created_at
        FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(s) = &schedule {
        tracing::debug!("Schedule found: id={}, name={}", s.id, s.name);
    } else {
        tracing::debug!("Schedule not found: id={}", id);
    }

    Ok(schedule)
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    async fn create_schedule(&self, name: String) -> Result<Schedule> {
        Ok(create_schedule(&self.pool, &name).await?.into())
    }

    async fn get_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>> {
        Ok(get_schedule_by_id(&self.pool, id).await?.map(Schedule::from))
    }
}
