use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Weekly rows carry day_of_week and the optional effective window;
    // one-time rows carry specific_date only.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teaching_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            schedule_id UUID NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            class_name VARCHAR(255) NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            location VARCHAR(255) NULL,
            note TEXT NULL,
            salary DOUBLE PRECISION NOT NULL DEFAULT 0,
            is_recurring_nature BOOLEAN NOT NULL,
            color VARCHAR(64) NULL,
            day_of_week SMALLINT NULL,
            effective_start_date DATE NULL,
            effective_end_date DATE NULL,
            specific_date DATE NULL,
            excluded_dates DATE[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week IS NULL OR day_of_week BETWEEN 1 AND 7),
            CONSTRAINT valid_salary CHECK (salary >= 0),
            CONSTRAINT recurrence_shape CHECK (
                (is_recurring_nature AND day_of_week IS NOT NULL AND specific_date IS NULL)
                OR (NOT is_recurring_nature AND specific_date IS NOT NULL)
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_teaching_slots_schedule_id ON teaching_slots(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_teaching_slots_specific_date ON teaching_slots(specific_date);
        CREATE INDEX IF NOT EXISTS idx_teaching_slots_created_at ON teaching_slots(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
