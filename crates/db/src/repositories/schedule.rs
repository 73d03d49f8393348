use crate::models::DbSchedule;
use calhub_core::models::schedule::ScheduleRule;
use chrono::Utc;
use eyre::{Result, WrapErr};
use sqlx::{FromRow, Pool, Postgres, Row};
use uuid::Uuid;

pub async fn get_schedule_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule for user: {}", user_id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, user_id, start_date, end_date,
               monday, tuesday, wednesday, thursday, friday, saturday, sunday,
               start_time, end_time, slot_duration, created_at, updated_at
        FROM schedules
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .wrap_err("Failed to load schedule")?;

    Ok(schedule)
}

/// Creates the user's schedule or replaces every field of the existing one.
/// The returned flag is `true` when a new row was inserted.
pub async fn save_schedule(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    rule: &ScheduleRule,
) -> Result<(DbSchedule, bool)> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let days = rule.working_days;

    tracing::debug!(
        "Saving schedule: user_id={}, range={}..={}, window={}-{}, slot_duration={}",
        user_id,
        rule.start_date,
        rule.end_date,
        rule.start_time,
        rule.end_time,
        rule.slot_duration
    );

    // xmax is zero only for rows created by this statement
    let row = sqlx::query(
        r#"
        INSERT INTO schedules (
            id, user_id, start_date, end_date,
            monday, tuesday, wednesday, thursday, friday, saturday, sunday,
            start_time, end_time, slot_duration, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        ON CONFLICT (user_id) DO UPDATE SET
            start_date = EXCLUDED.start_date,
            end_date = EXCLUDED.end_date,
            monday = EXCLUDED.monday,
            tuesday = EXCLUDED.tuesday,
            wednesday = EXCLUDED.wednesday,
            thursday = EXCLUDED.thursday,
            friday = EXCLUDED.friday,
            saturday = EXCLUDED.saturday,
            sunday = EXCLUDED.sunday,
            start_time = EXCLUDED.start_time,
            end_time = EXCLUDED.end_time,
            slot_duration = EXCLUDED.slot_duration,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, start_date, end_date,
                  monday, tuesday, wednesday, thursday, friday, saturday, sunday,
                  start_time, end_time, slot_duration, created_at, updated_at,
                  (xmax = 0) AS inserted
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(rule.start_date)
    .bind(rule.end_date)
    .bind(days.monday)
    .bind(days.tuesday)
    .bind(days.wednesday)
    .bind(days.thursday)
    .bind(days.friday)
    .bind(days.saturday)
    .bind(days.sunday)
    .bind(rule.start_time)
    .bind(rule.end_time)
    .bind(rule.slot_duration)
    .bind(now)
    .fetch_one(pool)
    .await
    .wrap_err("Failed to save schedule")?;

    let schedule = DbSchedule::from_row(&row)?;
    let inserted: bool = row.try_get("inserted")?;

    tracing::debug!(
        "Schedule saved: id={}, inserted={}",
        schedule.id,
        inserted
    );
    Ok((schedule, inserted))
}

pub async fn delete_schedule_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedules
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await
    .wrap_err("Failed to delete schedule")?;

    Ok(result.rows_affected() > 0)
}
