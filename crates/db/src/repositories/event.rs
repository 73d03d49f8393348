use crate::models::DbEvent;
use calhub_core::models::{ListFilter, event::NewEvent};
use chrono::Utc;
use eyre::{Result, WrapErr};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_event(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    event: &NewEvent,
) -> Result<DbEvent> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating event: id={}, user_id={}, start={}, end={}",
        id,
        user_id,
        event.start_date,
        event.end_date
    );

    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        INSERT INTO events (id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.start_date)
    .bind(event.end_date)
    .bind(&event.location)
    .bind(&event.source)
    .bind(event.source_id.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await
    .wrap_err("Failed to create event")?;

    Ok(row)
}

/// Inserts a provider event or refreshes the row previously synced under the
/// same `(user_id, source, source_id)`.
pub async fn upsert_synced_event(
    conn: &mut PgConnection,
    user_id: Uuid,
    event: &NewEvent,
) -> Result<DbEvent> {
    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        INSERT INTO events (id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        ON CONFLICT (user_id, source, source_id) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            start_date = EXCLUDED.start_date,
            end_date = EXCLUDED.end_date,
            location = EXCLUDED.location,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.start_date)
    .bind(event.end_date)
    .bind(&event.location)
    .bind(&event.source)
    .bind(event.source_id.as_deref())
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .wrap_err("Failed to upsert synced event")?;

    Ok(row)
}

pub async fn get_event(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<Option<DbEvent>> {
    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        FROM events
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .wrap_err("Failed to load event")?;

    Ok(row)
}

/// Loads the row and holds a row lock until the surrounding transaction ends.
pub async fn lock_event(
    conn: &mut PgConnection,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<DbEvent>> {
    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        FROM events
        WHERE id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to lock event")?;

    Ok(row)
}

/// `from` bounds `start_date` and `to` bounds `end_date`.
pub async fn list_events(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    filter: &ListFilter,
) -> Result<Vec<DbEvent>> {
    tracing::debug!("Listing events: user_id={}, filter={:?}", user_id, filter);

    let rows = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        FROM events
        WHERE user_id = $1
          AND ($2::timestamptz IS NULL OR start_date >= $2)
          AND ($3::timestamptz IS NULL OR end_date <= $3)
          AND ($4::text IS NULL OR source = $4)
        ORDER BY start_date ASC
        "#,
    )
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.source.as_deref())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to list events")?;

    Ok(rows)
}

pub async fn update_event(conn: &mut PgConnection, event: &DbEvent) -> Result<Option<DbEvent>> {
    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        UPDATE events
        SET title = $3, description = $4, start_date = $5, end_date = $6, location = $7, updated_at = $8
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, description, start_date, end_date, location, source, source_id, created_at, updated_at
        "#,
    )
    .bind(event.id)
    .bind(event.user_id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.start_date)
    .bind(event.end_date)
    .bind(&event.location)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to update event")?;

    Ok(row)
}

pub async fn delete_event(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .wrap_err("Failed to delete event")?;

    Ok(result.rows_affected() > 0)
}
