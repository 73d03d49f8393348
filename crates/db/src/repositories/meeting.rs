use crate::models::DbMeeting;
use calhub_core::models::{ListFilter, meeting::NewMeeting};
use chrono::Utc;
use eyre::{Result, WrapErr};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_meeting(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    meeting: &NewMeeting,
) -> Result<DbMeeting> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating meeting: id={}, user_id={}, platform={}, date={}",
        id,
        user_id,
        meeting.platform,
        meeting.date
    );

    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        INSERT INTO meetings (id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&meeting.title)
    .bind(&meeting.description)
    .bind(meeting.date)
    .bind(meeting.duration)
    .bind(&meeting.platform)
    .bind(&meeting.meeting_link)
    .bind(&meeting.participants)
    .bind(&meeting.source)
    .bind(meeting.source_id.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await
    .wrap_err("Failed to create meeting")?;

    Ok(row)
}

/// Inserts a provider meeting or refreshes the row previously synced under
/// the same `(user_id, source, source_id)`. The platform of an existing row
/// is kept as it was first inferred.
pub async fn upsert_synced_meeting(
    conn: &mut PgConnection,
    user_id: Uuid,
    meeting: &NewMeeting,
) -> Result<DbMeeting> {
    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        INSERT INTO meetings (id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        ON CONFLICT (user_id, source, source_id) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            date = EXCLUDED.date,
            duration = EXCLUDED.duration,
            meeting_link = EXCLUDED.meeting_link,
            participants = EXCLUDED.participants,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&meeting.title)
    .bind(&meeting.description)
    .bind(meeting.date)
    .bind(meeting.duration)
    .bind(&meeting.platform)
    .bind(&meeting.meeting_link)
    .bind(&meeting.participants)
    .bind(&meeting.source)
    .bind(meeting.source_id.as_deref())
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .wrap_err("Failed to upsert synced meeting")?;

    Ok(row)
}

pub async fn get_meeting(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<DbMeeting>> {
    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        SELECT id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        FROM meetings
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .wrap_err("Failed to load meeting")?;

    Ok(row)
}

/// Loads the row and holds a row lock until the surrounding transaction ends.
pub async fn lock_meeting(
    conn: &mut PgConnection,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<DbMeeting>> {
    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        SELECT id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        FROM meetings
        WHERE id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to lock meeting")?;

    Ok(row)
}

pub async fn list_meetings(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    filter: &ListFilter,
) -> Result<Vec<DbMeeting>> {
    tracing::debug!("Listing meetings: user_id={}, filter={:?}", user_id, filter);

    let rows = sqlx::query_as::<_, DbMeeting>(
        r#"
        SELECT id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        FROM meetings
        WHERE user_id = $1
          AND ($2::timestamptz IS NULL OR date >= $2)
          AND ($3::timestamptz IS NULL OR date <= $3)
          AND ($4::text IS NULL OR source = $4)
          AND ($5::text IS NULL OR platform = $5)
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.source.as_deref())
    .bind(filter.platform.as_deref())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to list meetings")?;

    Ok(rows)
}

pub async fn update_meeting(
    conn: &mut PgConnection,
    meeting: &DbMeeting,
) -> Result<Option<DbMeeting>> {
    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        UPDATE meetings
        SET title = $3, description = $4, date = $5, duration = $6, platform = $7,
            meeting_link = $8, participants = $9, updated_at = $10
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, description, date, duration, platform, meeting_link, participants, source, source_id, created_at, updated_at
        "#,
    )
    .bind(meeting.id)
    .bind(meeting.user_id)
    .bind(&meeting.title)
    .bind(&meeting.description)
    .bind(meeting.date)
    .bind(meeting.duration)
    .bind(&meeting.platform)
    .bind(&meeting.meeting_link)
    .bind(&meeting.participants)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to update meeting")?;

    Ok(row)
}

pub async fn delete_meeting(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .wrap_err("Failed to delete meeting")?;

    Ok(result.rows_affected() > 0)
}
