use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One schedule per user
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL UNIQUE,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            monday BOOLEAN NOT NULL DEFAULT TRUE,
            tuesday BOOLEAN NOT NULL DEFAULT TRUE,
            wednesday BOOLEAN NOT NULL DEFAULT TRUE,
            thursday BOOLEAN NOT NULL DEFAULT TRUE,
            friday BOOLEAN NOT NULL DEFAULT TRUE,
            saturday BOOLEAN NOT NULL DEFAULT FALSE,
            sunday BOOLEAN NOT NULL DEFAULT FALSE,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            slot_duration INTEGER NOT NULL DEFAULT 30,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_slot_duration CHECK (slot_duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TIMESTAMP WITH TIME ZONE NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            assigned_to TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL DEFAULT 'local',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Synced rows are keyed by (user_id, source, source_id); local rows leave
    // source_id NULL and never collide.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            start_date TIMESTAMP WITH TIME ZONE NOT NULL,
            end_date TIMESTAMP WITH TIME ZONE NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL DEFAULT 'local',
            source_id TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT events_source_key UNIQUE (user_id, source, source_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TIMESTAMP WITH TIME ZONE NOT NULL,
            duration INTEGER NOT NULL CHECK (duration > 0),
            platform TEXT NOT NULL,
            meeting_link TEXT NOT NULL DEFAULT '',
            participants TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL DEFAULT 'local',
            source_id TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT meetings_source_key UNIQUE (user_id, source, source_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_tasks_user_date ON tasks(user_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_events_user_start ON events(user_id, start_date)",
        "CREATE INDEX IF NOT EXISTS idx_meetings_user_date ON meetings(user_id, date)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
