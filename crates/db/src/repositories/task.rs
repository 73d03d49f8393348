use crate::models::DbTask;
use calhub_core::models::{ListFilter, task::NewTask};
use chrono::Utc;
use eyre::{Result, WrapErr};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_task(pool: &Pool<Postgres>, user_id: Uuid, task: &NewTask) -> Result<DbTask> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating task: id={}, user_id={}, date={}", id, user_id, task.date);

    let row = sqlx::query_as::<_, DbTask>(
        r#"
        INSERT INTO tasks (id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.date)
    .bind(task.completed)
    .bind(&task.assigned_to)
    .bind(&task.source)
    .bind(now)
    .fetch_one(pool)
    .await
    .wrap_err("Failed to create task")?;

    Ok(row)
}

pub async fn get_task(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<Option<DbTask>> {
    let row = sqlx::query_as::<_, DbTask>(
        r#"
        SELECT id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .wrap_err("Failed to load task")?;

    Ok(row)
}

/// Loads the row and holds a row lock until the surrounding transaction ends.
pub async fn lock_task(conn: &mut PgConnection, user_id: Uuid, id: Uuid) -> Result<Option<DbTask>> {
    let row = sqlx::query_as::<_, DbTask>(
        r#"
        SELECT id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to lock task")?;

    Ok(row)
}

pub async fn list_tasks(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    filter: &ListFilter,
) -> Result<Vec<DbTask>> {
    tracing::debug!("Listing tasks: user_id={}, filter={:?}", user_id, filter);

    let rows = sqlx::query_as::<_, DbTask>(
        r#"
        SELECT id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at
        FROM tasks
        WHERE user_id = $1
          AND ($2::timestamptz IS NULL OR date >= $2)
          AND ($3::timestamptz IS NULL OR date <= $3)
          AND ($4::text IS NULL OR source = $4)
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.source.as_deref())
    .fetch_all(pool)
    .await
    .wrap_err("Failed to list tasks")?;

    Ok(rows)
}

/// Writes every mutable column of `task` back to its row.
pub async fn update_task(conn: &mut PgConnection, task: &DbTask) -> Result<Option<DbTask>> {
    let row = sqlx::query_as::<_, DbTask>(
        r#"
        UPDATE tasks
        SET title = $3, description = $4, date = $5, completed = $6, assigned_to = $7, updated_at = $8
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, description, date, completed, assigned_to, source, created_at, updated_at
        "#,
    )
    .bind(task.id)
    .bind(task.user_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.date)
    .bind(task.completed)
    .bind(&task.assigned_to)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await
    .wrap_err("Failed to update task")?;

    Ok(row)
}

pub async fn delete_task(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .wrap_err("Failed to delete task")?;

    Ok(result.rows_affected() > 0)
}
