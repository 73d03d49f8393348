//! Store traits the HTTP layer depends on, and their Postgres implementation.
//!
//! Every method is scoped to the calling user. The traits are mockable so
//! handlers can be tested without a database.
//!
//! Updates lock the row for the whole read-patch-write, so concurrent patches
//! of the same entry serialize instead of overwriting each other.

use async_trait::async_trait;
use calhub_core::{
    models::{
        ListFilter,
        event::{Event, EventPatch, NewEvent},
        meeting::{Meeting, MeetingPatch, NewMeeting},
        schedule::{ScheduleRule, WeeklySchedule},
        task::{NewTask, Task, TaskPatch},
    },
    sync::SyncRecord,
};
use eyre::{Result, WrapErr};
use mockall::automock;
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbEvent, DbMeeting, DbTask},
    repositories::{event, meeting, schedule, task},
};

/// Result of [`ScheduleStore::save_schedule`].
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSchedule {
    pub schedule: WeeklySchedule,
    /// `true` when no schedule existed before the save.
    pub created: bool,
}

#[automock]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_schedule(&self, user_id: Uuid) -> Result<Option<WeeklySchedule>>;
    async fn save_schedule(&self, user_id: Uuid, rule: ScheduleRule) -> Result<SavedSchedule>;
    async fn delete_schedule(&self, user_id: Uuid) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task>;
    async fn get_task(&self, user_id: Uuid, id: Uuid) -> Result<Option<Task>>;
    async fn list_tasks(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Task>>;
    /// Returns `None` when the task does not exist for this user.
    async fn update_task(&self, user_id: Uuid, id: Uuid, patch: TaskPatch)
    -> Result<Option<Task>>;
    async fn delete_task(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, user_id: Uuid, event: NewEvent) -> Result<Event>;
    async fn get_event(&self, user_id: Uuid, id: Uuid) -> Result<Option<Event>>;
    async fn list_events(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Event>>;
    async fn update_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<Option<Event>>;
    async fn delete_event(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn create_meeting(&self, user_id: Uuid, meeting: NewMeeting) -> Result<Meeting>;
    async fn get_meeting(&self, user_id: Uuid, id: Uuid) -> Result<Option<Meeting>>;
    async fn list_meetings(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Meeting>>;
    async fn update_meeting(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: MeetingPatch,
    ) -> Result<Option<Meeting>>;
    async fn delete_meeting(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// Upserts one provider batch in a single transaction: either every
    /// record is stored or none is. Returns the number of records stored.
    async fn save_synced(&self, user_id: Uuid, records: Vec<SyncRecord>) -> Result<usize>;
}

/// Postgres-backed implementation of every store trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ScheduleStore for PgStore {
    async fn get_schedule(&self, user_id: Uuid) -> Result<Option<WeeklySchedule>> {
        let row = schedule::get_schedule_by_user(&self.pool, user_id).await?;
        Ok(row.map(Into::into))
    }

    async fn save_schedule(&self, user_id: Uuid, rule: ScheduleRule) -> Result<SavedSchedule> {
        let (row, created) = schedule::save_schedule(&self.pool, user_id, &rule).await?;
        Ok(SavedSchedule {
            schedule: row.into(),
            created,
        })
    }

    async fn delete_schedule(&self, user_id: Uuid) -> Result<bool> {
        schedule::delete_schedule_by_user(&self.pool, user_id).await
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, user_id: Uuid, new_task: NewTask) -> Result<Task> {
        let row = task::create_task(&self.pool, user_id, &new_task).await?;
        Ok(row.into())
    }

    async fn get_task(&self, user_id: Uuid, id: Uuid) -> Result<Option<Task>> {
        let row = task::get_task(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_tasks(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Task>> {
        let rows = task::list_tasks(&self.pool, user_id, &filter).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>> {
        let mut tx = self.pool.begin().await.wrap_err("Failed to begin task update")?;
        let Some(row) = task::lock_task(&mut *tx, user_id, id).await? else {
            return Ok(None);
        };

        let mut current = Task::from(row);
        patch.apply(&mut current);

        let row = task::update_task(&mut *tx, &DbTask::from(current)).await?;
        tx.commit().await.wrap_err("Failed to commit task update")?;
        Ok(row.map(Into::into))
    }

    async fn delete_task(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        task::delete_task(&self.pool, user_id, id).await
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn create_event(&self, user_id: Uuid, new_event: NewEvent) -> Result<Event> {
        let row = event::create_event(&self.pool, user_id, &new_event).await?;
        Ok(row.into())
    }

    async fn get_event(&self, user_id: Uuid, id: Uuid) -> Result<Option<Event>> {
        let row = event::get_event(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_events(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Event>> {
        let rows = event::list_events(&self.pool, user_id, &filter).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<Option<Event>> {
        let mut tx = self.pool.begin().await.wrap_err("Failed to begin event update")?;
        let Some(row) = event::lock_event(&mut *tx, user_id, id).await? else {
            return Ok(None);
        };

        let mut current = Event::from(row);
        patch.apply(&mut current);

        let row = event::update_event(&mut *tx, &DbEvent::from(current)).await?;
        tx.commit().await.wrap_err("Failed to commit event update")?;
        Ok(row.map(Into::into))
    }

    async fn delete_event(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        event::delete_event(&self.pool, user_id, id).await
    }
}

#[async_trait]
impl MeetingStore for PgStore {
    async fn create_meeting(&self, user_id: Uuid, new_meeting: NewMeeting) -> Result<Meeting> {
        let row = meeting::create_meeting(&self.pool, user_id, &new_meeting).await?;
        Ok(row.into())
    }

    async fn get_meeting(&self, user_id: Uuid, id: Uuid) -> Result<Option<Meeting>> {
        let row = meeting::get_meeting(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_meetings(&self, user_id: Uuid, filter: ListFilter) -> Result<Vec<Meeting>> {
        let rows = meeting::list_meetings(&self.pool, user_id, &filter).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_meeting(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: MeetingPatch,
    ) -> Result<Option<Meeting>> {
        let mut tx = self.pool.begin().await.wrap_err("Failed to begin meeting update")?;
        let Some(row) = meeting::lock_meeting(&mut *tx, user_id, id).await? else {
            return Ok(None);
        };

        let mut current = Meeting::from(row);
        patch.apply(&mut current);

        let row = meeting::update_meeting(&mut *tx, &DbMeeting::from(current)).await?;
        tx.commit().await.wrap_err("Failed to commit meeting update")?;
        Ok(row.map(Into::into))
    }

    async fn delete_meeting(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        meeting::delete_meeting(&self.pool, user_id, id).await
    }
}

#[async_trait]
impl SyncStore for PgStore {
    async fn save_synced(&self, user_id: Uuid, records: Vec<SyncRecord>) -> Result<usize> {
        let mut tx = self.pool.begin().await.wrap_err("Failed to begin sync")?;

        for record in &records {
            match record {
                SyncRecord::Meeting(new_meeting) => {
                    meeting::upsert_synced_meeting(&mut *tx, user_id, new_meeting).await?;
                }
                SyncRecord::Event(new_event) => {
                    event::upsert_synced_event(&mut *tx, user_id, new_event).await?;
                }
            }
        }

        tx.commit().await.wrap_err("Failed to commit sync")?;
        tracing::debug!("Synced {} records for user {}", records.len(), user_id);
        Ok(records.len())
    }
}
