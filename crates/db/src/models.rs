use calhub_core::models::{
    event::Event,
    meeting::Meeting,
    schedule::{ScheduleRule, WeeklySchedule, WorkingDays},
    task::Task,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSchedule> for WeeklySchedule {
    fn from(row: DbSchedule) -> Self {
        WeeklySchedule {
            id: row.id,
            user_id: row.user_id,
            rule: ScheduleRule {
                start_date: row.start_date,
                end_date: row.end_date,
                working_days: WorkingDays::from_flags([
                    row.monday,
                    row.tuesday,
                    row.wednesday,
                    row.thursday,
                    row.friday,
                    row.saturday,
                    row.sunday,
                ]),
                start_time: row.start_time,
                end_time: row.end_time,
                slot_duration: row.slot_duration,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTask {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub assigned_to: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbTask> for Task {
    fn from(row: DbTask) -> Self {
        Task {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            date: row.date,
            completed: row.completed,
            assigned_to: row.assigned_to,
            source: row.source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Task> for DbTask {
    fn from(task: Task) -> Self {
        DbTask {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            date: task.date,
            completed: task.completed,
            assigned_to: task.assigned_to,
            source: task.source,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub source: String,
    pub source_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbEvent> for Event {
    fn from(row: DbEvent) -> Self {
        Event {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            location: row.location,
            source: row.source,
            source_id: row.source_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Event> for DbEvent {
    fn from(event: Event) -> Self {
        DbEvent {
            id: event.id,
            user_id: event.user_id,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location,
            source: event.source,
            source_id: event.source_id,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMeeting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub duration: i32,
    pub platform: String,
    pub meeting_link: String,
    pub participants: String,
    pub source: String,
    pub source_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbMeeting> for Meeting {
    fn from(row: DbMeeting) -> Self {
        Meeting {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            date: row.date,
            duration: row.duration,
            platform: row.platform,
            meeting_link: row.meeting_link,
            participants: row.participants,
            source: row.source,
            source_id: row.source_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Meeting> for DbMeeting {
    fn from(meeting: Meeting) -> Self {
        DbMeeting {
            id: meeting.id,
            user_id: meeting.user_id,
            title: meeting.title,
            description: meeting.description,
            date: meeting.date,
            duration: meeting.duration,
            platform: meeting.platform,
            meeting_link: meeting.meeting_link,
            participants: meeting.participants,
            source: meeting.source,
            source_id: meeting.source_id,
            created_at: meeting.created_at,
            updated_at: meeting.updated_at,
        }
    }
}
