use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{local_source, required};
use crate::{
    errors::{CalError, CalResult},
    parse::parse_datetime,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub assigned_to: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub completed: Option<bool>,
    #[serde(alias = "assignedTo")]
    pub assigned_to: Option<String>,
    pub source: Option<String>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> CalResult<NewTask> {
        let (Some(title), Some(date)) = (required(self.title), required(self.date)) else {
            return Err(CalError::Validation("Title and date are required".to_string()));
        };

        Ok(NewTask {
            title,
            description: self.description.unwrap_or_default(),
            date: parse_datetime("date", &date)?,
            completed: self.completed.unwrap_or(false),
            assigned_to: self.assigned_to.unwrap_or_default(),
            source: self.source.unwrap_or_else(local_source),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub completed: Option<bool>,
    #[serde(alias = "assignedTo")]
    pub assigned_to: Option<String>,
}

/// Fields to overwrite on an existing task; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub assigned_to: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> CalResult<TaskPatch> {
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            date: self
                .date
                .as_deref()
                .map(|d| parse_datetime("date", d))
                .transpose()?,
            completed: self.completed,
            assigned_to: self.assigned_to,
        })
    }
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(date) = self.date {
            task.date = date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
    }
}
