use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{local_source, required};
use crate::{
    errors::{CalError, CalResult},
    parse::parse_datetime,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub source: String,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
}

impl CreateEventRequest {
    pub fn into_new_event(self) -> CalResult<NewEvent> {
        let (Some(title), Some(start_date), Some(end_date)) = (
            required(self.title),
            required(self.start_date),
            required(self.end_date),
        ) else {
            return Err(CalError::Validation(
                "Title, start date, and end date are required".to_string(),
            ));
        };

        Ok(NewEvent {
            title,
            description: self.description.unwrap_or_default(),
            start_date: parse_datetime("start_date", &start_date)?,
            end_date: parse_datetime("end_date", &end_date)?,
            location: self.location.unwrap_or_default(),
            source: self.source.unwrap_or_else(local_source),
            source_id: None,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

impl UpdateEventRequest {
    pub fn into_patch(self) -> CalResult<EventPatch> {
        Ok(EventPatch {
            title: self.title,
            description: self.description,
            start_date: self
                .start_date
                .as_deref()
                .map(|d| parse_datetime("start_date", d))
                .transpose()?,
            end_date: self
                .end_date
                .as_deref()
                .map(|d| parse_datetime("end_date", d))
                .transpose()?,
            location: self.location,
        })
    }
}

impl EventPatch {
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(start_date) = self.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            event.end_date = end_date;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
    }
}
