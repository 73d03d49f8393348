//! Mapping of provider calendar payloads into local records.
//!
//! Provider clients hand back [`ProviderEvent`]s already normalized to one
//! shape. Each payload becomes a [`SyncRecord`]: a meeting when the provider
//! flagged it as an online meeting, otherwise a plain event. Both carry the
//! provider's id as `source_id` so re-syncing updates rather than duplicates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    event::NewEvent,
    meeting::{NewMeeting, OTHER_PLATFORM},
};

/// Used when a payload carries neither a duration nor a usable end time.
pub const DEFAULT_MEETING_DURATION: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Outlook,
    Gmail,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "outlook" => Some(Self::Outlook),
            "gmail" => Some(Self::Gmail),
            _ => None,
        }
    }

    /// Value stored in the `source` column of synced records.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Outlook => "outlook",
            Self::Gmail => "gmail",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Outlook => "Outlook",
            Self::Gmail => "Gmail",
        }
    }

    /// Platform recorded for a newly synced meeting. Outlook meetings are
    /// assumed to be Teams calls and Gmail meetings Zoom calls, but only
    /// when the link says so.
    pub fn infer_platform(&self, meeting_link: &str) -> &'static str {
        let link = meeting_link.to_ascii_lowercase();
        match self {
            Self::Outlook if link.contains("teams") => "teams",
            Self::Gmail if link.contains("zoom") => "zoom",
            _ => OTHER_PLATFORM,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

/// A calendar entry as delivered by a provider client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    /// Minutes, when the provider reports it.
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub is_meeting: bool,
    #[serde(default)]
    pub meeting_link: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl ProviderEvent {
    pub fn duration_minutes(&self) -> i32 {
        if let Some(duration) = self.duration.filter(|d| *d > 0) {
            return duration;
        }
        let minutes = (self.end_time - self.start_time).num_minutes();
        if minutes > 0 {
            i32::try_from(minutes).unwrap_or(DEFAULT_MEETING_DURATION)
        } else {
            DEFAULT_MEETING_DURATION
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRecord {
    Meeting(NewMeeting),
    Event(NewEvent),
}

pub fn map_provider_event(kind: ProviderKind, event: &ProviderEvent) -> SyncRecord {
    let source = kind.source().to_string();
    let source_id = Some(event.id.clone());

    if event.is_meeting {
        SyncRecord::Meeting(NewMeeting {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.start_time,
            duration: event.duration_minutes(),
            platform: kind.infer_platform(&event.meeting_link).to_string(),
            meeting_link: event.meeting_link.clone(),
            participants: event.attendees.join(","),
            source,
            source_id,
        })
    } else {
        SyncRecord::Event(NewEvent {
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_time,
            end_date: event.end_time,
            location: event.location.clone(),
            source,
            source_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub events_synced: usize,
}
