use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{local_source, required};
use crate::{
    errors::{CalError, CalResult},
    parse::parse_datetime,
};

/// Platform name stored for meetings whose link is not from Zoom or Teams.
pub const OTHER_PLATFORM: &str = "other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
    pub platform: String,
    pub meeting_link: String,
    /// Comma-separated email addresses.
    pub participants: String,
    pub source: String,
    pub source_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub duration: i32,
    pub platform: String,
    pub meeting_link: String,
    pub participants: String,
    pub source: String,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub participants: Option<String>,
    pub source: Option<String>,
}

impl CreateMeetingRequest {
    /// Validates the request. The returned meeting has an empty link; the
    /// caller fills it in from the conferencing platform.
    pub fn into_new_meeting(self) -> CalResult<NewMeeting> {
        let (Some(title), Some(date), Some(duration), Some(platform)) = (
            required(self.title),
            required(self.date),
            self.duration.filter(|d| *d > 0),
            required(self.platform),
        ) else {
            return Err(CalError::Validation(
                "Title, date, duration, and platform are required".to_string(),
            ));
        };

        Ok(NewMeeting {
            title,
            description: self.description.unwrap_or_default(),
            date: parse_datetime("date", &date)?,
            duration,
            platform,
            meeting_link: String::new(),
            participants: self.participants.unwrap_or_default(),
            source: self.source.unwrap_or_else(local_source),
            source_id: None,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub participants: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub meeting_link: Option<String>,
    pub participants: Option<String>,
}

impl UpdateMeetingRequest {
    pub fn into_patch(self) -> CalResult<MeetingPatch> {
        if let Some(duration) = self.duration {
            if duration <= 0 {
                return Err(CalError::Validation(format!(
                    "duration must be a positive number of minutes, got {duration}"
                )));
            }
        }

        Ok(MeetingPatch {
            title: self.title,
            description: self.description,
            date: self
                .date
                .as_deref()
                .map(|d| parse_datetime("date", d))
                .transpose()?,
            duration: self.duration,
            platform: self.platform,
            meeting_link: None,
            participants: self.participants,
        })
    }
}

impl MeetingPatch {
    pub fn apply(self, meeting: &mut Meeting) {
        if let Some(title) = self.title {
            meeting.title = title;
        }
        if let Some(description) = self.description {
            meeting.description = description;
        }
        if let Some(date) = self.date {
            meeting.date = date;
        }
        if let Some(duration) = self.duration {
            meeting.duration = duration;
        }
        if let Some(platform) = self.platform {
            meeting.platform = platform;
        }
        if let Some(meeting_link) = self.meeting_link {
            meeting.meeting_link = meeting_link;
        }
        if let Some(participants) = self.participants {
            meeting.participants = participants;
        }
    }
}

/// Conferencing platforms that can issue meeting links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConferencingPlatform {
    Zoom,
    Teams,
}

impl ConferencingPlatform {
    /// Case-insensitive lookup; `None` for platforms without link support.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "zoom" => Some(Self::Zoom),
            "teams" => Some(Self::Teams),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Teams => "teams",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Zoom => "Zoom",
            Self::Teams => "Microsoft Teams",
        }
    }
}

impl fmt::Display for ConferencingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a conferencing platform needs to schedule a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingLinkRequest {
    pub title: String,
    pub start: DateTime<Utc>,
    pub duration: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingLink {
    pub meeting_link: String,
    pub meeting_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateMeetingRequest {
    pub platform: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub description: Option<String>,
}

impl GenerateMeetingRequest {
    pub fn into_parts(self) -> CalResult<(ConferencingPlatform, MeetingLinkRequest)> {
        let (Some(platform), Some(title), Some(date), Some(duration)) = (
            required(self.platform),
            required(self.title),
            required(self.date),
            self.duration.filter(|d| *d > 0),
        ) else {
            return Err(CalError::Validation(
                "Platform, title, date, and duration are required".to_string(),
            ));
        };

        let platform = ConferencingPlatform::from_name(&platform).ok_or_else(|| {
            CalError::Validation("Unsupported platform. Use 'zoom' or 'teams'".to_string())
        })?;

        Ok((
            platform,
            MeetingLinkRequest {
                title,
                start: parse_datetime("date", &date)?,
                duration,
                description: self.description.unwrap_or_default(),
            },
        ))
    }
}
