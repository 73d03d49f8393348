use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::CalResult, parse::parse_datetime};

pub mod event;
pub mod meeting;
pub mod schedule;
pub mod task;
pub mod time_slot;

/// Source tag for records created through the API rather than a provider sync.
pub const LOCAL_SOURCE: &str = "local";

/// Query-string filters accepted by the list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub source: Option<String>,
    pub platform: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> CalResult<ListFilter> {
        Ok(ListFilter {
            from: self
                .start_date
                .as_deref()
                .map(|v| parse_datetime("start_date", v))
                .transpose()?,
            to: self
                .end_date
                .as_deref()
                .map(|v| parse_datetime("end_date", v))
                .transpose()?,
            source: self.source.filter(|s| !s.is_empty()),
            platform: self.platform.filter(|p| !p.is_empty()),
        })
    }
}

/// Parsed list filters. Each resource decides which of its columns the
/// bounds apply to; `platform` only narrows meetings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn local_source() -> String {
    LOCAL_SOURCE.to_string()
}

pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
