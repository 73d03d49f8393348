use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::required;
use crate::{
    errors::{CalError, CalResult},
    parse::{parse_date, parse_time},
};

pub const DEFAULT_SLOT_DURATION: i32 = 30;

/// Active weekdays of a recurring schedule. Missing flags default to a
/// Monday-to-Friday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
        }
    }
}

impl WorkingDays {
    pub const fn all() -> Self {
        Self::from_flags([true; 7])
    }

    /// Builds the set from flags indexed by ISO weekday, Monday first.
    pub const fn from_flags(flags: [bool; 7]) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = flags;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }

    pub const fn flags(&self) -> [bool; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }

    pub fn is_working(&self, weekday: Weekday) -> bool {
        self.flags()[weekday.num_days_from_monday() as usize]
    }
}

/// The recurring weekly pattern consumed by the availability engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub working_days: WorkingDays,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration: i32,
}

/// A user's stored schedule. At most one exists per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub rule: ScheduleRule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub working_days: WorkingDays,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub slot_duration: Option<i32>,
}

impl CreateScheduleRequest {
    /// Validates the request into a rule. Omitted working days and slot
    /// duration fall back to their defaults.
    pub fn into_rule(self) -> CalResult<ScheduleRule> {
        let (Some(start_date), Some(end_date), Some(start_time), Some(end_time)) = (
            required(self.start_date),
            required(self.end_date),
            required(self.start_time),
            required(self.end_time),
        ) else {
            return Err(CalError::Validation(
                "Start date, end date, start time, and end time are required".to_string(),
            ));
        };

        let slot_duration = self.slot_duration.unwrap_or(DEFAULT_SLOT_DURATION);
        if slot_duration <= 0 {
            return Err(CalError::Validation(format!(
                "slot_duration must be a positive number of minutes, got {slot_duration}"
            )));
        }

        Ok(ScheduleRule {
            start_date: parse_date("start_date", &start_date)?,
            end_date: parse_date("end_date", &end_date)?,
            working_days: self.working_days,
            start_time: parse_time("start_time", &start_time)?,
            end_time: parse_time("end_time", &end_time)?,
            slot_duration,
        })
    }
}
