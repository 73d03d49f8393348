//! # Availability Engine
//!
//! Computes the bookable slots a weekly schedule offers on a given date.
//!
//! ## Algorithm
//!
//! 1. Reject a non-positive slot duration as [`SlotError::InvalidSchedule`].
//! 2. A date before `start_date` or after `end_date` yields
//!    [`SlotOutcome::OutOfRange`]. Both bounds are inclusive.
//! 3. A date whose ISO weekday (Monday first) is not flagged in
//!    `working_days` yields [`SlotOutcome::NotWorkingDay`].
//! 4. Otherwise the window `[start_time, end_time]` is cut into consecutive
//!    slots of `slot_duration` minutes starting at `start_time`. A trailing
//!    remainder shorter than one slot is dropped, never truncated, and a slot
//!    that would run past midnight ends the partition.
//!
//! The computation is pure: no I/O and no shared state, so any number of
//! request handlers may call it concurrently.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::{schedule::ScheduleRule, time_slot::Slot};

pub const OUT_OF_RANGE_MESSAGE: &str = "Date is outside of scheduled range";
pub const NOT_WORKING_DAY_MESSAGE: &str = "Not a working day";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Result of a successful slot query. The two empty variants are valid,
/// reportable outcomes rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Slots(Vec<Slot>),
    OutOfRange,
    NotWorkingDay,
}

impl SlotOutcome {
    pub fn slots(&self) -> &[Slot] {
        match self {
            Self::Slots(slots) => slots,
            Self::OutOfRange | Self::NotWorkingDay => &[],
        }
    }

    pub fn into_slots(self) -> Vec<Slot> {
        match self {
            Self::Slots(slots) => slots,
            Self::OutOfRange | Self::NotWorkingDay => Vec::new(),
        }
    }

    /// Explanation attached to an empty-for-reason outcome.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Slots(_) => None,
            Self::OutOfRange => Some(OUT_OF_RANGE_MESSAGE),
            Self::NotWorkingDay => Some(NOT_WORKING_DAY_MESSAGE),
        }
    }
}

/// Computes the slots `schedule` offers on `date`.
///
/// # Errors
///
/// Returns [`SlotError::InvalidSchedule`] when `slot_duration` is zero or
/// negative. Degenerate windows (`start_time >= end_time`, or a duration
/// longer than the window) are not errors; they produce no slots.
///
/// # Example
///
/// ```
/// use calhub_core::availability::{SlotOutcome, compute_slots};
/// use calhub_core::models::schedule::{ScheduleRule, WorkingDays};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let rule = ScheduleRule {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     working_days: WorkingDays::default(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///     slot_duration: 45,
/// };
///
/// // Monday: one 45 minute slot, the trailing 15 minutes are dropped.
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// let outcome = compute_slots(&rule, monday).unwrap();
/// assert_eq!(outcome.slots().len(), 1);
///
/// // Saturday is not in the default working week.
/// let saturday = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
/// assert_eq!(compute_slots(&rule, saturday).unwrap(), SlotOutcome::NotWorkingDay);
/// ```
pub fn compute_slots(schedule: &ScheduleRule, date: NaiveDate) -> Result<SlotOutcome, SlotError> {
    let step = slot_step(schedule.slot_duration)?;

    if date < schedule.start_date || date > schedule.end_date {
        return Ok(SlotOutcome::OutOfRange);
    }

    if !schedule.working_days.is_working(date.weekday()) {
        return Ok(SlotOutcome::NotWorkingDay);
    }

    Ok(SlotOutcome::Slots(partition(
        schedule.start_time,
        schedule.end_time,
        step,
    )))
}

fn slot_step(minutes: i32) -> Result<Duration, SlotError> {
    if minutes <= 0 {
        return Err(SlotError::InvalidSchedule(format!(
            "slot_duration must be a positive number of minutes, got {minutes}"
        )));
    }
    Ok(Duration::minutes(i64::from(minutes)))
}

fn partition(start: NaiveTime, end: NaiveTime, step: Duration) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let (slot_end, wrapped) = cursor.overflowing_add_signed(step);
        // Crossing midnight leaves the single-day window.
        if wrapped != 0 || slot_end > end {
            break;
        }
        slots.push(Slot {
            start: cursor,
            end: slot_end,
        });
        cursor = slot_end;
    }

    slots
}
