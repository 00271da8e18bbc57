//! Audition window slot planning.
//!
//! Pure validation and slot-time generation for audition windows. A window's
//! duration must be evenly divisible by its block length; the resulting plan
//! is the arithmetic sequence of slot start times, ending strictly before the
//! window's end time. Persistence of the plan happens in the window
//! repository as a single unit of work.

use chrono::{NaiveTime, TimeDelta};

use crate::error::{ApiError, field_validation_error};

/// Validated slot plan for one audition window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub block_length_minutes: i32,
    pub slot_times: Vec<NaiveTime>,
}

/// Validate window parameters and compute the slot-time sequence.
///
/// Failures are field-tagged: ordering problems blame `startTime`, block
/// length problems (non-positive or non-dividing) blame `blockLengthMinutes`.
pub fn plan_slots(
    start_time: NaiveTime,
    end_time: NaiveTime,
    block_length_minutes: i32,
) -> Result<SlotPlan, ApiError> {
    if start_time >= end_time {
        return Err(field_validation_error(
            "startTime",
            "startTime must be before endTime",
        ));
    }

    if block_length_minutes <= 0 {
        return Err(field_validation_error(
            "blockLengthMinutes",
            "blockLengthMinutes must be positive",
        ));
    }

    let duration_minutes = (end_time - start_time).num_minutes();
    if duration_minutes % i64::from(block_length_minutes) != 0 {
        return Err(field_validation_error(
            "blockLengthMinutes",
            "blockLengthMinutes must evenly divide the window duration",
        ));
    }

    let slot_count = duration_minutes / i64::from(block_length_minutes);
    let slot_times = (0..slot_count)
        .map(|i| start_time + TimeDelta::minutes(i * i64::from(block_length_minutes)))
        .collect();

    Ok(SlotPlan {
        start_time,
        end_time,
        block_length_minutes,
        slot_times,
    })
}
