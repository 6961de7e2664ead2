//! Pure slot boundary planner.
//!
//! Given a date range, a [`WeekSchedule`], and a slot duration, the planner
//! emits the candidate `[start, end)` boundaries to insert. It is entirely
//! deterministic and storage-free; duplicate detection against existing
//! slots happens at the storage layer.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;
use crate::schedule::{DaySchedule, WeekSchedule};
use crate::types::Timestamp;

/// A candidate slot interval, half-open `[start, end)`, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotBoundary {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Generation-horizon policy, loaded from `tenant_schedule_settings`.
#[derive(Debug, Clone, Copy)]
pub struct HorizonPolicy {
    /// Earliest allowed generation day, in days from today.
    pub min_horizon_days: i32,
    /// Latest allowed generation day, in days from today.
    pub max_horizon_days: i32,
}

/// Validate a generation request against the tenant's horizon window.
///
/// Rejects a non-positive duration, an inverted range, and any range that
/// extends outside `[today + min, today + max]` (inclusive).
pub fn validate_generation_range(
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_minutes: i32,
    policy: HorizonPolicy,
) -> Result<(), CoreError> {
    if duration_minutes <= 0 {
        return Err(CoreError::InvalidRange(format!(
            "slot duration must be positive, got {duration_minutes}"
        )));
    }
    if start_date > end_date {
        return Err(CoreError::InvalidRange(format!(
            "start date {start_date} is after end date {end_date}"
        )));
    }
    let earliest = today + Duration::days(policy.min_horizon_days as i64);
    let latest = today + Duration::days(policy.max_horizon_days as i64);
    if start_date < earliest || end_date > latest {
        return Err(CoreError::InvalidRange(format!(
            "range {start_date}..{end_date} is outside the allowed window {earliest}..{latest}"
        )));
    }
    Ok(())
}

/// Boundaries for a single day's schedule.
///
/// Each working interval is tiled with consecutive non-overlapping slots of
/// `duration_minutes`; a trailing remainder shorter than the duration is
/// dropped.
pub fn plan_day(date: NaiveDate, day: &DaySchedule, duration_minutes: i32) -> Vec<SlotBoundary> {
    let step = Duration::minutes(duration_minutes as i64);
    let mut boundaries = Vec::new();
    for (open, close) in day.working_intervals() {
        let mut cursor = date.and_time(open).and_utc();
        let interval_end = date.and_time(close).and_utc();
        while cursor + step <= interval_end {
            boundaries.push(SlotBoundary {
                start: cursor,
                end: cursor + step,
            });
            cursor += step;
        }
    }
    boundaries
}

/// Boundaries for every day in `[start_date, end_date]`, skipping closed
/// days. Days are independent; the output is ordered by day, then by start.
pub fn plan_range(
    schedule: &WeekSchedule,
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_minutes: i32,
) -> Vec<SlotBoundary> {
    let mut boundaries = Vec::new();
    let mut date = start_date;
    while date <= end_date {
        if let Some(day) = schedule.for_weekday(date.weekday()) {
            boundaries.extend(plan_day(date, day, duration_minutes));
        }
        date += Duration::days(1);
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::BreakWindow;
    use assert_matches::assert_matches;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn day(open: NaiveTime, close: NaiveTime) -> DaySchedule {
        DaySchedule {
            open,
            close,
            breaks: vec![],
        }
    }

    #[test]
    fn two_hour_window_yields_two_hour_slots() {
        // 2026-03-02 is a Monday.
        let boundaries = plan_day(d(2026, 3, 2), &day(t(9, 0), t(11, 0)), 60);
        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].start, d(2026, 3, 2).and_time(t(9, 0)).and_utc());
        assert_eq!(boundaries[0].end, d(2026, 3, 2).and_time(t(10, 0)).and_utc());
        assert_eq!(boundaries[1].start, d(2026, 3, 2).and_time(t(10, 0)).and_utc());
        assert_eq!(boundaries[1].end, d(2026, 3, 2).and_time(t(11, 0)).and_utc());
    }

    #[test]
    fn trailing_partial_slot_is_dropped() {
        // 09:00-10:30 with 60-minute slots: only 09:00-10:00 fits.
        let boundaries = plan_day(d(2026, 3, 2), &day(t(9, 0), t(10, 30)), 60);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].end, d(2026, 3, 2).and_time(t(10, 0)).and_utc());
    }

    #[test]
    fn window_shorter_than_duration_yields_nothing() {
        let boundaries = plan_day(d(2026, 3, 2), &day(t(9, 0), t(9, 30)), 60);
        assert!(boundaries.is_empty());
    }

    #[test]
    fn breaks_interrupt_tiling() {
        let schedule = DaySchedule {
            open: t(9, 0),
            close: t(13, 0),
            breaks: vec![BreakWindow {
                start: t(10, 0),
                end: t(10, 30),
            }],
        };
        // 09:00-10:00 fits before the break; 10:30-11:30, 11:30-12:30 after.
        let boundaries = plan_day(d(2026, 3, 2), &schedule, 60);
        let starts: Vec<_> = boundaries
            .iter()
            .map(|b| b.start.time().format("%H:%M").to_string())
            .collect();
        assert_eq!(starts, vec!["09:00", "10:30", "11:30"]);
    }

    #[test]
    fn range_skips_closed_days() {
        let schedule = WeekSchedule {
            monday: Some(day(t(9, 0), t(11, 0))),
            wednesday: Some(day(t(9, 0), t(10, 0))),
            ..WeekSchedule::default()
        };
        // Mon 2026-03-02 .. Wed 2026-03-04; Tuesday is closed.
        let boundaries = plan_range(&schedule, d(2026, 3, 2), d(2026, 3, 4), 60);
        assert_eq!(boundaries.len(), 3);
        assert!(boundaries.iter().all(|b| b.start.date_naive() != d(2026, 3, 3)));
    }

    #[test]
    fn boundaries_never_overlap() {
        let schedule = WeekSchedule {
            monday: Some(day(t(8, 0), t(18, 0))),
            ..WeekSchedule::default()
        };
        let boundaries = plan_range(&schedule, d(2026, 3, 2), d(2026, 3, 2), 45);
        for pair in boundaries.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    // -----------------------------------------------------------------------
    // Horizon validation
    // -----------------------------------------------------------------------

    const POLICY: HorizonPolicy = HorizonPolicy {
        min_horizon_days: 0,
        max_horizon_days: 90,
    };

    #[test]
    fn range_inside_window_accepted() {
        let today = d(2026, 3, 2);
        assert!(validate_generation_range(today, today, d(2026, 3, 10), 30, POLICY).is_ok());
    }

    #[test]
    fn zero_duration_rejected() {
        let today = d(2026, 3, 2);
        assert_matches!(
            validate_generation_range(today, today, today, 0, POLICY),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn inverted_range_rejected() {
        let today = d(2026, 3, 2);
        assert_matches!(
            validate_generation_range(today, d(2026, 3, 5), d(2026, 3, 4), 30, POLICY),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn range_in_the_past_rejected() {
        let today = d(2026, 3, 2);
        assert_matches!(
            validate_generation_range(today, d(2026, 3, 1), d(2026, 3, 5), 30, POLICY),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn range_beyond_max_horizon_rejected() {
        let today = d(2026, 3, 2);
        assert_matches!(
            validate_generation_range(today, today, d(2026, 7, 1), 30, POLICY),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn max_horizon_day_itself_is_allowed() {
        let today = d(2026, 3, 2);
        let latest = today + Duration::days(90);
        assert!(validate_generation_range(today, today, latest, 30, POLICY).is_ok());
    }
}
