//! Working-hours schedule types.
//!
//! A tenant's week schedule drives slot generation: each weekday carries an
//! optional open/close window plus breaks during which no slots are emitted.
//! The schedule is stored as JSONB on `tenant_schedule_settings`.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A closed interval during which the tenant does not take bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Working hours for a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub open: NaiveTime,
    pub close: NaiveTime,
    #[serde(default)]
    pub breaks: Vec<BreakWindow>,
}

/// Per-weekday working hours; `None` means closed that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub monday: Option<DaySchedule>,
    pub tuesday: Option<DaySchedule>,
    pub wednesday: Option<DaySchedule>,
    pub thursday: Option<DaySchedule>,
    pub friday: Option<DaySchedule>,
    pub saturday: Option<DaySchedule>,
    pub sunday: Option<DaySchedule>,
}

impl WeekSchedule {
    /// Working hours for the given weekday, if the tenant is open.
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DaySchedule> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    /// Validate every configured day, naming the offending weekday.
    pub fn validate(&self) -> Result<(), CoreError> {
        let days = [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ];
        for (name, day) in days {
            if let Some(day) = day {
                day.validate()
                    .map_err(|msg| CoreError::Validation(format!("{name}: {msg}")))?;
            }
        }
        Ok(())
    }
}

impl DaySchedule {
    /// Check the open/close window and break placement.
    ///
    /// Breaks must lie inside the open interval and must not overlap each
    /// other.
    pub fn validate(&self) -> Result<(), String> {
        if self.open >= self.close {
            return Err(format!(
                "open time {} must be before close time {}",
                self.open, self.close
            ));
        }
        let mut sorted = self.breaks.clone();
        sorted.sort_by_key(|b| b.start);
        let mut previous_end: Option<NaiveTime> = None;
        for brk in &sorted {
            if brk.start >= brk.end {
                return Err(format!(
                    "break start {} must be before break end {}",
                    brk.start, brk.end
                ));
            }
            if brk.start < self.open || brk.end > self.close {
                return Err(format!(
                    "break {}-{} falls outside working hours",
                    brk.start, brk.end
                ));
            }
            if let Some(prev) = previous_end {
                if brk.start < prev {
                    return Err(format!("break starting at {} overlaps another break", brk.start));
                }
            }
            previous_end = Some(brk.end);
        }
        Ok(())
    }

    /// The bookable intervals of the day: open/close minus breaks, in
    /// chronological order. Assumes [`validate`](Self::validate) passed.
    pub fn working_intervals(&self) -> Vec<(NaiveTime, NaiveTime)> {
        let mut breaks = self.breaks.clone();
        breaks.sort_by_key(|b| b.start);

        let mut intervals = Vec::with_capacity(breaks.len() + 1);
        let mut cursor = self.open;
        for brk in &breaks {
            if brk.start > cursor {
                intervals.push((cursor, brk.start));
            }
            cursor = cursor.max(brk.end);
        }
        if cursor < self.close {
            intervals.push((cursor, self.close));
        }
        intervals
    }
}
