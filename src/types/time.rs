use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the academic week. Saturday is included; Sunday is not a teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// Fixed iteration order used by every generator in this crate.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse "HH:MM" into minutes since midnight.
pub fn to_minutes(time: &str) -> crate::error::Result<u32> {
    let (h, m) = time
        .split_once(':')
        .ok_or_else(|| SchedulerError::InvalidTime(time.to_string()))?;
    let h: u32 = h
        .parse()
        .map_err(|_| SchedulerError::InvalidTime(time.to_string()))?;
    let m: u32 = m
        .parse()
        .map_err(|_| SchedulerError::InvalidTime(time.to_string()))?;
    if h > 23 || m > 59 {
        return Err(SchedulerError::InvalidTime(time.to_string()).into());
    }
    Ok(h * 60 + m)
}

/// Render minutes since midnight as zero-padded "HH:MM".
pub fn from_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Add `duration` minutes to a "HH:MM" start time. No normalization past 23:59 is
/// performed; callers supply durations that fit within the working window.
pub fn end_of(start: &str, duration: u32) -> crate::error::Result<String> {
    let start_min = to_minutes(start)?;
    Ok(from_minutes(start_min + duration))
}

/// True iff `[a_start, a_end)` and `[b_start, b_end)` overlap. Half-open at the right
/// edge, so touching boundaries (e.g. 09:00-10:00 vs 10:00-11:00) do not conflict.
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> crate::error::Result<bool> {
    let a_start = to_minutes(a_start)?;
    let a_end = to_minutes(a_end)?;
    let b_start = to_minutes(b_start)?;
    let b_end = to_minutes(b_end)?;
    Ok(a_start < b_end && b_start < a_end)
}

/// Default scheduling window, overridable via configuration.
pub const DEFAULT_SLOT_START: &str = "09:00";
pub const DEFAULT_SLOT_END: &str = "17:00";
pub const DEFAULT_SLOT_STEP: u32 = 60;

/// Ordered start-time strings `t` with `start <= t` and `t + duration <= end`, stepped
/// by `step` minutes. `duration` defaults to `step` when callers pass the same value.
pub fn generate_slots(start: &str, end: &str, step: u32, duration: u32) -> crate::error::Result<Vec<String>> {
    let start_min = to_minutes(start)?;
    let end_min = to_minutes(end)?;
    let mut slots = Vec::new();
    let mut t = start_min;
    while t + duration <= end_min {
        slots.push(from_minutes(t));
        t += step;
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_generation_matches_scenario_5() {
        assert_eq!(
            generate_slots("09:00", "10:30", 30, 30).unwrap(),
            vec!["09:00", "09:30", "10:00"]
        );
        assert_eq!(
            generate_slots("09:00", "12:00", 30, 90).unwrap(),
            vec!["09:00", "09:30", "10:00", "10:30"]
        );
    }

    #[test]
    fn end_of_carries_the_hour() {
        assert_eq!(end_of("09:00", 90).unwrap(), "10:30");
    }

    #[test]
    fn end_of_round_trips_through_to_minutes() {
        let start = "13:45";
        let end = end_of(start, 75).unwrap();
        let recovered = from_minutes(to_minutes(&end).unwrap() - 75);
        assert_eq!(recovered, start);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps("09:00", "10:00", "10:00", "11:00").unwrap());
    }

    #[test]
    fn overlapping_intervals_are_detected() {
        assert!(overlaps("09:00", "10:00", "09:30", "10:30").unwrap());
    }

    #[test]
    fn invalid_time_is_an_error() {
        assert!(to_minutes("9:00").is_ok()); // single-digit hour is fine
        assert!(to_minutes("25:00").is_err());
        assert!(to_minutes("nope").is_err());
    }
}
