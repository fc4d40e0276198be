use super::time::{overlaps, to_minutes};
use super::Day;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A half-open `[start, end)` window on a single day, in "HH:MM" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

impl Interval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Day-keyed list of intervals; used for both availability windows and blackout periods.
pub type AvailabilityMap = HashMap<Day, Vec<Interval>>;

/// Implemented by every entity that can be checked against availability windows and
/// blackout periods: teachers, classrooms, and student groups.
pub trait Scheduled {
    fn availability(&self) -> &AvailabilityMap;
    fn blackout_periods(&self) -> &AvailabilityMap;
}

/// `within_availability(entity, day, start, end)`: absence of the entity, or an
/// entity with neither availability nor blackout data, is unconstrained. A
/// blackout overlap always fails. Availability windows, when declared at all,
/// are exclusionary: a day missing from the map means the entity is
/// unavailable that day, not unconstrained.
pub fn within_availability<T: Scheduled>(
    entity: Option<&T>,
    day: Day,
    start: &str,
    end: &str,
) -> crate::error::Result<bool> {
    let Some(entity) = entity else {
        return Ok(true);
    };

    let blackout = entity.blackout_periods();
    let availability = entity.availability();

    if blackout.is_empty() && availability.is_empty() {
        return Ok(true);
    }

    if let Some(slots) = blackout.get(&day) {
        for slot in slots {
            if overlaps(start, end, &slot.start, &slot.end)? {
                return Ok(false);
            }
        }
    }

    if !availability.is_empty() {
        match availability.get(&day) {
            Some(slots) => {
                let start_m = to_minutes(start)?;
                let end_m = to_minutes(end)?;
                let fits = slots.iter().any(|slot| {
                    let slot_start = to_minutes(&slot.start).unwrap_or(u32::MAX);
                    let slot_end = to_minutes(&slot.end).unwrap_or(0);
                    start_m >= slot_start && end_m <= slot_end
                });
                if !fits {
                    return Ok(false);
                }
            }
            None => return Ok(false),
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        availability: AvailabilityMap,
        blackout_periods: AvailabilityMap,
    }

    impl Scheduled for Fixture {
        fn availability(&self) -> &AvailabilityMap {
            &self.availability
        }
        fn blackout_periods(&self) -> &AvailabilityMap {
            &self.blackout_periods
        }
    }

    #[test]
    fn absent_entity_is_unconstrained() {
        assert!(within_availability::<Fixture>(None, Day::Monday, "09:00", "10:00").unwrap());
    }

    #[test]
    fn entity_with_no_data_is_unconstrained() {
        let f = Fixture {
            availability: AvailabilityMap::new(),
            blackout_periods: AvailabilityMap::new(),
        };
        assert!(within_availability(Some(&f), Day::Monday, "09:00", "10:00").unwrap());
    }

    #[test]
    fn blackout_overlap_fails() {
        let mut blackout = AvailabilityMap::new();
        blackout.insert(Day::Monday, vec![Interval::new("09:00", "10:00")]);
        let f = Fixture {
            availability: AvailabilityMap::new(),
            blackout_periods: blackout,
        };
        assert!(!within_availability(Some(&f), Day::Monday, "09:30", "10:30").unwrap());
    }

    #[test]
    fn availability_declared_but_missing_for_day_is_unavailable() {
        let mut availability = AvailabilityMap::new();
        availability.insert(Day::Tuesday, vec![Interval::new("09:00", "17:00")]);
        let f = Fixture {
            availability,
            blackout_periods: AvailabilityMap::new(),
        };
        // No record for Monday even though Tuesday is declared.
        assert!(!within_availability(Some(&f), Day::Monday, "09:00", "10:00").unwrap());
    }

    #[test]
    fn interval_outside_declared_availability_fails() {
        let mut availability = AvailabilityMap::new();
        availability.insert(Day::Monday, vec![Interval::new("09:00", "12:00")]);
        let f = Fixture {
            availability,
            blackout_periods: AvailabilityMap::new(),
        };
        assert!(!within_availability(Some(&f), Day::Monday, "11:30", "12:30").unwrap());
        assert!(within_availability(Some(&f), Day::Monday, "09:00", "10:00").unwrap());
    }
}
