use super::availability::{AvailabilityMap, Scheduled};
use super::ClassroomId;
use serde::{Deserialize, Serialize};

/// A physical room with a seating capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub availability: AvailabilityMap,
    #[serde(default)]
    pub blackout_periods: AvailabilityMap,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Classroom {
    pub fn fits(&self, group_size: u32) -> bool {
        self.capacity >= group_size
    }
}

impl Scheduled for Classroom {
    fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }
    fn blackout_periods(&self) -> &AvailabilityMap {
        &self.blackout_periods
    }
}
