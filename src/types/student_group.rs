use super::availability::{AvailabilityMap, Scheduled};
use super::StudentGroupId;
use serde::{Deserialize, Serialize};

/// A cohort of students that moves through sessions together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: StudentGroupId,
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub availability: AvailabilityMap,
    #[serde(default)]
    pub blackout_periods: AvailabilityMap,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Scheduled for StudentGroup {
    fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }
    fn blackout_periods(&self) -> &AvailabilityMap {
        &self.blackout_periods
    }
}
