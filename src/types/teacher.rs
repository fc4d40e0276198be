use super::availability::{AvailabilityMap, Scheduled};
use super::TeacherId;
use serde::{Deserialize, Serialize};

/// A faculty member. `role` is always "faculty" in this engine; the field exists so
/// the JSON shape mirrors the wider HR record a caller's repository draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub availability: AvailabilityMap,
    #[serde(default)]
    pub blackout_periods: AvailabilityMap,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub department: Option<String>,
}

fn default_role() -> String {
    "faculty".to_string()
}

fn default_true() -> bool {
    true
}

impl Scheduled for Teacher {
    fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }
    fn blackout_periods(&self) -> &AvailabilityMap {
        &self.blackout_periods
    }
}
