use super::time::{DEFAULT_SLOT_END, DEFAULT_SLOT_START, DEFAULT_SLOT_STEP};
use serde::{Deserialize, Serialize};
use std::env;

fn default_slot_start() -> String {
    DEFAULT_SLOT_START.to_string()
}
fn default_slot_end() -> String {
    DEFAULT_SLOT_END.to_string()
}
fn default_slot_step() -> u32 {
    DEFAULT_SLOT_STEP
}
fn default_teacher_cap() -> u32 {
    4
}
fn default_group_cap() -> u32 {
    5
}
fn default_classroom_cap() -> u32 {
    6
}

/// Engine-wide configuration: the scheduling window and the per-day lecture caps.
/// Resolved with precedence CLI flag > `timetable.toml` > environment variable >
/// built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_slot_start")]
    pub slot_start: String,
    #[serde(default = "default_slot_end")]
    pub slot_end: String,
    #[serde(default = "default_slot_step")]
    pub slot_step: u32,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_teacher_cap")]
    pub max_teacher_daily_lectures: u32,
    #[serde(default = "default_group_cap")]
    pub max_group_daily_lectures: u32,
    #[serde(default = "default_classroom_cap")]
    pub max_classroom_daily_lectures: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_start: default_slot_start(),
            slot_end: default_slot_end(),
            slot_step: default_slot_step(),
            debug: false,
            max_teacher_daily_lectures: default_teacher_cap(),
            max_group_daily_lectures: default_group_cap(),
            max_classroom_daily_lectures: default_classroom_cap(),
        }
    }
}

impl EngineConfig {
    /// Overlay environment variables (`TIMETABLE_START`, etc.) on top of `self`,
    /// only where the variable is actually set. Environment has lower precedence
    /// than a loaded TOML file or CLI flags, so callers apply this before those.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("TIMETABLE_START") {
            self.slot_start = v;
        }
        if let Ok(v) = env::var("TIMETABLE_END") {
            self.slot_end = v;
        }
        if let Ok(v) = env::var("TIMETABLE_STEP") {
            if let Ok(v) = v.parse() {
                self.slot_step = v;
            }
        }
        if let Ok(v) = env::var("TIMETABLE_DEBUG") {
            self.debug = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(v) = env::var("MAX_TEACHER_DAILY_LECTURES") {
            if let Ok(v) = v.parse() {
                self.max_teacher_daily_lectures = v;
            }
        }
        if let Ok(v) = env::var("MAX_GROUP_DAILY_LECTURES") {
            if let Ok(v) = v.parse() {
                self.max_group_daily_lectures = v;
            }
        }
        if let Ok(v) = env::var("MAX_CLASSROOM_DAILY_LECTURES") {
            if let Ok(v) = v.parse() {
                self.max_classroom_daily_lectures = v;
            }
        }
        self
    }
}
