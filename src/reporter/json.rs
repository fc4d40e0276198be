use crate::error::Result;
use crate::types::TimetableEntry;
use serde::Serialize;

/// Full JSON rendering of a generated schedule: the raw entries plus the
/// counts a caller typically wants without re-deriving them.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub algorithm: &'a str,
    pub generated_at: String,
    pub entries: &'a [TimetableEntry],
    pub total_slots: usize,
    pub unscheduled: usize,
}

pub fn generate_json_report(algorithm: &str, entries: &[TimetableEntry], unscheduled: usize) -> Result<String> {
    let report = JsonReport {
        algorithm,
        generated_at: chrono::Utc::now().to_rfc3339(),
        entries,
        total_slots: entries.len(),
        unscheduled,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Compact summary, used by `--quiet` CLI runs that want one JSON line rather
/// than a rendered report.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub algorithm: String,
    pub total_slots: usize,
    pub unscheduled: usize,
    pub success_rate: f64,
}

pub fn generate_json_summary(algorithm: &str, total_slots: usize, unscheduled: usize) -> Result<String> {
    let denominator = total_slots + unscheduled;
    let success_rate = if denominator == 0 {
        100.0
    } else {
        (total_slots as f64 / denominator as f64) * 100.0
    };
    let summary = JsonSummary {
        algorithm: algorithm.to_string(),
        total_slots,
        unscheduled,
        success_rate,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassroomId, CourseId, Day, EntryId, StudentGroupId, TeacherId, TimetableEntry};

    fn entry() -> TimetableEntry {
        TimetableEntry::new(
            EntryId("e1".into()),
            CourseId("c1".into()),
            StudentGroupId("g1".into()),
            TeacherId("t1".into()),
            ClassroomId("r1".into()),
            Day::Monday,
            "09:00",
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap()
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let entries = vec![entry()];
        let json = generate_json_report("greedy", &entries, 0).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["algorithm"], "greedy");
        assert_eq!(parsed["entries"][0]["course_id"], "c1");
    }

    #[test]
    fn summary_reports_a_percentage() {
        let json = generate_json_summary("greedy", 3, 1).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["success_rate"], 75.0);
    }
}
