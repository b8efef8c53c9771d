use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::maintenance::{MaintenanceEvent, MaintenanceKind};

/// Per-kind counters. All three keys are always serialized, zero or not.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeBreakdown {
    #[serde(rename = "Preventive")]
    pub preventive: u64,
    #[serde(rename = "Repair")]
    pub repair: u64,
    #[serde(rename = "Emergency")]
    pub emergency: u64,
}

impl TypeBreakdown {
    pub fn get(&self, kind: MaintenanceKind) -> u64 {
        match kind {
            MaintenanceKind::Preventive => self.preventive,
            MaintenanceKind::Repair => self.repair,
            MaintenanceKind::Emergency => self.emergency,
        }
    }

    pub fn increment(&mut self, kind: MaintenanceKind) {
        match kind {
            MaintenanceKind::Preventive => self.preventive += 1,
            MaintenanceKind::Repair => self.repair += 1,
            MaintenanceKind::Emergency => self.emergency += 1,
        }
    }

    pub fn sum(&self) -> u64 {
        self.preventive + self.repair + self.emergency
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month_key: String, // "YYYY-MM"
    pub total: u64,
    pub by_type: TypeBreakdown,
    pub by_department: BTreeMap<String, u64>,
    pub total_hours: f64,
    pub emergency_count: u64,
}

impl MonthSummary {
    pub fn new(month_key: String) -> Self {
        Self {
            month_key,
            total: 0,
            by_type: TypeBreakdown::default(),
            by_department: BTreeMap::new(),
            total_hours: 0.0,
            emergency_count: 0,
        }
    }

    /// Folds one already-validated event into this month's counters.
    /// `total_hours` is filled in by the aggregator once the month is complete.
    pub fn add(&mut self, event: &MaintenanceEvent) {
        self.total += 1;
        self.by_type.increment(event.kind);
        if event.kind == MaintenanceKind::Emergency {
            self.emergency_count += 1;
        }
        *self.by_department.entry(event.department.clone()).or_default() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_new_summary_has_all_type_keys() {
        let summary = MonthSummary::new("2024-01".to_string());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json["byType"],
            serde_json::json!({"Preventive": 0, "Repair": 0, "Emergency": 0})
        );
        assert_eq!(json["byDepartment"], serde_json::json!({}));
        assert_eq!(json["monthKey"], "2024-01");
    }

    #[test]
    fn test_add_tallies_counters() {
        let at = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let mut summary = MonthSummary::new("2024-01".to_string());
        summary.add(&MaintenanceEvent::new(at, MaintenanceKind::Emergency, 5.0, "Assembly"));
        summary.add(&MaintenanceEvent::new(at, MaintenanceKind::Repair, 1.5, "Assembly"));

        assert_eq!(summary.total, 2);
        assert_eq!(summary.by_type.get(MaintenanceKind::Emergency), 1);
        assert_eq!(summary.by_type.get(MaintenanceKind::Repair), 1);
        assert_eq!(summary.by_type.get(MaintenanceKind::Preventive), 0);
        assert_eq!(summary.by_department.get("Assembly"), Some(&2));
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.emergency_count, 1);
    }
}
