use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::time::{ensure_keyable, parse_occurred_on};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceKind {
    Preventive,
    Repair,
    Emergency,
}

impl MaintenanceKind {
    pub const ALL: [MaintenanceKind; 3] = [
        MaintenanceKind::Preventive,
        MaintenanceKind::Repair,
        MaintenanceKind::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceKind::Preventive => "Preventive",
            MaintenanceKind::Repair => "Repair",
            MaintenanceKind::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceKind {
    type Err = AnalyticsError;

    // Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AnalyticsError::UnknownMaintenanceKind(s.to_string()))
    }
}

/// One unit of maintenance work as handed over by a record source, before
/// any validation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub occurred_on: String,
    pub kind: String,
    pub labor_hours: f64,
    pub department: String,
}

/// A validated maintenance event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEvent {
    pub occurred_on: DateTime<Utc>,
    pub kind: MaintenanceKind,
    pub labor_hours: f64,
    pub department: String,
}

impl MaintenanceEvent {
    pub fn new(
        occurred_on: DateTime<Utc>,
        kind: MaintenanceKind,
        labor_hours: f64,
        department: impl Into<String>,
    ) -> Self {
        Self {
            occurred_on,
            kind,
            labor_hours,
            department: department.into(),
        }
    }

    /// Checks the invariants the aggregator relies on.
    pub fn validate(&self) -> AnalyticsResult<()> {
        ensure_keyable(self.occurred_on)?;
        check_labor_hours(self.labor_hours)
    }
}

impl TryFrom<&RawEvent> for MaintenanceEvent {
    type Error = AnalyticsError;

    fn try_from(raw: &RawEvent) -> AnalyticsResult<Self> {
        let occurred_on = parse_occurred_on(&raw.occurred_on)?;
        let kind = raw.kind.parse()?;
        check_labor_hours(raw.labor_hours)?;
        Ok(Self {
            occurred_on,
            kind,
            labor_hours: raw.labor_hours,
            department: raw.department.clone(),
        })
    }
}

fn check_labor_hours(hours: f64) -> AnalyticsResult<()> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidLaborHours(hours))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReplacedPart {
    pub name: String,
}

/// A maintenance record as stored by the surrounding application. The owning
/// department lives on the equipment, not on the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub equipment_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub hours_spent: f64,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completion_status: Option<String>,
    #[serde(default)]
    pub parts_replaced: Vec<ReplacedPart>,
}

impl MaintenanceRecord {
    pub fn to_raw_event(&self, department: &str) -> RawEvent {
        RawEvent {
            occurred_on: self.date.clone(),
            kind: self.kind.clone(),
            labor_hours: self.hours_spent,
            department: department.to_string(),
        }
    }
}
