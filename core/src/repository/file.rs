use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json;
use tracing::info;

use crate::model::equipment::Equipment;
use crate::model::maintenance::{MaintenanceRecord, RawEvent};
use crate::repository::traits::RecordSource;
use crate::time::parse_occurred_on;

const DEFAULT_DIR_NAME: &str = ".maintlog";
const DEFAULT_FILE_NAME: &str = "maintenance.json";

/// On-disk layout written by the surrounding application.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStore {
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub maintenance_records: Vec<MaintenanceRecord>,
}

/// Read-only record source backed by a JSON file.
#[derive(Clone, Debug)]
pub struct FileRecordSource {
    file_path: PathBuf,
}

impl FileRecordSource {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// `~/.maintlog/maintenance.json`
    pub fn default_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_store(&self) -> Result<MaintenanceStore> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open data file {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let store: MaintenanceStore = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse data file {}", self.file_path.display()))?;
        info!(
            path = %self.file_path.display(),
            equipment = store.equipment.len(),
            records = store.maintenance_records.len(),
            "loaded maintenance store"
        );
        Ok(store)
    }

    /// Joins every record to its equipment's department. Pairs each event
    /// with its parsed date, or `None` when the date is unreadable.
    fn read_events(&self) -> Result<Vec<(Option<DateTime<Utc>>, RawEvent)>> {
        let store = self.read_store()?;
        let mut departments: HashMap<&str, &str> = HashMap::new();
        for equipment in &store.equipment {
            if departments
                .insert(equipment.id.as_str(), equipment.department.as_str())
                .is_some()
            {
                return Err(anyhow!("Duplicate equipment id {}", equipment.id));
            }
        }

        store
            .maintenance_records
            .iter()
            .map(|record| -> Result<_> {
                let department = departments
                    .get(record.equipment_id.as_str())
                    .ok_or_else(|| {
                        anyhow!(
                            "Maintenance record {} references unknown equipment {}",
                            record.id,
                            record.equipment_id
                        )
                    })?;
                let parsed = parse_occurred_on(&record.date).ok();
                Ok((parsed, record.to_raw_event(department)))
            })
            .collect()
    }
}

fn sorted_by_date(mut events: Vec<(Option<DateTime<Utc>>, RawEvent)>) -> Vec<RawEvent> {
    // Unreadable dates go last, in file order.
    events.sort_by_key(|(date, _)| (date.is_none(), *date));
    events.into_iter().map(|(_, event)| event).collect()
}

impl RecordSource for FileRecordSource {
    fn fetch_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<RawEvent>> {
        let events = self
            .read_events()?
            .into_iter()
            .filter(|(date, _)| date.map_or(true, |d| d >= cutoff))
            .collect();
        Ok(sorted_by_date(events))
    }

    fn fetch_all(&self) -> Result<Vec<RawEvent>> {
        Ok(sorted_by_date(self.read_events()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_store(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const STORE: &str = r#"{
        "equipment": [
            {"id": "eq-1", "name": "Lathe", "department": "Machining"},
            {"id": "eq-2", "name": "Press", "department": "Assembly", "status": "Operational"}
        ],
        "maintenanceRecords": [
            {"id": "r1", "equipmentId": "eq-2", "date": "2024-01-20T09:00:00Z", "type": "Emergency", "hoursSpent": 5},
            {"id": "r2", "equipmentId": "eq-1", "date": "2022-06-01T09:00:00Z", "type": "Repair", "hoursSpent": 1},
            {"id": "r3", "equipmentId": "eq-1", "date": "2024-01-05T09:00:00Z", "type": "Preventive", "hoursSpent": 2},
            {"id": "r4", "equipmentId": "eq-1", "date": "garbled", "type": "Repair", "hoursSpent": 1}
        ]
    }"#;

    #[test]
    fn test_fetch_since_filters_joins_and_sorts() {
        let file = write_store(STORE);
        let source = FileRecordSource::new(file.path());
        let cutoff = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();

        let events = source.fetch_since(cutoff).unwrap();
        let dates: Vec<&str> = events.iter().map(|e| e.occurred_on.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-01-05T09:00:00Z", "2024-01-20T09:00:00Z", "garbled"]
        );
        assert_eq!(events[0].department, "Machining");
        assert_eq!(events[1].department, "Assembly");
        assert_eq!(events[1].kind, "Emergency");
        assert_eq!(events[1].labor_hours, 5.0);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let file = write_store(STORE);
        let source = FileRecordSource::new(file.path());
        let cutoff = Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap();

        let events = source.fetch_since(cutoff).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].occurred_on, "2024-01-20T09:00:00Z");
    }

    #[test]
    fn test_fetch_all_ignores_window() {
        let file = write_store(STORE);
        let source = FileRecordSource::new(file.path());
        let events = source.fetch_all().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].occurred_on, "2022-06-01T09:00:00Z");
    }

    #[test]
    fn test_unknown_equipment_is_an_error() {
        let file = write_store(
            r#"{"equipment": [], "maintenanceRecords": [
                {"id": "r1", "equipmentId": "ghost", "date": "2024-01-01", "type": "Repair", "hoursSpent": 1}
            ]}"#,
        );
        let err = FileRecordSource::new(file.path()).fetch_all().unwrap_err();
        assert!(err.to_string().contains("unknown equipment ghost"));
    }

    #[test]
    fn test_duplicate_equipment_id_is_an_error() {
        let file = write_store(
            r#"{"equipment": [
                {"id": "eq-1", "name": "Lathe", "department": "Machining"},
                {"id": "eq-1", "name": "Lathe", "department": "Shipping"}
            ], "maintenanceRecords": [
                {"id": "r1", "equipmentId": "eq-1", "date": "2024-01-01", "type": "Repair", "hoursSpent": 1}
            ]}"#,
        );
        let err = FileRecordSource::new(file.path()).fetch_all().unwrap_err();
        assert!(err.to_string().contains("Duplicate equipment id eq-1"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRecordSource::new(dir.path().join("absent.json"));
        assert!(source.fetch_all().is_err());
    }

    #[test]
    fn test_empty_store() {
        let file = write_store("{}");
        let source = FileRecordSource::new(file.path());
        assert!(source.fetch_all().unwrap().is_empty());
    }
}
