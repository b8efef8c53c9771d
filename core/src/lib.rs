pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use model::equipment::Equipment;
pub use model::maintenance::{MaintenanceEvent, MaintenanceKind, MaintenanceRecord, RawEvent};
pub use model::summary::{MonthSummary, TypeBreakdown};
pub use repository::{FileRecordSource, RecordSource};
pub use service::analytics_service::AnalyticsService;
pub use service::dto::ReportResponse;
pub use time::{month_key, parse_occurred_on, window_start};
pub use usecase::monthly_report::{aggregate, aggregate_raw, MonthlyAggregator};
