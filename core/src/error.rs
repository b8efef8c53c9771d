use thiserror::Error;

/// Reasons an aggregation call fails. Any of these aborts the whole call;
/// there is no partial report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("unknown maintenance kind: {0:?} (expected Preventive, Repair or Emergency)")]
    UnknownMaintenanceKind(String),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("labor hours must be finite and non-negative, got {0}")]
    InvalidLaborHours(f64),

    #[error("labor hour total for {0} is not a finite number")]
    LaborHoursOverflow(String),
}

pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;
