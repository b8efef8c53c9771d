use crate::model::maintenance::RawEvent;
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Supplies maintenance facts to the aggregator.
pub trait RecordSource {
    /// Events dated at or after `cutoff`, oldest first. Events whose date
    /// cannot be read are included so the aggregator can reject them.
    fn fetch_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<RawEvent>>;

    fn fetch_all(&self) -> Result<Vec<RawEvent>>;
}
