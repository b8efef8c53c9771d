use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::DEFAULT_WINDOW_MONTHS;
use crate::model::summary::MonthSummary;
use crate::repository::RecordSource;
use crate::time::window_start;
use crate::usecase::monthly_report::aggregate_raw;

pub struct AnalyticsService<S: RecordSource> {
    source: S,
    window_months: u32,
}

impl<S: RecordSource> AnalyticsService<S> {
    pub fn new(source: S) -> Self {
        Self::with_window(source, DEFAULT_WINDOW_MONTHS)
    }

    pub fn with_window(source: S, window_months: u32) -> Self {
        Self {
            source,
            window_months,
        }
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    /// Monthly report over the trailing window ending at `now`.
    pub fn monthly_report(&self, now: DateTime<Utc>) -> Result<Vec<MonthSummary>> {
        self.monthly_report_since(window_start(now, self.window_months))
    }

    pub fn monthly_report_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<MonthSummary>> {
        let events = self.source.fetch_since(cutoff)?;
        info!(%cutoff, events = events.len(), "aggregating maintenance events");
        Ok(aggregate_raw(&events)?)
    }

    /// Monthly report over every record the source holds.
    pub fn full_report(&self) -> Result<Vec<MonthSummary>> {
        let events = self.source.fetch_all()?;
        Ok(aggregate_raw(&events)?)
    }
}
