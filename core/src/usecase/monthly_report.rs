use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::maintenance::{MaintenanceEvent, RawEvent};
use crate::model::summary::MonthSummary;
use crate::time::month_key;

#[derive(Debug)]
struct MonthAccumulator {
    summary: MonthSummary,
    hours: Vec<f64>,
}

impl MonthAccumulator {
    /// Sums labor hours smallest first, so equal multisets give equal totals
    /// whatever order the events arrived in.
    fn into_summary(mut self) -> AnalyticsResult<MonthSummary> {
        self.hours.sort_by(f64::total_cmp);
        let total_hours: f64 = self.hours.iter().sum();
        if !total_hours.is_finite() {
            return Err(AnalyticsError::LaborHoursOverflow(self.summary.month_key));
        }
        self.summary.total_hours = total_hours;
        Ok(self.summary)
    }
}

/// Month-by-month fold over maintenance events.
///
/// Each aggregation owns its own instance. Input order does not matter; the
/// result of [`MonthlyAggregator::finish`] is always sorted by month key.
#[derive(Debug, Default)]
pub struct MonthlyAggregator {
    months: HashMap<String, MonthAccumulator>, // Key: "YYYY-MM"
    events: usize,
}

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &MaintenanceEvent) -> AnalyticsResult<()> {
        event.validate()?;
        let key = month_key(&event.occurred_on);
        let month = self
            .months
            .entry(key.clone())
            .or_insert_with(|| MonthAccumulator {
                summary: MonthSummary::new(key),
                hours: Vec::new(),
            });
        month.summary.add(event);
        month.hours.push(event.labor_hours);
        self.events += 1;
        Ok(())
    }

    pub fn push_raw(&mut self, raw: &RawEvent) -> AnalyticsResult<()> {
        let event = MaintenanceEvent::try_from(raw)?;
        self.push(&event)
    }

    /// Number of events folded so far.
    pub fn len(&self) -> usize {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events == 0
    }

    /// Fails if any month's labor total is not a finite number.
    pub fn finish(self) -> AnalyticsResult<Vec<MonthSummary>> {
        let mut report = self
            .months
            .into_values()
            .map(MonthAccumulator::into_summary)
            .collect::<AnalyticsResult<Vec<_>>>()?;
        // Fixed-width keys, so plain string order is chronological.
        report.sort_by(|a, b| a.month_key.cmp(&b.month_key));
        debug!(events = self.events, months = report.len(), "monthly report aggregated");
        Ok(report)
    }
}

/// Aggregates validated events into a chronologically sorted report.
///
/// Fails on the first event that does not validate; no partial report is
/// returned.
pub fn aggregate<'a, I>(events: I) -> AnalyticsResult<Vec<MonthSummary>>
where
    I: IntoIterator<Item = &'a MaintenanceEvent>,
{
    let mut aggregator = MonthlyAggregator::new();
    for (index, event) in events.into_iter().enumerate() {
        aggregator.push(event).inspect_err(|e| {
            warn!(index, error = %e, "rejecting maintenance event");
        })?;
    }
    aggregator.finish().inspect_err(|e| warn!(error = %e, "rejecting monthly report"))
}

/// Validates and aggregates events straight from a record source.
pub fn aggregate_raw<'a, I>(raw: I) -> AnalyticsResult<Vec<MonthSummary>>
where
    I: IntoIterator<Item = &'a RawEvent>,
{
    let mut aggregator = MonthlyAggregator::new();
    for (index, event) in raw.into_iter().enumerate() {
        aggregator.push_raw(event).inspect_err(|e| {
            warn!(index, occurred_on = %event.occurred_on, error = %e, "rejecting maintenance event");
        })?;
    }
    aggregator.finish().inspect_err(|e| warn!(error = %e, "rejecting monthly report"))
}
