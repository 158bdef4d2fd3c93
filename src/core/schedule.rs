use crate::domain::model::{DateSpan, Route, Stop};
use crate::utils::error::{Result, TravelyError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_LABEL_FORMAT: &str = "%a %d %b";

pub const DEFAULT_PLANNED_NIGHTS: u32 = 21;

/// Lays the stops end to end from `start`: each stop begins where the
/// previous one ended and lasts its own night count.
pub fn cascade_dates(route: &mut Route, start: NaiveDate) -> Result<()> {
    let route_id = route.id;
    route.transact(|working| {
        let mut cursor = start;
        for stop in working.stops.iter_mut() {
            let span = DateSpan::from_nights(cursor, stop.nights).map_err(|e| TravelyError::InvalidStop {
                stop_id: stop.id,
                reason: e.to_string(),
            })?;
            stop.dates = Some(span);
            cursor = span.end;
        }
        Ok(())
    })?;
    tracing::debug!("Route {}: dates cascaded from {}", route_id, start);
    Ok(())
}

pub fn total_nights(route: &Route) -> u64 {
    route.stops.iter().map(|stop| u64::from(stop.nights)).sum()
}

/// Planned number of nights a route should fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightsBudget {
    pub planned: u32,
}

impl Default for NightsBudget {
    fn default() -> Self {
        Self {
            planned: DEFAULT_PLANNED_NIGHTS,
        }
    }
}

impl NightsBudget {
    pub fn new(planned: u32) -> Self {
        Self { planned }
    }

    /// Share of the budget used, capped at 1.0.
    pub fn progress(&self, total: u64) -> f64 {
        if self.planned == 0 {
            return if total > 0 { 1.0 } else { 0.0 };
        }
        (total as f64 / f64::from(self.planned)).min(1.0)
    }

    pub fn is_over(&self, total: u64) -> bool {
        total > u64::from(self.planned)
    }

    pub fn remaining(&self, total: u64) -> i64 {
        i64::from(self.planned) - total as i64
    }
}

/// "Thu 07 Mar - Mon 11 Mar", or "Thu 07 Mar - Transit" for a stop without nights.
pub fn format_span(span: &DateSpan) -> String {
    let start = span.start.format(DATE_LABEL_FORMAT);
    if span.nights() == 0 {
        format!("{} - Transit", start)
    } else {
        format!("{} - {}", start, span.end.format(DATE_LABEL_FORMAT))
    }
}

pub fn duration_label(nights: u32) -> String {
    match nights {
        1 => "1 Day".to_string(),
        n => format!("{} Days", n),
    }
}

/// Date label of a stop, empty when it has not been scheduled.
pub fn stop_date_label(stop: &Stop) -> String {
    stop.dates().map(format_span).unwrap_or_default()
}
