//! Query parameter types shared across handler modules.

use eventhub_core::analytics::StatsPeriod;
use eventhub_core::catalog::EventCategory;
use serde::Deserialize;

/// `GET /events` filters and paging (`?category=&search=&limit=&offset=`).
///
/// Limits are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub category: Option<EventCategory>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /organizer/stats?period=`.
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub period: Option<StatsPeriod>,
}
