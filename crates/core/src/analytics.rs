//! Organizer statistics over a time window.

use std::collections::{BTreeMap, HashMap};

use chrono::Duration;
use serde::Serialize;

use crate::booking::{BookingStatus, PaymentStatus};
use crate::catalog::{EventCategory, TicketType};
use crate::lifecycle::EventStatus;
use crate::types::{Amount, DbId, Timestamp};

/// Number of entries in [`OrganizerStats::top_events`].
pub const TOP_EVENTS: usize = 5;

define_text_enum! {
    /// Reporting window for organizer statistics.
    StatsPeriod {
        Week = "week",
        Month = "month",
        Year = "year",
        All = "all",
    }
}

impl Default for StatsPeriod {
    fn default() -> Self {
        StatsPeriod::Month
    }
}

impl StatsPeriod {
    /// Inclusive lower bound of the window, `None` for all time.
    pub fn window_start(self, now: Timestamp) -> Option<Timestamp> {
        let days = match self {
            StatsPeriod::Week => 7,
            StatsPeriod::Month => 30,
            StatsPeriod::Year => 365,
            StatsPeriod::All => return None,
        };
        Some(now - Duration::days(days))
    }
}

/// One of the organizer's events, status already refreshed.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub id: DbId,
    pub title: String,
    pub category: EventCategory,
    pub status: EventStatus,
    pub created_at: Timestamp,
}

/// One booking against one of the organizer's events.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub event_id: DbId,
    pub ticket_type: TicketType,
    pub quantity: i32,
    pub total_price: Amount,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEvent {
    pub event_id: DbId,
    pub title: String,
    pub tickets_sold: i64,
    pub revenue: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizerStats {
    pub period: StatsPeriod,
    pub window_start: Option<Timestamp>,
    pub total_events: i64,
    pub events_by_status: BTreeMap<EventStatus, i64>,
    pub events_by_category: BTreeMap<EventCategory, i64>,
    pub active_bookings: i64,
    pub cancelled_bookings: i64,
    pub tickets_sold: i64,
    /// Sum of active, paid bookings.
    pub revenue: Amount,
    /// Sum of active bookings still awaiting payment.
    pub pending_revenue: Amount,
    pub bookings_by_ticket_type: BTreeMap<TicketType, i64>,
    pub top_events: Vec<TopEvent>,
}

fn zeroed<K: Ord + Copy>(keys: &[K]) -> BTreeMap<K, i64> {
    keys.iter().map(|k| (*k, 0)).collect()
}

/// Aggregate the organizer's events and bookings for `period`.
///
/// Events are counted by creation time, bookings by booking time. Top events
/// are ranked by tickets sold in the window, then revenue, then id.
pub fn aggregate(
    period: StatsPeriod,
    now: Timestamp,
    events: &[EventRecord],
    bookings: &[BookingRecord],
) -> OrganizerStats {
    let window_start = period.window_start(now);
    let in_window = |at: Timestamp| window_start.map_or(true, |start| at >= start);

    let mut events_by_status = zeroed(EventStatus::ALL);
    let mut events_by_category = zeroed(EventCategory::ALL);
    let mut total_events = 0;
    for event in events.iter().filter(|e| in_window(e.created_at)) {
        total_events += 1;
        *events_by_status.entry(event.status).or_default() += 1;
        *events_by_category.entry(event.category).or_default() += 1;
    }

    let mut stats = OrganizerStats {
        period,
        window_start,
        total_events,
        events_by_status,
        events_by_category,
        active_bookings: 0,
        cancelled_bookings: 0,
        tickets_sold: 0,
        revenue: 0,
        pending_revenue: 0,
        bookings_by_ticket_type: zeroed(TicketType::ALL),
        top_events: Vec::new(),
    };

    let mut per_event: HashMap<DbId, (i64, Amount)> = HashMap::new();
    for booking in bookings.iter().filter(|b| in_window(b.created_at)) {
        if booking.status == BookingStatus::Cancelled {
            stats.cancelled_bookings += 1;
            continue;
        }
        let quantity = i64::from(booking.quantity);
        stats.active_bookings += 1;
        stats.tickets_sold += quantity;
        *stats
            .bookings_by_ticket_type
            .entry(booking.ticket_type)
            .or_default() += 1;

        let entry = per_event.entry(booking.event_id).or_default();
        entry.0 += quantity;
        match booking.payment_status {
            PaymentStatus::Paid => {
                stats.revenue += booking.total_price;
                entry.1 += booking.total_price;
            }
            PaymentStatus::Pending => stats.pending_revenue += booking.total_price,
        }
    }

    let titles: HashMap<DbId, &str> = events.iter().map(|e| (e.id, e.title.as_str())).collect();
    let mut top: Vec<TopEvent> = per_event
        .into_iter()
        .map(|(event_id, (tickets_sold, revenue))| TopEvent {
            event_id,
            title: titles.get(&event_id).copied().unwrap_or_default().to_string(),
            tickets_sold,
            revenue,
        })
        .collect();
    top.sort_by(|a, b| {
        b.tickets_sold
            .cmp(&a.tickets_sold)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| a.event_id.cmp(&b.event_id))
    });
    top.truncate(TOP_EVENTS);
    stats.top_events = top;

    stats
}
