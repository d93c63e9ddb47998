//! Rows feeding organizer analytics.

use eventhub_core::analytics::BookingRecord;
use eventhub_core::booking::{BookingStatus, PaymentStatus};
use eventhub_core::catalog::{EventCategory, TicketType};
use eventhub_core::lifecycle::EventStatus;
use eventhub_core::types::{Amount, DbId, Timestamp};
use sqlx::FromRow;

/// One of an organizer's events, including soft-deleted ones.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizerEventRow {
    pub id: DbId,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub category: EventCategory,
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub date: Timestamp,
    pub created_at: Timestamp,
}

/// One booking against an organizer's event.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizerBookingRow {
    pub event_id: DbId,
    #[sqlx(try_from = "String")]
    pub ticket_type: TicketType,
    pub quantity: i32,
    pub total_price: Amount,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

impl From<OrganizerBookingRow> for BookingRecord {
    fn from(row: OrganizerBookingRow) -> Self {
        BookingRecord {
            event_id: row.event_id,
            ticket_type: row.ticket_type,
            quantity: row.quantity,
            total_price: row.total_price,
            payment_status: row.payment_status,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
