//! Booking entity model and DTOs.

use eventhub_core::booking::{BookingStatus, PaymentStatus};
use eventhub_core::catalog::{EventCategory, TicketType};
use eventhub_core::recommendation::BookingSignal;
use eventhub_core::types::{Amount, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    #[sqlx(try_from = "String")]
    pub ticket_type: TicketType,
    pub quantity: i32,
    /// Unit price captured when the booking was made.
    pub ticket_price: Amount,
    pub total_price: Amount,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a booking. Prices come from the ledger quote.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub event_id: DbId,
    pub ticket_type: TicketType,
    pub quantity: i32,
    pub ticket_price: Amount,
    pub total_price: Amount,
    pub payment_status: PaymentStatus,
}

/// A booking joined with the headline fields of its event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithEvent {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub event_title: String,
    pub event_date: Timestamp,
    pub event_location: String,
    #[sqlx(try_from = "String")]
    pub event_category: EventCategory,
}

/// Event attributes of one past booking, for preference building.
#[derive(Debug, Clone, FromRow)]
pub struct BookingHistoryRow {
    pub category: Option<String>,
    pub organizer_id: Option<DbId>,
    pub location: Option<String>,
}

impl From<BookingHistoryRow> for BookingSignal {
    fn from(row: BookingHistoryRow) -> Self {
        BookingSignal {
            // Unknown categories carry no signal rather than failing the request.
            category: row.category.and_then(|c| c.parse().ok()),
            organizer_id: row.organizer_id,
            location: row.location,
        }
    }
}
