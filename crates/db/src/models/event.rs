//! Event entity model and DTOs.

use eventhub_core::catalog::{EventCategory, TicketTier};
use eventhub_core::lifecycle::EventStatus;
use eventhub_core::recommendation::CandidateFeatures;
use eventhub_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: DbId,
    pub organizer_id: DbId,
    pub title: String,
    pub description: String,
    pub date: Timestamp,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub category: EventCategory,
    pub banner_url: Option<String>,
    /// Status as last persisted; may be stale until refreshed.
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub tickets: Json<Vec<TicketTier>>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Scoring attributes for the recommender.
    pub fn features(&self) -> CandidateFeatures {
        CandidateFeatures {
            id: self.id,
            category: self.category,
            organizer_id: self.organizer_id,
            location: self.location.clone(),
            date: self.date,
        }
    }
}

/// DTO for inserting an event. `status` is resolved by the caller.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub organizer_id: DbId,
    pub title: String,
    pub description: String,
    pub date: Timestamp,
    pub location: String,
    pub category: EventCategory,
    pub banner_url: Option<String>,
    pub status: EventStatus,
    pub tickets: Vec<TicketTier>,
}

/// DTO for a partial event update. `None` keeps the stored value, except
/// `status`, which is always rewritten from the resulting date.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<Timestamp>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub banner_url: Option<String>,
    pub tickets: Option<Vec<TicketTier>>,
    pub status: EventStatus,
}

/// Optional narrowing for event listings.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
