//! Event catalog rules: categories, ticket tiers, visibility and ownership.

use std::collections::HashSet;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::lifecycle::{resolve_status, EventStatus};
use crate::roles::Role;
use crate::types::{Amount, DbId, Timestamp};

/// Reason recorded on bookings cancelled by an event soft delete.
pub const EVENT_DELETED_REASON: &str = "Event was deleted by organizer";

define_text_enum! {
    /// Closed set of event categories.
    EventCategory {
        Technology = "Technology",
        Music = "Music",
        Business = "Business",
        Sport = "Sport",
        Other = "Other",
    }
}

define_text_enum! {
    /// Closed set of ticket tier types.
    TicketType {
        Vip = "VIP",
        General = "General",
        Free = "Free",
    }
}

/// One ticket tier of an event. Stored as an element of the event's
/// `tickets` JSONB array, so field order here is the document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    #[serde(alias = "ticketType")]
    pub ticket_type: TicketType,
    pub price: Amount,
    #[serde(alias = "availableSeats")]
    pub available_seats: i32,
}

/// Validate an ordered tier list for an event.
///
/// At least one tier; non-negative price and seats; `Free` tiers cost 0;
/// each tier type at most once.
pub fn validate_tiers(tiers: &[TicketTier]) -> Result<(), CoreError> {
    if tiers.is_empty() {
        return Err(CoreError::Validation(
            "An event needs at least one ticket tier".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for tier in tiers {
        if tier.price < 0 {
            return Err(CoreError::Validation(format!(
                "Ticket price for {} must not be negative",
                tier.ticket_type
            )));
        }
        if tier.available_seats < 0 {
            return Err(CoreError::Validation(format!(
                "Available seats for {} must not be negative",
                tier.ticket_type
            )));
        }
        if tier.ticket_type == TicketType::Free && tier.price != 0 {
            return Err(CoreError::Validation(
                "Free tickets must have a price of 0".to_string(),
            ));
        }
        if !seen.insert(tier.ticket_type) {
            return Err(CoreError::Validation(format!(
                "Duplicate ticket tier: {}",
                tier.ticket_type
            )));
        }
    }
    Ok(())
}

/// Reject event dates that lie in the past.
pub fn validate_event_date(date: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if date < now {
        return Err(CoreError::InvalidDate(
            "Event date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Initial status for a new event, after checking its date.
pub fn status_for_new_event(
    date: Timestamp,
    now: Timestamp,
    tz: &FixedOffset,
) -> Result<EventStatus, CoreError> {
    validate_event_date(date, now)?;
    Ok(resolve_status(date, now, tz))
}

/// Only the owning organizer may mutate an event.
pub fn ensure_owner(organizer_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if organizer_id != caller_id {
        return Err(CoreError::Forbidden(
            "You are not allowed to modify this event".to_string(),
        ));
    }
    Ok(())
}

/// Direct access by id is limited to upcoming and ongoing events.
pub fn ensure_viewable(status: EventStatus) -> Result<(), CoreError> {
    if !status.is_public() {
        return Err(CoreError::Forbidden(format!(
            "Event is not available ({status})"
        )));
    }
    Ok(())
}

/// Which events a listing returns for a given caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// An organizer's own non-deleted events, any status.
    OwnedBy(DbId),
    /// Non-deleted upcoming/ongoing events.
    Public,
}

impl ListScope {
    /// Organizers see their own catalog; everyone else, including anonymous
    /// callers and admins, sees the public one. Admins who organize reach
    /// their own events, any status, through the organizer listing.
    pub fn for_caller(caller: Option<(DbId, Role)>) -> Self {
        match caller {
            Some((id, Role::Organizer)) => ListScope::OwnedBy(id),
            _ => ListScope::Public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    fn tier(ticket_type: TicketType, price: Amount, seats: i32) -> TicketTier {
        TicketTier {
            ticket_type,
            price,
            available_seats: seats,
        }
    }

    #[test]
    fn accepts_typical_tiers() {
        let tiers = vec![tier(TicketType::Vip, 300, 10), tier(TicketType::Free, 0, 50)];
        assert!(validate_tiers(&tiers).is_ok());
    }

    #[test]
    fn rejects_empty_tiers() {
        assert_matches!(validate_tiers(&[]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_negative_price_and_seats() {
        assert_matches!(
            validate_tiers(&[tier(TicketType::General, -1, 5)]),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_tiers(&[tier(TicketType::General, 10, -5)]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_priced_free_tier() {
        let err = validate_tiers(&[tier(TicketType::Free, 5, 5)]).unwrap_err();
        assert!(err.to_string().contains("Free tickets"));
    }

    #[test]
    fn rejects_duplicate_tier_types() {
        let tiers = vec![tier(TicketType::Vip, 100, 1), tier(TicketType::Vip, 200, 1)];
        assert_matches!(validate_tiers(&tiers), Err(CoreError::Validation(_)));
    }

    #[test]
    fn ticket_type_wire_names() {
        assert_eq!(TicketType::Vip.as_str(), "VIP");
        assert_eq!("General".parse::<TicketType>().unwrap(), TicketType::General);
        assert!("vip".parse::<TicketType>().is_err());
        let tier: TicketTier = serde_json::from_str(
            r#"{"ticket_type":"VIP","price":300,"available_seats":10}"#,
        )
        .unwrap();
        assert_eq!(tier.ticket_type, TicketType::Vip);
    }

    #[test]
    fn category_is_closed() {
        assert_eq!(EventCategory::ALL.len(), 5);
        assert!("Cooking".parse::<EventCategory>().is_err());
    }

    #[test]
    fn past_date_is_invalid() {
        let now = Utc::now();
        assert_matches!(
            validate_event_date(now - Duration::hours(1), now),
            Err(CoreError::InvalidDate(_))
        );
        assert!(validate_event_date(now, now).is_ok());
    }

    #[test]
    fn new_event_ten_days_out_is_upcoming() {
        let now = Utc::now();
        let tz = FixedOffset::east_opt(0).unwrap();
        let status = status_for_new_event(now + Duration::days(10), now, &tz).unwrap();
        assert_eq!(status, EventStatus::Upcoming);
    }

    #[test]
    fn ownership_check() {
        assert!(ensure_owner(7, 7).is_ok());
        assert_matches!(ensure_owner(7, 8), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn viewability_check() {
        assert!(ensure_viewable(EventStatus::Upcoming).is_ok());
        assert!(ensure_viewable(EventStatus::Ongoing).is_ok());
        assert_matches!(
            ensure_viewable(EventStatus::Completed),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            ensure_viewable(EventStatus::Canceled),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn list_scope_by_role() {
        assert_eq!(
            ListScope::for_caller(Some((3, Role::Organizer))),
            ListScope::OwnedBy(3)
        );
        assert_eq!(ListScope::for_caller(Some((3, Role::Attendee))), ListScope::Public);
        assert_eq!(ListScope::for_caller(Some((3, Role::Admin))), ListScope::Public);
        assert_eq!(ListScope::for_caller(None), ListScope::Public);
    }
}
