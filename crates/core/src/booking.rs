//! Booking ledger rules.
//!
//! Checks run in a fixed order (event bookable, tier matched, no duplicate)
//! and the first failure wins. Persistence and the existence lookup live in
//! the db/api layers; this module decides.

use chrono::FixedOffset;

use crate::catalog::{TicketTier, TicketType};
use crate::error::CoreError;
use crate::lifecycle::{refresh_status, EventStatus};
use crate::types::{Amount, Timestamp};

define_text_enum! {
    /// Ledger status of a booking.
    BookingStatus {
        Active = "active",
        Cancelled = "cancelled",
    }
}

define_text_enum! {
    /// Payment state of a booking.
    PaymentStatus {
        Pending = "Pending",
        Paid = "Paid",
    }
}

/// What to do when a requested ticket type has no tier on the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedTierPolicy {
    /// Reject with a validation error.
    Reject,
    /// Book at a unit price of 0.
    PriceAtZero,
}

/// The parts of an event that decide whether it can be booked.
#[derive(Debug, Clone, Copy)]
pub struct BookableEvent<'a> {
    pub status: EventStatus,
    pub date: Timestamp,
    pub tickets: &'a [TicketTier],
}

/// Price snapshot for a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuote {
    pub ticket_price: Amount,
    pub total_price: Amount,
    pub payment_status: PaymentStatus,
}

/// Reject bookings against events that are over, canceled, or already started.
pub fn ensure_bookable(
    event: &BookableEvent<'_>,
    now: Timestamp,
    tz: &FixedOffset,
) -> Result<(), CoreError> {
    let status = refresh_status(event.status, event.date, now, tz);
    if status.is_terminal() || event.date < now {
        return Err(CoreError::EventClosed(
            "This event is no longer accepting bookings".to_string(),
        ));
    }
    Ok(())
}

/// Look up the unit price for `ticket_type` on the event's tiers.
pub fn unit_price(
    tickets: &[TicketTier],
    ticket_type: TicketType,
    policy: UnmatchedTierPolicy,
) -> Result<Amount, CoreError> {
    match tickets.iter().find(|t| t.ticket_type == ticket_type) {
        Some(tier) => Ok(tier.price),
        None => match policy {
            UnmatchedTierPolicy::Reject => Err(CoreError::Validation(format!(
                "Ticket type {ticket_type} is not offered for this event"
            ))),
            UnmatchedTierPolicy::PriceAtZero => Ok(0),
        },
    }
}

/// Compute totals and the initial payment status.
///
/// Free (zero-priced) bookings settle immediately; anything else waits for
/// payment.
pub fn quote(ticket_price: Amount, quantity: i32) -> Result<BookingQuote, CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    let total_price = ticket_price
        .checked_mul(Amount::from(quantity))
        .ok_or_else(|| CoreError::Validation("Booking total is too large".to_string()))?;
    let payment_status = if ticket_price == 0 {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Pending
    };
    Ok(BookingQuote {
        ticket_price,
        total_price,
        payment_status,
    })
}

/// Run every ledger check in order and price the booking.
///
/// `has_active_booking` is whether the caller already holds an active booking
/// for this event and ticket type.
pub fn prepare_booking(
    event: &BookableEvent<'_>,
    ticket_type: TicketType,
    quantity: i32,
    has_active_booking: bool,
    now: Timestamp,
    tz: &FixedOffset,
    policy: UnmatchedTierPolicy,
) -> Result<BookingQuote, CoreError> {
    ensure_bookable(event, now, tz)?;
    let price = unit_price(event.tickets, ticket_type, policy)?;
    if has_active_booking {
        return Err(CoreError::Conflict(
            "You have already booked this ticket type for this event".to_string(),
        ));
    }
    quote(price, quantity)
}

/// Only an active, pending booking can be marked as paid.
pub fn ensure_payment_confirmable(
    status: BookingStatus,
    payment_status: PaymentStatus,
) -> Result<(), CoreError> {
    if status == BookingStatus::Cancelled {
        return Err(CoreError::Conflict(
            "Booking has been cancelled".to_string(),
        ));
    }
    if payment_status == PaymentStatus::Paid {
        return Err(CoreError::Conflict("Booking is already paid".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn tiers() -> Vec<TicketTier> {
        vec![
            TicketTier {
                ticket_type: TicketType::Vip,
                price: 300,
                available_seats: 10,
            },
            TicketTier {
                ticket_type: TicketType::Free,
                price: 0,
                available_seats: 50,
            },
        ]
    }

    #[test]
    fn free_booking_is_paid_immediately() {
        let q = quote(0, 1).unwrap();
        assert_eq!(q.total_price, 0);
        assert_eq!(q.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn priced_booking_is_pending() {
        let q = quote(300, 3).unwrap();
        assert_eq!(q.ticket_price, 300);
        assert_eq!(q.total_price, 900);
        assert_eq!(q.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn total_is_unit_times_quantity() {
        for (price, qty) in [(1, 1), (250, 4), (9_999, 12), (0, 7)] {
            assert_eq!(quote(price, qty).unwrap().total_price, price * Amount::from(qty));
        }
    }

    #[test]
    fn zero_quantity_rejected() {
        assert_matches!(quote(100, 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overflowing_total_rejected() {
        assert_matches!(quote(Amount::MAX, 2), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unmatched_tier_follows_policy() {
        let t = tiers();
        assert_matches!(
            unit_price(&t, TicketType::General, UnmatchedTierPolicy::Reject),
            Err(CoreError::Validation(_))
        );
        assert_eq!(
            unit_price(&t, TicketType::General, UnmatchedTierPolicy::PriceAtZero).unwrap(),
            0
        );
        assert_eq!(
            unit_price(&t, TicketType::Vip, UnmatchedTierPolicy::Reject).unwrap(),
            300
        );
    }

    #[test]
    fn completed_and_canceled_events_are_closed() {
        let now = Utc::now();
        let t = tiers();
        for status in [EventStatus::Completed, EventStatus::Canceled] {
            let event = BookableEvent {
                status,
                date: now - Duration::days(3),
                tickets: &t,
            };
            assert_matches!(ensure_bookable(&event, now, &utc()), Err(CoreError::EventClosed(_)));
        }
        let canceled_future = BookableEvent {
            status: EventStatus::Canceled,
            date: now + Duration::days(3),
            tickets: &t,
        };
        assert_matches!(
            ensure_bookable(&canceled_future, now, &utc()),
            Err(CoreError::EventClosed(_))
        );
    }

    #[test]
    fn stale_upcoming_status_with_past_date_is_closed() {
        let now = Utc::now();
        let t = tiers();
        let event = BookableEvent {
            status: EventStatus::Upcoming,
            date: now - Duration::days(2),
            tickets: &t,
        };
        assert_matches!(ensure_bookable(&event, now, &utc()), Err(CoreError::EventClosed(_)));
    }

    #[test]
    fn checks_run_in_order() {
        let now = Utc::now();
        let t = tiers();
        let closed = BookableEvent {
            status: EventStatus::Completed,
            date: now - Duration::days(1),
            tickets: &t,
        };
        // Closed wins over unmatched tier and duplicate.
        assert_matches!(
            prepare_booking(&closed, TicketType::General, 1, true, now, &utc(), UnmatchedTierPolicy::Reject),
            Err(CoreError::EventClosed(_))
        );

        let open = BookableEvent {
            status: EventStatus::Upcoming,
            date: now + Duration::days(10),
            tickets: &t,
        };
        // Unmatched tier wins over duplicate.
        assert_matches!(
            prepare_booking(&open, TicketType::General, 1, true, now, &utc(), UnmatchedTierPolicy::Reject),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            prepare_booking(&open, TicketType::Free, 1, true, now, &utc(), UnmatchedTierPolicy::Reject),
            Err(CoreError::Conflict(_))
        );
        let q = prepare_booking(&open, TicketType::Free, 1, false, now, &utc(), UnmatchedTierPolicy::Reject)
            .unwrap();
        assert_eq!(q.total_price, 0);
        assert_eq!(q.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn payment_confirmation_rules() {
        assert!(ensure_payment_confirmable(BookingStatus::Active, PaymentStatus::Pending).is_ok());
        assert_matches!(
            ensure_payment_confirmable(BookingStatus::Active, PaymentStatus::Paid),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            ensure_payment_confirmable(BookingStatus::Cancelled, PaymentStatus::Pending),
            Err(CoreError::Conflict(_))
        );
    }
}
