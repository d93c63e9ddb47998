//! Shared fixtures for repository tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use eventhub_core::booking::PaymentStatus;
use eventhub_core::catalog::{EventCategory, TicketTier, TicketType};
use eventhub_core::lifecycle::EventStatus;
use eventhub_core::roles::Role;
use eventhub_core::types::{Amount, DbId};
use eventhub_db::models::booking::{Booking, CreateBooking};
use eventhub_db::models::event::{CreateEvent, Event};
use eventhub_db::models::user::{CreateUser, User};
use eventhub_db::repositories::{BookingRepo, EventRepo, UserRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "not-a-real-hash".to_string(),
            role,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn tiers() -> Vec<TicketTier> {
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

pub fn new_event(organizer_id: DbId, title: &str, days_out: i64) -> CreateEvent {
    CreateEvent {
        organizer_id,
        title: title.to_string(),
        description: "repository test".to_string(),
        date: Utc::now() + Duration::days(days_out),
        location: "Berlin".to_string(),
        category: EventCategory::Music,
        banner_url: None,
        status: EventStatus::Upcoming,
        tickets: tiers(),
    }
}

pub async fn create_event(pool: &PgPool, organizer_id: DbId, title: &str, days_out: i64) -> Event {
    EventRepo::create(pool, &new_event(organizer_id, title, days_out))
        .await
        .expect("event creation should succeed")
}

pub fn new_booking(user_id: DbId, event_id: DbId, ticket_type: TicketType, price: Amount) -> CreateBooking {
    CreateBooking {
        user_id,
        event_id,
        ticket_type,
        quantity: 1,
        ticket_price: price,
        total_price: price,
        payment_status: if price == 0 {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        },
    }
}

pub async fn create_booking(
    pool: &PgPool,
    user_id: DbId,
    event_id: DbId,
    ticket_type: TicketType,
    price: Amount,
) -> Booking {
    BookingRepo::create(pool, &new_booking(user_id, event_id, ticket_type, price))
        .await
        .expect("booking creation should succeed")
}
