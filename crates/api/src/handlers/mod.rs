pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod organizer;
pub mod recommendations;
pub mod users;
