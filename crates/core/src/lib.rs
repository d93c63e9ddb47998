//! Domain logic for EventHub: lifecycle resolution, booking rules, catalog
//! visibility, recommendations and organizer analytics.
//!
//! Everything here is synchronous and free of I/O so it can be exercised
//! directly by unit tests; persistence lives in `eventhub-db` and transport
//! in `eventhub-api`.

// Declared first so `define_text_enum!` is in scope for the modules below.
#[macro_use]
pub mod types;

pub mod accounts;
pub mod analytics;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod pagination;
pub mod recommendation;
pub mod roles;
