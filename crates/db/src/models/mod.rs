//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity is mutable
//!
//! Closed enums are stored as TEXT and decoded through
//! `#[sqlx(try_from = "String")]`.

pub mod booking;
pub mod event;
pub mod session;
pub mod stats;
pub mod user;
