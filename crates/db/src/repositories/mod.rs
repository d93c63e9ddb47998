//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod event_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use event_repo::EventRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;

/// Turn free text into an `ILIKE` substring pattern, escaping wildcards.
pub(crate) fn contains_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
