//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- the caller if a token was sent.
//! - [`rbac::RequireOrganizer`] -- `organizer` or `admin`.
//! - [`rbac::RequireAdmin`] -- `admin` only.

pub mod auth;
pub mod rbac;
