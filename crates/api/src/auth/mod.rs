//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and refresh-token helpers.

pub mod jwt;
pub mod password;
