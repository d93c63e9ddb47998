//! Account identity rules.

use crate::error::CoreError;
use crate::roles::Role;

/// Usernames are unique case-insensitively; store them trimmed and lower-cased.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Emails are unique case-insensitively; store them trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `deserialize_with` helpers that apply the normalizers while a request body
/// is parsed, so validation rules see the value that will be stored.
pub mod normalized {
    use serde::{Deserialize, Deserializer};

    pub fn username<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        String::deserialize(d).map(|s| super::normalize_username(&s))
    }

    pub fn email<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        String::deserialize(d).map(|s| super::normalize_email(&s))
    }

    /// Pair with `#[serde(default)]` so an absent field stays `None`.
    pub fn optional_username<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<String>, D::Error> {
        Option::<String>::deserialize(d).map(|v| v.as_deref().map(super::normalize_username))
    }

    pub fn optional_email<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Option::<String>::deserialize(d).map(|v| v.as_deref().map(super::normalize_email))
    }
}

/// Resolve the role for a self-service signup.
///
/// Absent means attendee. Asking for anything above attendee is rejected
/// outright instead of being silently downgraded.
pub fn signup_role(requested: Option<&str>) -> Result<Role, CoreError> {
    match requested.map(str::trim) {
        None | Some("") => Ok(Role::Attendee),
        Some(name) => match name.parse::<Role>()? {
            Role::Attendee => Ok(Role::Attendee),
            other => Err(CoreError::Validation(format!(
                "Role '{other}' cannot be chosen at signup"
            ))),
        },
    }
}
