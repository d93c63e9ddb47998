use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A date that must not lie in the past does.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A booking was attempted against an event that no longer accepts them.
    #[error("Event closed: {0}")]
    EventClosed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    /// Flatten field errors into one message, ordered by field name so the
    /// output is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field}: {detail}")
            })
            .collect();
        fields.sort();
        CoreError::Validation(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn validation_errors_flatten_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("length"));
        let mut with_message = ValidationError::new("range");
        with_message.message = Some("must be at least 1".into());
        errors.add("quantity", with_message);

        let err = CoreError::from(errors);
        match err {
            CoreError::Validation(msg) => {
                assert_eq!(msg, "quantity: must be at least 1; title: length");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
