//! Error raised by the pure pricing and search engines.

use thiserror::Error;

/// A malformed or out-of-range input to [`crate::domain::finance`] or
/// [`crate::domain::search`].
///
/// This is the only failure the engines produce. It is always recoverable by
/// the caller; the API layer maps it to `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input for `{field}`: {reason}")]
pub struct InvalidInput {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidInput {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_and_reason() {
        let err = InvalidInput::new("page", "must be at least 1");
        assert_eq!(err.to_string(), "invalid input for `page`: must be at least 1");
    }
}
