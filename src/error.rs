//! Error types for the roster store and the insight requestor.

use thiserror::Error;

/// Errors returned by the roster store and member selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// A member field is outside its allowed range.
    #[error("invalid member field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No member with the given id exists.
    #[error("member not found: {0}")]
    NotFound(String),

    /// A member action was requested with nothing selected.
    #[error("no member selected")]
    NoSelection,
}

impl RosterError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RosterError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors returned by an insight backend.
///
/// None of these reach the user directly; the application state converts
/// them into a fixed fallback message.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The API credential variable is unset or empty.
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("cannot connect to model API at {0}")]
    Connect(String),

    /// The API answered with a non-success status.
    #[error("model API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse model response: {0}")]
    Parse(String),

    /// The model returned no text.
    #[error("model returned an empty response")]
    Empty,

    #[error("failed to send request: {0}")]
    Request(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = RosterError::validation("stressLevel", "must be between 0 and 10, got 11");
        assert_eq!(
            err.to_string(),
            "invalid member field `stressLevel`: must be between 0 and 10, got 11"
        );
    }

    #[test]
    fn test_api_error_message() {
        let err = InsightError::Api {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "model API error 403: forbidden");
    }
}
