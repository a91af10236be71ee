//! API error taxonomy and user-facing classification.
//!
//! Transport failures and non-success HTTP statuses are normalized into
//! [`ApiError`]. The variant determines retry eligibility (only
//! non-4xx failures are transient) and [`ApiError::user_message`] maps
//! every failure to a stable display string.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

// ============================================================================
// Error Body
// ============================================================================

/// The backend's error body shape.
///
/// Plain failures carry `{ "message": ... }`; validation failures (422)
/// additionally carry `{ "errors": { field: [message, ...] } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message from the backend.
    #[serde(default)]
    pub message: Option<String>,
    /// Field-keyed validation messages.
    #[serde(default)]
    pub errors: Option<Map<String, Value>>,
}

// ============================================================================
// API Error
// ============================================================================

/// Error type for backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connect failure, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 400.
    #[error("Bad request")]
    BadRequest {
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// HTTP 401. The session has already been torn down when this
    /// surfaces.
    #[error("Unauthorized")]
    Unauthorized,

    /// HTTP 403.
    #[error("Forbidden")]
    Forbidden,

    /// HTTP 404.
    #[error("Not found")]
    NotFound,

    /// HTTP 422 with field-keyed validation messages.
    #[error("Validation failed")]
    Validation {
        /// Server-provided message, if any.
        message: Option<String>,
        /// Field-keyed messages, in server order.
        errors: Map<String, Value>,
    },

    /// HTTP 429.
    #[error("Rate limited")]
    RateLimited,

    /// HTTP 500 or any other unmatched status.
    #[error("Server error ({status})")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// The response body did not decode into the expected type.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Any other client-side failure.
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Builds an error from a non-success HTTP status and parsed body.
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        match status {
            400 => Self::BadRequest {
                message: body.message,
            },
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation {
                message: body.message,
                errors: body.errors.unwrap_or_default(),
            },
            429 => Self::RateLimited,
            other => Self::Server {
                status: other,
                message: body.message,
            },
        }
    }

    /// Returns the HTTP status behind this error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Validation { .. } => Some(422),
            Self::RateLimited => Some(429),
            Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Unexpected(_) => None,
        }
    }

    /// True for statuses in [400, 500): non-transient, never retried.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Maps this failure to its user-facing display string.
    ///
    /// Pure: the same failure shape always yields the same message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Cannot reach the server. Check your internet connection.".to_string()
            }
            Self::BadRequest { message } => message
                .clone()
                .unwrap_or_else(|| "Invalid request.".to_string()),
            Self::Unauthorized => "You are not authorized. Please log in again.".to_string(),
            Self::Forbidden => "You do not have permission to perform this action.".to_string(),
            Self::NotFound => "Data not found.".to_string(),
            Self::Validation { message, errors } => {
                let flattened = flatten_validation_errors(errors);
                if flattened.is_empty() {
                    message
                        .clone()
                        .unwrap_or_else(|| "Invalid data.".to_string())
                } else {
                    flattened.join(", ")
                }
            }
            Self::RateLimited => "Too many requests. Try again later.".to_string(),
            Self::Server { status: 500, .. } => {
                "A server error occurred. Please try again.".to_string()
            }
            Self::Server { status, message } => message
                .clone()
                .unwrap_or_else(|| format!("Error {status}: an unexpected error occurred.")),
            Self::Decode(msg) | Self::Unexpected(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // A status captured here means the response arrived but decoding
        // or a later step failed; everything else never reached the
        // server.
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Network(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// Flattens the field-keyed validation map into one message list, in
/// server order. Values may be arrays of strings or single strings.
fn flatten_validation_errors(errors: &Map<String, Value>) -> Vec<String> {
    let mut messages = Vec::new();
    for value in errors.values() {
        match value {
            Value::Array(items) => {
                messages.extend(items.iter().filter_map(Value::as_str).map(String::from));
            }
            Value::String(s) => messages.push(s.clone()),
            _ => {}
        }
    }
    messages
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Option<ErrorBody> {
        Some(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn network_error_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Cannot reach the server. Check your internet connection."
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn bad_request_prefers_server_message() {
        let err = ApiError::from_status(400, body(json!({ "message": "slug already taken" })));
        assert_eq!(err.user_message(), "slug already taken");

        let err = ApiError::from_status(400, None);
        assert_eq!(err.user_message(), "Invalid request.");
    }

    #[test]
    fn validation_flattens_all_fields_in_server_order() {
        let err = ApiError::from_status(
            422,
            body(json!({
                "errors": {
                    "title": ["required"],
                    "desc": ["too short"]
                }
            })),
        );
        assert_eq!(err.user_message(), "required, too short");
    }

    #[test]
    fn validation_without_field_map_uses_message() {
        let err = ApiError::from_status(422, body(json!({ "message": "broken payload" })));
        assert_eq!(err.user_message(), "broken payload");

        let err = ApiError::from_status(422, None);
        assert_eq!(err.user_message(), "Invalid data.");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(
            ApiError::from_status(401, None).user_message(),
            "You are not authorized. Please log in again."
        );
        assert_eq!(
            ApiError::from_status(403, None).user_message(),
            "You do not have permission to perform this action."
        );
        assert_eq!(ApiError::from_status(404, None).user_message(), "Data not found.");
        assert_eq!(
            ApiError::from_status(429, None).user_message(),
            "Too many requests. Try again later."
        );
        assert_eq!(
            ApiError::from_status(500, None).user_message(),
            "A server error occurred. Please try again."
        );
    }

    #[test]
    fn unmatched_status_falls_back() {
        let err = ApiError::from_status(418, body(json!({ "message": "teapot" })));
        assert_eq!(err.user_message(), "teapot");

        let err = ApiError::from_status(502, None);
        assert_eq!(
            err.user_message(),
            "Error 502: an unexpected error occurred."
        );
    }

    #[test]
    fn client_error_range_gates_retry() {
        assert!(ApiError::from_status(404, None).is_client_error());
        assert!(ApiError::from_status(429, None).is_client_error());
        assert!(ApiError::from_status(422, None).is_client_error());
        assert!(!ApiError::from_status(500, None).is_client_error());
        assert!(!ApiError::Network("x".to_string()).is_client_error());
    }

    #[test]
    fn classification_is_pure() {
        let err = ApiError::from_status(422, body(json!({ "errors": { "a": ["b"] } })));
        assert_eq!(err.user_message(), err.user_message());
    }
}
