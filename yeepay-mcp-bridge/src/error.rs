//! Error types for the Yeepay-MCP bridge.
//!
//! The gateway signals failure on two layers: a transport-level `state`
//! field and a business-level `code` nested inside a protocol-successful
//! result. Each layer gets its own variant so callers can branch on kind
//! without parsing messages.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, YeepayError>;

/// Errors that can occur in the Yeepay-MCP bridge.
///
/// None of these are recovered internally: every error propagates unchanged
/// through the tool dispatch layer to the caller, who owns retry policy.
#[derive(Debug, Error)]
pub enum YeepayError {
    /// Required configuration is missing or empty.
    ///
    /// Raised once at startup; the message names every missing environment
    /// variable. The process must not serve requests in this state.
    #[error("Yeepay configuration error: {0}")]
    Configuration(String),

    /// Tool input failed structural validation.
    ///
    /// Raised by the dispatch layer before the payment operation runs.
    #[error("invalid tool input: {0}")]
    Validation(String),

    /// The gateway accepted the request at the protocol level but rejected
    /// it at the business level (e.g. duplicate order, invalid order state).
    ///
    /// Corresponds to `state = "SUCCESS"` with a non-success business code.
    #[error("Yeepay business error: {code} - {message}")]
    Business {
        /// Gateway-assigned business result code.
        code: String,
        /// Gateway-assigned human-readable message.
        message: String,
    },

    /// The gateway rejected the request at the protocol level (e.g. auth
    /// failure, malformed signature).
    ///
    /// Corresponds to `state = "FAILURE"`.
    #[error("Yeepay API failure: {code} - {message}")]
    ApiFailure {
        /// Gateway-assigned failure code.
        code: String,
        /// Gateway-assigned human-readable message.
        message: String,
    },

    /// The gateway returned a state that is neither `SUCCESS` nor
    /// `FAILURE`.
    ///
    /// Unexpected gateway behavior; the raw envelope is kept for
    /// diagnostics.
    #[error("unknown Yeepay API response state: {state}")]
    Protocol {
        /// The literal state value the gateway returned.
        state: String,
        /// The full response envelope as received.
        raw: serde_json::Value,
    },

    /// HTTP communication with the gateway failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusal, DNS or TLS
    /// failures, non-2xx statuses, malformed response bodies.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A step that should not fail did.
    ///
    /// Carries the stringified original failure so callers always see a
    /// consistent error shape with a message.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_error_display() {
        let error = YeepayError::Business {
            code: "99999".to_owned(),
            message: "order already exists".to_owned(),
        };
        assert_eq!(error.to_string(), "Yeepay business error: 99999 - order already exists");
    }

    #[test]
    fn test_api_failure_display() {
        let error = YeepayError::ApiFailure {
            code: "AUTH_ERROR".to_owned(),
            message: "Invalid credentials".to_owned(),
        };
        assert_eq!(error.to_string(), "Yeepay API failure: AUTH_ERROR - Invalid credentials");
    }

    #[test]
    fn test_protocol_error_display_contains_state() {
        let error = YeepayError::Protocol {
            state: "UNKNOWN".to_owned(),
            raw: serde_json::json!({"state": "UNKNOWN"}),
        };
        assert!(error.to_string().contains("UNKNOWN"));
    }

    #[test]
    fn test_configuration_error_display() {
        let error = YeepayError::Configuration(
            "missing required environment variables: YOP_APP_KEY".to_owned(),
        );
        assert!(error.to_string().contains("YOP_APP_KEY"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = YeepayError::Validation("orderId cannot be empty".to_owned());
        assert_eq!(error.to_string(), "invalid tool input: orderId cannot be empty");
    }
}
