//! Gateway response envelope and classification.
//!
//! Every YOP response arrives wrapped in the same envelope: a `state`
//! discriminant plus an optional business `result` and an optional
//! protocol-level `error`. The `state` field only says the HTTP/protocol
//! exchange succeeded; a `SUCCESS` envelope can still carry a business
//! error in its nested result code, so [`classify`] always checks both
//! layers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, YeepayError};

/// Envelope state signalling a successful protocol exchange.
pub const STATE_SUCCESS: &str = "SUCCESS";

/// Envelope state signalling a protocol-level rejection.
pub const STATE_FAILURE: &str = "FAILURE";

/// Top-level wrapper around every gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Transport-level state: `SUCCESS`, `FAILURE`, or something the
    /// gateway invented since this was written.
    pub state: String,
    /// Business payload, present on protocol-successful responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload, present on protocol-level failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

/// Error object carried by `FAILURE` envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Gateway failure code.
    #[serde(default)]
    pub code: Option<String>,
    /// Gateway failure message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Classifies a gateway envelope into the business payload or a typed
/// error.
///
/// Total over the envelope: every state maps to exactly one outcome.
/// `business_success_code` differs per endpoint (`00000` for pre-pay,
/// `OPR00000` for order query); this is a gateway convention, not a bug.
///
/// # Errors
///
/// - [`YeepayError::Business`] when the protocol exchange succeeded but the
///   nested result code is not the expected success code.
/// - [`YeepayError::ApiFailure`] when the gateway reports `FAILURE`.
/// - [`YeepayError::Protocol`] for any other state, carrying the raw
///   envelope for diagnostics.
pub fn classify(envelope: ResponseEnvelope, business_success_code: &str) -> Result<Value> {
    match envelope.state.as_str() {
        STATE_SUCCESS => match envelope.result {
            Some(result)
                if result.get("code").and_then(Value::as_str) == Some(business_success_code) =>
            {
                Ok(result)
            }
            result => {
                let code = result
                    .as_ref()
                    .and_then(|r| r.get("code"))
                    .and_then(Value::as_str)
                    .unwrap_or("UNKNOWN_CODE")
                    .to_owned();
                let message = result
                    .as_ref()
                    .and_then(|r| r.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown Yeepay business error message")
                    .to_owned();
                Err(YeepayError::Business { code, message })
            }
        },
        STATE_FAILURE => {
            let (code, message) = match envelope.error {
                Some(error) => (
                    error.code.unwrap_or_else(|| "UNKNOWN_FAILURE_CODE".to_owned()),
                    error.message.unwrap_or_else(|| "Unknown Yeepay failure message".to_owned()),
                ),
                None => (
                    "UNKNOWN_FAILURE_CODE".to_owned(),
                    "Unknown Yeepay failure message".to_owned(),
                ),
            };
            Err(YeepayError::ApiFailure { code, message })
        }
        _ => {
            let state = envelope.state.clone();
            let raw = serde_json::to_value(&envelope).unwrap_or_default();
            Err(YeepayError::Protocol { state, raw })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn success_envelope(result: Value) -> ResponseEnvelope {
        ResponseEnvelope { state: STATE_SUCCESS.to_owned(), result: Some(result), error: None }
    }

    #[test]
    fn test_business_success_returns_result() {
        let envelope = success_envelope(json!({
            "code": "00000",
            "prePayTn": "tn-1",
            "orderId": "O1",
            "uniqueOrderNo": "U1",
        }));

        let result = classify(envelope, "00000").unwrap();
        assert_eq!(result["prePayTn"], "tn-1");
        assert_eq!(result["uniqueOrderNo"], "U1");
    }

    #[test]
    fn test_success_state_with_wrong_code_is_business_error() {
        let envelope = success_envelope(json!({
            "code": "99999",
            "message": "order already exists",
        }));

        let err = classify(envelope, "00000").unwrap_err();
        let YeepayError::Business { code, message } = err else {
            panic!("expected Business error, got {err:?}");
        };
        assert_eq!(code, "99999");
        assert_eq!(message, "order already exists");
    }

    #[test]
    fn test_success_code_for_other_endpoint_is_business_error() {
        // Query success code handed to the create classification must fail:
        // the per-endpoint codes are not interchangeable.
        let envelope = success_envelope(json!({"code": "OPR00000"}));
        assert!(classify(envelope, "00000").is_err());
    }

    #[test]
    fn test_success_state_without_result_uses_default_code() {
        let envelope =
            ResponseEnvelope { state: STATE_SUCCESS.to_owned(), result: None, error: None };

        let err = classify(envelope, "00000").unwrap_err();
        let YeepayError::Business { code, message } = err else {
            panic!("expected Business error, got {err:?}");
        };
        assert_eq!(code, "UNKNOWN_CODE");
        assert_eq!(message, "Unknown Yeepay business error message");
    }

    #[test]
    fn test_failure_state_is_api_failure() {
        let envelope = ResponseEnvelope {
            state: STATE_FAILURE.to_owned(),
            result: None,
            error: Some(ErrorPayload {
                code: Some("AUTH_ERROR".to_owned()),
                message: Some("Invalid credentials".to_owned()),
            }),
        };

        let err = classify(envelope, "00000").unwrap_err();
        let YeepayError::ApiFailure { code, message } = err else {
            panic!("expected ApiFailure error, got {err:?}");
        };
        assert_eq!(code, "AUTH_ERROR");
        assert_eq!(message, "Invalid credentials");
    }

    #[test]
    fn test_failure_state_without_error_payload_uses_defaults() {
        let envelope =
            ResponseEnvelope { state: STATE_FAILURE.to_owned(), result: None, error: None };

        let err = classify(envelope, "00000").unwrap_err();
        let YeepayError::ApiFailure { code, message } = err else {
            panic!("expected ApiFailure error, got {err:?}");
        };
        assert_eq!(code, "UNKNOWN_FAILURE_CODE");
        assert_eq!(message, "Unknown Yeepay failure message");
    }

    #[test]
    fn test_unknown_state_is_protocol_error() {
        let envelope =
            ResponseEnvelope { state: "UNKNOWN".to_owned(), result: None, error: None };

        let err = classify(envelope, "00000").unwrap_err();
        assert!(err.to_string().contains("UNKNOWN"));
        let YeepayError::Protocol { state, raw } = err else {
            panic!("expected Protocol error, got {err:?}");
        };
        assert_eq!(state, "UNKNOWN");
        assert_eq!(raw["state"], "UNKNOWN");
    }

    #[test]
    fn test_envelope_deserializes_without_optional_fields() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"state":"SUCCESS"}"#).unwrap();
        assert_eq!(envelope.state, "SUCCESS");
        assert!(envelope.result.is_none());
        assert!(envelope.error.is_none());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            // Classification is total: any state string maps to exactly one
            // outcome, and states outside SUCCESS/FAILURE are always
            // Protocol errors carrying the literal state.
            #[test]
            fn classify_never_panics(state in ".*", code in "[A-Z0-9]{0,10}") {
                let envelope = ResponseEnvelope {
                    state: state.clone(),
                    result: Some(serde_json::json!({"code": code})),
                    error: None,
                };

                match classify(envelope, "00000") {
                    Ok(_) => prop_assert_eq!(state.as_str(), STATE_SUCCESS),
                    Err(YeepayError::Business { .. }) => {
                        prop_assert_eq!(state.as_str(), STATE_SUCCESS);
                    }
                    Err(YeepayError::ApiFailure { .. }) => {
                        prop_assert_eq!(state.as_str(), STATE_FAILURE);
                    }
                    Err(YeepayError::Protocol { state: reported, .. }) => {
                        prop_assert_eq!(reported, state);
                    }
                    Err(other) => prop_assert!(false, "unexpected error kind: {other:?}"),
                }
            }
        }
    }
}
